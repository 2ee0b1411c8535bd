//! HTML → ratatui `Text` renderer for server-supplied descriptions.
//!
//! This is the sanitization boundary: the description arrives as untrusted
//! markup, and only an allowlisted subset survives as styling. Paragraphs,
//! line breaks, headings, bold, italic, underline, strikethrough, lists and
//! links are kept. Active or embedded content (`script`, `style`, `iframe`,
//! ...) is dropped together with everything inside it. Any other element
//! contributes its text only, and no attribute is ever rendered except a link
//! target with a safe scheme.

use std::borrow::Cow;

use ego_tree::NodeRef;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use scraper::{Html, Node};

/// Elements removed with their whole subtree.
const DROPPED: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template", "head", "title",
    "svg", "math", "form", "input", "button", "select", "textarea", "canvas", "audio", "video",
];

const SAFE_LINK_SCHEMES: &[&str] = &["http://", "https://", "mailto:"];

/// Sanitize `html` and convert it into styled text.
pub fn render(html: &str, base_fg: Color) -> Text<'static> {
    let fragment = Html::parse_fragment(html);
    let mut w = Writer::new(base_fg);
    w.children(fragment.tree.root());
    w.finish()
}

struct Writer {
    text: Text<'static>,
    line: Vec<Span<'static>>,
    base_fg: Color,
    styles: Vec<Style>,
    /// None = unordered, Some(n) = next number of an ordered list.
    lists: Vec<Option<u64>>,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            line: vec![],
            base_fg,
            styles: vec![],
            lists: vec![],
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn with_style(&mut self, patch: Style, node: NodeRef<'_, Node>) {
        let style = self.style().patch(patch);
        self.styles.push(style);
        self.children(node);
        self.styles.pop();
    }

    fn children(&mut self, node: NodeRef<'_, Node>) {
        for child in node.children() {
            self.node(child);
        }
    }

    fn node(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Text(t) => self.push_text(t),
            Node::Element(el) => self.element(el.name(), el.attr("href"), node),
            _ => {}
        }
    }

    fn element(&mut self, name: &str, href: Option<&str>, node: NodeRef<'_, Node>) {
        if DROPPED.contains(&name) {
            return;
        }
        match name {
            "br" => self.flush_line(),
            "p" | "div" | "section" | "article" | "blockquote" | "pre" => {
                self.start_block();
                self.children(node);
                self.flush_line();
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.start_block();
                self.with_style(
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    node,
                );
                self.flush_line();
            }
            "b" | "strong" => self.with_style(Style::default().add_modifier(Modifier::BOLD), node),
            "i" | "em" | "cite" => {
                self.with_style(Style::default().add_modifier(Modifier::ITALIC), node)
            }
            "u" | "ins" => {
                self.with_style(Style::default().add_modifier(Modifier::UNDERLINED), node)
            }
            "s" | "strike" | "del" => {
                self.with_style(Style::default().add_modifier(Modifier::CROSSED_OUT), node)
            }
            "code" => self.with_style(Style::default().fg(Color::Yellow), node),
            "ul" | "ol" => {
                self.start_block();
                self.lists.push((name == "ol").then_some(1));
                self.children(node);
                self.lists.pop();
                self.flush_line();
            }
            "li" => {
                self.flush_line();
                let depth = self.lists.len().max(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{n}. ");
                        *n += 1;
                        m
                    }
                    _ => "• ".to_string(),
                };
                let prefix = format!("{}{}", "  ".repeat(depth - 1), marker);
                self.line.push(Span::styled(prefix, Style::default().fg(Color::DarkGray)));
                self.children(node);
                self.flush_line();
            }
            "a" => {
                self.with_style(
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
                    node,
                );
                if let Some(url) = href.map(str::trim).filter(|u| is_safe_link(u)) {
                    self.line.push(Span::styled(
                        format!(" ({url})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => self.children(node),
        }
    }

    /// Appends text with HTML whitespace collapsing.
    fn push_text(&mut self, raw: &str) {
        let mut prev_space = self.line.is_empty()
            || self.line.last().is_some_and(|s| s.content.ends_with(' '));
        let mut collapsed = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c.is_whitespace() {
                if !prev_space {
                    collapsed.push(' ');
                    prev_space = true;
                }
            } else {
                collapsed.push(c);
                prev_space = false;
            }
        }
        if !collapsed.is_empty() {
            self.line.push(Span::styled(collapsed, self.style()));
        }
    }

    fn flush_line(&mut self) {
        if self.line.is_empty() {
            return;
        }
        if let Some(last) = self.line.last_mut() {
            let trimmed = last.content.trim_end().to_string();
            last.content = Cow::Owned(trimmed);
        }
        self.text.lines.push(Line::from(std::mem::take(&mut self.line)));
    }

    /// Block elements are separated from preceding content by one blank line.
    fn start_block(&mut self) {
        self.flush_line();
        if self.text.lines.last().is_some_and(|l| l.width() > 0) {
            self.text.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush_line();
        while self.text.lines.last().is_some_and(|l| l.width() == 0) {
            self.text.lines.pop();
        }
        self.text
    }
}

fn is_safe_link(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    SAFE_LINK_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}
