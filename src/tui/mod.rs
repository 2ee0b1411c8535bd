//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the screens,
//! translates keyboard events into `core::Action` values, and runs the
//! `Effect`s that `update()` asks for.
//!
//! ## Effects
//!
//! Each I/O effect becomes one tokio task whose result is sent back to the
//! loop as an `Action` over a std channel. A supervising task watches the
//! worker, so an answer always arrives even if the worker panics; the signup
//! in-flight flag can therefore never get stuck. Requests have no timeout and
//! are never cancelled.
//!
//! ## Redraw Strategy
//!
//! The loop redraws only after an event or a background result, and
//! otherwise sleeps in `poll` for up to 250ms.

mod component;
mod components;
mod event;
pub mod html;
mod ui;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{ApiError, EntitlementCheck, HttpStoreClient, StoreApi, UnverifiedEntitlements};
use crate::core::action::{Action, Effect, update};
use crate::core::config::{ResolvedConfig, StartScreen};
use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{SignupEvent, SignupFormState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core logic)
pub struct TuiState {
    pub signup_form: SignupFormState,
    /// Scroll offset into the book description
    pub description_scroll: u16,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            signup_form: SignupFormState::new(),
            description_scroll: 0,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Build the storefront client from the resolved base URL.
pub fn build_store(config: &ResolvedConfig) -> Result<Arc<dyn StoreApi>, ApiError> {
    Ok(Arc::new(HttpStoreClient::new(&config.api_base_url)?))
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let store = build_store(&config).map_err(io::Error::other)?;
    let entitlements: Arc<dyn EntitlementCheck> = Arc::new(UnverifiedEntitlements);
    let mut app = App::new(store, entitlements);
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let initial = match &config.start_screen {
        StartScreen::Book(book_id) => Action::OpenBook(book_id.clone()),
        StartScreen::Signup => Action::OpenSignup,
    };
    info!("Starting on {:?}", config.start_screen);
    let effect = update(&mut app, initial);
    dispatch(effect, &app, &mut tui, &tx);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let mut needs_redraw = true;

    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = action_for_event(&app, &mut tui, &event) else {
                continue;
            };
            debug!("Event {:?} -> {:?}", event, action);
            let effect = update(&mut app, action);
            if effect == Effect::Quit {
                should_quit = true;
                break;
            }
            dispatch(effect, &app, &mut tui, &tx);
        }

        if should_quit {
            break Ok(());
        }

        // Results from background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            dispatch(effect, &app, &mut tui, &tx);
        }
    };

    ratatui::restore();
    info!("Bookstall shutting down");
    result
}

/// Translate a terminal event into a core action for the screen on display.
/// Focus and scroll changes are applied to `tui` directly.
fn action_for_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    if matches!(event, TuiEvent::Resize) {
        return None;
    }

    // An open notice swallows input until acknowledged
    if app.notice.is_some() {
        return match event {
            TuiEvent::Submit | TuiEvent::Escape | TuiEvent::InputChar(_) => {
                Some(Action::DismissNotice)
            }
            _ => None,
        };
    }

    match &app.route {
        Route::BookDetail(_) => match event {
            TuiEvent::Submit => Some(Action::StartReading),
            TuiEvent::Reload => Some(Action::Reload),
            TuiEvent::Escape => Some(Action::Back),
            TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::InputChar('s') => Some(Action::OpenSignup),
            TuiEvent::ScrollUp => {
                tui.description_scroll = tui.description_scroll.saturating_sub(1);
                None
            }
            TuiEvent::ScrollDown => {
                tui.description_scroll = tui.description_scroll.saturating_add(1);
                None
            }
            _ => None,
        },
        Route::Signup => {
            // Sync props before the form interprets the event
            tui.signup_form.values = app.signup.form.clone();
            tui.signup_form.in_flight = app.signup.in_flight;
            match tui.signup_form.handle_event(event)? {
                SignupEvent::Changed(field, value) => Some(Action::SetField(field, value)),
                SignupEvent::Submit => Some(Action::SubmitSignup),
                SignupEvent::SignIn => Some(Action::GoToLogin),
                SignupEvent::Back => Some(Action::Back),
            }
        }
        Route::Reader(_) | Route::Login => match event {
            TuiEvent::Escape => Some(Action::Back),
            TuiEvent::InputChar('q') => Some(Action::Quit),
            _ => None,
        },
    }
}

/// Keep presentation state in step with an effect and start its I/O.
fn dispatch(effect: Effect, app: &App, tui: &mut TuiState, tx: &mpsc::Sender<Action>) {
    // Keep the rendered form in step with core after every update
    tui.signup_form.values = app.signup.form.clone();
    tui.signup_form.in_flight = app.signup.in_flight;

    match effect {
        Effect::None | Effect::Quit => {}
        effect => {
            if matches!(effect, Effect::FetchBook(_)) {
                tui.description_scroll = 0;
            }
            spawn_effect(effect, app.store.clone(), app.entitlements.clone(), tx.clone());
        }
    }
}

fn spawn_effect(
    effect: Effect,
    store: Arc<dyn StoreApi>,
    entitlements: Arc<dyn EntitlementCheck>,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning effect: {}", effect_name(&effect));
    let fallback = effect.clone();
    let worker =
        tokio::spawn(async move { perform(effect, store.as_ref(), entitlements.as_ref()).await });

    tokio::spawn(async move {
        let action = match worker.await {
            Ok(action) => action,
            Err(e) => {
                warn!("Effect task {} died: {}", effect_name(&fallback), e);
                failed_action(fallback, ApiError::Network(format!("request task failed: {e}")))
            }
        };
        if let Some(action) = action
            && tx.send(action).is_err()
        {
            warn!("Failed to send effect result: receiver dropped");
        }
    });
}

/// Run one effect against the collaborators and describe its outcome.
async fn perform(
    effect: Effect,
    store: &dyn StoreApi,
    entitlements: &dyn EntitlementCheck,
) -> Option<Action> {
    match effect {
        Effect::FetchBook(token) => {
            let result = store.fetch_book(&token.book_id).await;
            Some(Action::BookLoaded { token, result })
        }
        Effect::Signup(request) => Some(Action::SignupFinished(store.signup(&request).await)),
        Effect::CheckEntitlement { book_id } => {
            let result = entitlements.owns(&book_id).await;
            Some(Action::EntitlementResolved { book_id, result })
        }
        Effect::None | Effect::Quit => None,
    }
}

/// The action reporting `error` for an effect whose task never answered.
fn failed_action(effect: Effect, error: ApiError) -> Option<Action> {
    match effect {
        Effect::FetchBook(token) => Some(Action::BookLoaded {
            token,
            result: Err(error),
        }),
        Effect::Signup(_) => Some(Action::SignupFinished(Err(error))),
        Effect::CheckEntitlement { book_id } => Some(Action::EntitlementResolved {
            book_id,
            result: Err(error),
        }),
        Effect::None | Effect::Quit => None,
    }
}

fn effect_name(effect: &Effect) -> &'static str {
    match effect {
        Effect::None => "none",
        Effect::FetchBook(_) => "fetch_book",
        Effect::Signup(_) => "signup",
        Effect::CheckEntitlement { .. } => "check_entitlement",
        Effect::Quit => "quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Book, SignupRequest};
    use crate::core::book_detail::RequestToken;
    use crate::core::signup::Field;
    use crate::core::state::Notice;
    use crate::test_support::{FixedEntitlements, ScriptedStore, test_app};

    fn request() -> SignupRequest {
        SignupRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_perform_fetch_book_tags_result_with_token() {
        let book = Book {
            id: "42".to_string(),
            ..Default::default()
        };
        let store = ScriptedStore::new(Ok(Some(book.clone())), Ok(()));
        let token = RequestToken {
            generation: 3,
            book_id: "42".to_string(),
        };
        let action = perform(
            Effect::FetchBook(token.clone()),
            &store,
            &FixedEntitlements(Ok(true)),
        )
        .await;
        match action {
            Some(Action::BookLoaded { token: t, result }) => {
                assert_eq!(t, token);
                assert_eq!(result, Ok(Some(book)));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(store.calls(), vec!["fetch_book 42"]);
    }

    #[tokio::test]
    async fn test_perform_signup_reports_server_failure() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Email already exists".to_string()),
        };
        let store = ScriptedStore::new(Ok(None), Err(err.clone()));
        let action = perform(Effect::Signup(request()), &store, &FixedEntitlements(Ok(true))).await;
        assert!(matches!(action, Some(Action::SignupFinished(Err(e))) if e == err));
    }

    #[tokio::test]
    async fn test_perform_entitlement_check() {
        let store = ScriptedStore::new(Ok(None), Ok(()));
        let action = perform(
            Effect::CheckEntitlement {
                book_id: "42".to_string(),
            },
            &store,
            &FixedEntitlements(Ok(false)),
        )
        .await;
        assert!(matches!(
            action,
            Some(Action::EntitlementResolved { ref book_id, result: Ok(false) }) if book_id == "42"
        ));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_entitlement_check_becomes_notice() {
        let mut app = test_app();
        let token = match update(&mut app, Action::OpenBook("42".to_string())) {
            Effect::FetchBook(token) => token,
            other => panic!("unexpected {other:?}"),
        };
        let book = Book {
            id: "42".to_string(),
            ..Default::default()
        };
        update(&mut app, Action::BookLoaded { token, result: Ok(Some(book)) });

        let store = ScriptedStore::new(Ok(None), Ok(()));
        let entitlements = FixedEntitlements(Err(ApiError::Network("offline".to_string())));
        let effect = update(&mut app, Action::StartReading);
        let action = perform(effect, &store, &entitlements).await.unwrap();
        update(&mut app, action);

        assert_eq!(app.route, Route::BookDetail("42".to_string()));
        let text = app.notice.map(|n| n.text).unwrap_or_default();
        assert!(text.starts_with("Could not verify ownership"), "{text}");
    }

    #[test]
    fn test_failed_signup_task_still_clears_in_flight() {
        let mut app = test_app();
        app.signup.in_flight = true;
        let action = failed_action(
            Effect::Signup(request()),
            ApiError::Network("request task failed".to_string()),
        )
        .unwrap();
        update(&mut app, action);
        assert!(!app.signup.in_flight);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_screen() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert!(matches!(
            action_for_event(&app, &mut tui, &TuiEvent::ForceQuit),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_notice_swallows_keys_until_dismissed() {
        let mut app = test_app();
        app.notice = Some(Notice::info("hello"));
        let mut tui = TuiState::new();
        assert!(matches!(
            action_for_event(&app, &mut tui, &TuiEvent::InputChar('x')),
            Some(Action::DismissNotice)
        ));
        assert!(action_for_event(&app, &mut tui, &TuiEvent::NextField).is_none());
    }

    #[test]
    fn test_signup_keystroke_becomes_set_field() {
        let mut app = test_app();
        app.signup.form.name = "Ad".to_string();
        let mut tui = TuiState::new();
        match action_for_event(&app, &mut tui, &TuiEvent::InputChar('a')) {
            Some(Action::SetField(Field::Name, value)) => assert_eq!(value, "Ada"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_enter_on_book_screen_starts_reading() {
        let mut app = test_app();
        update(&mut app, Action::OpenBook("42".to_string()));
        let mut tui = TuiState::new();
        assert!(matches!(
            action_for_event(&app, &mut tui, &TuiEvent::Submit),
            Some(Action::StartReading)
        ));
        assert!(matches!(
            action_for_event(&app, &mut tui, &TuiEvent::InputChar('q')),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_scroll_on_book_screen_stays_local() {
        let mut app = test_app();
        update(&mut app, Action::OpenBook("42".to_string()));
        let mut tui = TuiState::new();
        assert!(action_for_event(&app, &mut tui, &TuiEvent::ScrollDown).is_none());
        assert_eq!(tui.description_scroll, 1);
        action_for_event(&app, &mut tui, &TuiEvent::ScrollUp);
        action_for_event(&app, &mut tui, &TuiEvent::ScrollUp);
        assert_eq!(tui.description_scroll, 0);
    }
}
