use serde::{Deserialize, Serialize};

/// A book as served by `GET /api/books/{id}`.
///
/// Every field falls back to an empty string so a sparse payload still
/// renders instead of failing the whole screen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Book {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    /// Rich-text description (HTML). Must go through `tui::html` before display.
    #[serde(default)]
    pub description: String,
    /// Display string, e.g. "$9.99". Never parsed.
    #[serde(default)]
    pub price: String,
    #[serde(rename = "amazonLink", default)]
    pub purchase_link: String,
    /// Reference to the readable content (a PDF location on the server).
    #[serde(rename = "pdf", default)]
    pub reader_content: String,
}

impl Book {
    /// The author line shown under the title.
    pub fn byline(&self) -> String {
        format!("by {}", self.author)
    }
}

/// Body of `POST /api/auth/signup`. The password confirmation stays local.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Error payload the server may attach to a failed signup.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_deserializes_server_field_names() {
        let json = r#"{
            "_id": "42",
            "image": "https://img.example/dune.jpg",
            "title": "Dune",
            "author": "Herbert",
            "description": "<p>Spice.</p>",
            "price": "$9.99",
            "amazonLink": "https://amazon.example/dune",
            "pdf": "books/dune.pdf"
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, "42");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.purchase_link, "https://amazon.example/dune");
        assert_eq!(book.reader_content, "books/dune.pdf");
    }

    #[test]
    fn test_sparse_book_uses_defaults() {
        let book: Book =
            serde_json::from_str(r#"{"_id":"42","title":"Dune","author":"Herbert"}"#).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.byline(), "by Herbert");
        assert!(book.description.is_empty());
        assert!(book.price.is_empty());
    }

    #[test]
    fn test_signup_request_has_no_confirmation_field() {
        let req = SignupRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("name"));
        assert!(obj.contains_key("email"));
        assert!(obj.contains_key("password"));
    }

    #[test]
    fn test_error_body_message_is_optional() {
        let with: ErrorBody = serde_json::from_str(r#"{"message":"Email already exists"}"#).unwrap();
        assert_eq!(with.message.as_deref(), Some("Email already exists"));
        let without: ErrorBody = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert!(without.message.is_none());
    }
}
