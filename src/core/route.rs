//! Navigation targets. Reader and Login are opaque: this crate only knows
//! how to name them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    BookDetail(String),
    Reader(String),
    Signup,
    Login,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::BookDetail(id) => format!("/book/{id}"),
            Route::Reader(id) => format!("/read/{id}"),
            Route::Signup => "/signup".to_string(),
            Route::Login => "/login".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::BookDetail("42".to_string()).path(), "/book/42");
        assert_eq!(Route::Reader("42".to_string()).path(), "/read/42");
        assert_eq!(Route::Signup.path(), "/signup");
        assert_eq!(Route::Login.path(), "/login");
    }
}
