//! # Account Creation State
//!
//! The signup form, its local validation, and the in-flight flag that
//! keeps a second submission from going out while one is pending.

use std::fmt;

use crate::api::SignupRequest;

pub const MIN_PASSWORD_CHARS: usize = 6;

pub const SIGNUP_SUCCESS_MESSAGE: &str = "Account created successfully";
pub const SIGNUP_FAILED_MESSAGE: &str = "Error creating account";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Your name",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Password again",
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Field::Name => Some("First and last name"),
            Field::Password => Some("At least 6 characters"),
            _ => None,
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

/// Reasons a form is rejected before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    PasswordMismatch,
    PasswordTooShort,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::PasswordMismatch => write!(f, "Passwords do not match"),
            ValidationError::PasswordTooShort => write!(
                f,
                "Password must be at least {MIN_PASSWORD_CHARS} characters long"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Replaces one field. The others are left alone.
    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value;
    }

    /// Checks run in order and stop at the first failure.
    pub fn validate(&self) -> Result<SignupRequest, ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(SignupRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
pub struct SignupState {
    pub form: SignupForm,
    /// A signup request is outstanding; submission is disabled.
    pub in_flight: bool,
}

impl SignupState {
    pub fn submit_label(&self) -> &'static str {
        if self.in_flight {
            "Creating Account..."
        } else {
            "Create your account"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_set_touches_one_field() {
        let mut f = form("secret1", "secret1");
        f.set(Field::Email, "new@example.com".to_string());
        assert_eq!(f.email, "new@example.com");
        assert_eq!(f.name, "Ada Lovelace");
        assert_eq!(f.password, "secret1");
        assert_eq!(f.confirm_password, "secret1");
    }

    #[test]
    fn test_mismatch_is_checked_first() {
        // Both rules fail; the mismatch wins.
        let f = form("abc", "abd");
        assert_eq!(f.validate(), Err(ValidationError::PasswordMismatch));
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }

    #[test]
    fn test_short_passwords_rejected() {
        for len in 0..MIN_PASSWORD_CHARS {
            let pw = "x".repeat(len);
            assert_eq!(
                form(&pw, &pw).validate(),
                Err(ValidationError::PasswordTooShort),
                "length {len}"
            );
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Five characters, ten bytes.
        let pw = "ééééé";
        assert_eq!(form(pw, pw).validate(), Err(ValidationError::PasswordTooShort));
        let pw = "éééééé";
        assert!(form(pw, pw).validate().is_ok());
    }

    #[test]
    fn test_valid_form_builds_request_without_confirmation() {
        let req = form("secret1", "secret1").validate().unwrap();
        assert_eq!(req.name, "Ada Lovelace");
        assert_eq!(req.email, "ada@example.com");
        assert_eq!(req.password, "secret1");
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut f = form("secret1", "secret1");
        f.clear();
        for field in Field::ALL {
            assert_eq!(f.get(field), "");
        }
    }

    #[test]
    fn test_submit_label_tracks_in_flight() {
        let mut state = SignupState::default();
        assert_eq!(state.submit_label(), "Create your account");
        state.in_flight = true;
        assert_eq!(state.submit_label(), "Creating Account...");
    }
}
