//! Request DTOs with validation.
//!
//! These checks cover shape only. Length policies that come from
//! configuration are enforced by the auth service.

use serde::{Deserialize, Serialize};
use validator::Validate;

use gatehouse_core::error::AppError;

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Email address, used as the account identifier.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Run `validator` rules and convert failures into a validation error.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), AppError> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_rejects_bad_email() {
        let request = SignUpRequest {
            email: "not-an-email".to_string(),
            name: "Ann".to_string(),
            password: "pw12345678".to_string(),
        };
        let err = validate_request(&request).unwrap_err();
        assert_eq!(err.kind, gatehouse_core::ErrorKind::Validation);
        assert!(err.message.contains("Invalid email address"));
    }

    /// The password length policy guards registration only. At sign-in a
    /// short password is just a wrong password and must fail as such.
    #[test]
    fn test_sign_in_skips_password_length_policy() {
        let short = SignInRequest {
            email: "whatever".to_string(),
            password: "x".to_string(),
        };
        assert!(validate_request(&short).is_ok());

        let empty = SignInRequest {
            email: "a@x.com".to_string(),
            password: String::new(),
        };
        assert!(validate_request(&empty).is_err());
    }
}
