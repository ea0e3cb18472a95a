//!
//! # Authentication
//!
//! Bearer-token gate for the todo routes plus the register/login request
//! payloads. Tokens are JWTs signed with `JWT_SECRET`; passwords are stored
//! as bcrypt hashes. The middleware performs a pass/fail capability check
//! before any handler or validation runs.

pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

lazy_static! {
    // local@domain.tld, no whitespace
    static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(regex(path = "EMAIL_REGEX", message = "Please provide a valid email"))]
    pub email: String,
    /// User's password. Only presence is checked at login; the length rule
    /// applies at registration.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name for the new account.
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    /// Email address for the new account.
    #[validate(regex(path = "EMAIL_REGEX", message = "Please provide a valid email"))]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 8 characters long.
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
}

/// Response structure after successful authentication (login or registration).
/// Contains the JWT access token and the ID of the authenticated user.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT (JSON Web Token) for session authentication.
    pub token: String,
    /// The unique identifier of the authenticated user.
    pub user_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "user@gmail.com".to_string(),
            password: "x".to_string(),
        };
        // Any non-empty password is enough to attempt a login
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "usergmail.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());

        let no_tld_login = LoginRequest {
            email: "user@gmail".to_string(),
            password: "password123".to_string(),
        };
        assert!(no_tld_login.validate().is_err());

        let missing_password_login = LoginRequest {
            email: "user@gmail.com".to_string(),
            password: "".to_string(),
        };
        assert!(missing_password_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            name: "Manoj Kumar".to_string(),
            email: "user@gmail.com".to_string(),
            password: "user@7654".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_email_register = RegisterRequest {
            name: "Manoj Kumar".to_string(),
            email: "not an email".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_register.validate().is_err());

        // Registration enforces the 8-character minimum that login does not
        let short_password_register = RegisterRequest {
            name: "Manoj Kumar".to_string(),
            email: "user@gmail.com".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password_register.validate().is_err());

        let empty_name_register = RegisterRequest {
            name: "".to_string(),
            email: "user@gmail.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(empty_name_register.validate().is_err());
    }
}
