//! Shared error taxonomy for the account service.
//!
//! Every fallible operation in the crate reports one of the variants below so
//! callers can branch exhaustively instead of matching on message strings.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Authentication and store errors.
///
/// `StoreUnavailable` carries the underlying store detail for logging; its
/// `Display` output stays generic so the detail never reaches a client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("User already exists")]
    DuplicateUser,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    Expired,

    #[error("Credential store unavailable")]
    StoreUnavailable(String),
}

impl AuthError {
    /// Internal detail for `StoreUnavailable`, if any. Intended for tracing
    /// output only.
    pub fn store_detail(&self) -> Option<&str> {
        match self {
            AuthError::StoreUnavailable(detail) => Some(detail),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_detail_never_reaches_display() {
        let err = AuthError::StoreUnavailable("connection refused at 10.0.0.1".to_string());
        assert_eq!(err.to_string(), "Credential store unavailable");
        assert_eq!(err.store_detail(), Some("connection refused at 10.0.0.1"));
    }

    #[test]
    fn error_messages() {
        let errors = vec![
            (AuthError::DuplicateUser, "User already exists"),
            (AuthError::UserNotFound, "User not found"),
            (AuthError::InvalidCredentials, "Invalid password"),
            (AuthError::InvalidToken, "Invalid token"),
            (AuthError::Expired, "Token expired"),
        ];

        for (error, expected_msg) in errors {
            assert_eq!(error.to_string(), expected_msg);
        }
    }
}
