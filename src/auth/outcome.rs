//! Submission outcomes and the text shown in a form's display region.

use super::{types::SessionToken, validation::ValidationError};
use crate::client::ClientError;
use thiserror::Error;

/// Result of `POST /login/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(SessionToken),
    Rejected,
    TransportError(ClientError),
}

/// Result of `POST /users/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created,
    UsernameTaken,
    /// The `response` field held something else; the raw value is kept for logs.
    ServerRejected(String),
    TransportError(ClientError),
}

/// Every way a form attempt can fail. `Display` is the user-facing message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid username or password")]
    AuthRejected,
    #[error("Username already exists")]
    RegistrationConflict,
    #[error("Server error")]
    ServerRejected(String),
    #[error("{context}")]
    Transport {
        context: &'static str,
        source: ClientError,
    },
}

impl LoginOutcome {
    /// Collapses the outcome into the token or the error to display.
    ///
    /// # Errors
    /// Returns `AuthRejected` or `Transport` for the non-authenticated cases.
    pub fn into_result(self) -> Result<SessionToken, AuthError> {
        match self {
            Self::Authenticated(token) => Ok(token),
            Self::Rejected => Err(AuthError::AuthRejected),
            Self::TransportError(source) => Err(AuthError::Transport {
                context: "Error while logging in",
                source,
            }),
        }
    }
}

impl RegistrationOutcome {
    /// # Errors
    /// Returns the matching `AuthError` for every case except `Created`.
    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            Self::Created => Ok(()),
            Self::UsernameTaken => Err(AuthError::RegistrationConflict),
            Self::ServerRejected(raw) => Err(AuthError::ServerRejected(raw)),
            Self::TransportError(source) => Err(AuthError::Transport {
                context: "Error while registering",
                source,
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Message rendered into a form's display region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl From<&AuthError> for Notice {
    fn from(err: &AuthError) -> Self {
        Self::error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_outcomes_map_to_messages() {
        let token = SessionToken::new("abc123");
        assert_eq!(
            LoginOutcome::Authenticated(token.clone()).into_result(),
            Ok(token)
        );

        let err = LoginOutcome::Rejected.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Invalid username or password");

        let err = LoginOutcome::TransportError(ClientError::Network("down".to_string()))
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "Error while logging in");
        assert!(matches!(
            err,
            AuthError::Transport {
                source: ClientError::Network(_),
                ..
            }
        ));
    }

    #[test]
    fn registration_outcomes_map_to_messages() {
        assert_eq!(RegistrationOutcome::Created.into_result(), Ok(()));
        assert_eq!(
            RegistrationOutcome::UsernameTaken
                .into_result()
                .unwrap_err()
                .to_string(),
            "Username already exists"
        );
        assert_eq!(
            RegistrationOutcome::ServerRejected("Weird".to_string())
                .into_result()
                .unwrap_err()
                .to_string(),
            "Server error"
        );
        assert_eq!(
            RegistrationOutcome::TransportError(ClientError::Timeout("slow".to_string()))
                .into_result()
                .unwrap_err()
                .to_string(),
            "Error while registering"
        );
    }

    #[test]
    fn validation_errors_render_their_own_message() {
        let err = AuthError::from(ValidationError::PasswordMismatch);
        let notice = Notice::from(&err);
        assert!(notice.is_error());
        assert_eq!(notice.message, "Passwords do not match");
    }
}
