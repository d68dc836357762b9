use thiserror::Error;

/// Transport-level failures. Each variant carries a message that is safe to
/// show to the user.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
}

impl ClientError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::ClientError;

    #[test]
    fn display_prefixes_the_error_kind() {
        let err = ClientError::Timeout("Request timed out. Please try again.".to_string());
        assert_eq!(err.to_string(), "Timeout: Request timed out. Please try again.");
        assert!(err.is_timeout());

        let err = ClientError::Parse("Failed to decode response: eof".to_string());
        assert_eq!(
            err.to_string(),
            "Response error: Failed to decode response: eof"
        );
        assert!(!err.is_timeout());
    }
}
