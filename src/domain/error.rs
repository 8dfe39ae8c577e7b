use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Provider error: {message}")]
    Provider {
        message: String,
        status: Option<u16>,
        payload: Option<String>,
    },

    #[error("Malformed model output: {reason}")]
    MalformedOutput { reason: String, raw: String },

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            status: None,
            payload: None,
        }
    }

    pub fn provider_with_status(
        message: impl Into<String>,
        status: u16,
        payload: impl Into<String>,
    ) -> Self {
        Self::Provider {
            message: message.into(),
            status: Some(status),
            payload: Some(payload.into()),
        }
    }

    pub fn malformed_output(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedOutput {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    pub fn session_not_found(session_id: impl Into<String>) -> Self {
        Self::SessionNotFound(session_id.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }

    pub fn is_malformed_output(&self) -> bool {
        matches!(self, Self::MalformedOutput { .. })
    }

    pub fn is_session_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound(_))
    }

    /// The raw model text attached to a malformed-output failure, if any.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::MalformedOutput { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
