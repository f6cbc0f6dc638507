//! Error taxonomy for backend calls and credential persistence.
//!
//! ERROR HANDLING
//! ==============
//! Only `Unauthorized` carries a global side effect (the 401 interceptor has
//! already reset the session by the time a caller sees it). Everything else
//! is the caller's to log or display.

use crate::transport::TransportError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("authentication required")]
    Unauthorized,
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid request body: {0}")]
    Encode(String),
}

impl ApiError {
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// HTTP status the backend answered with, if it answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) | Self::Encode(_) => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::Network(err.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}
