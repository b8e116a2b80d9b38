use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Rejected before or by the server because the entry is incomplete
    #[error("Validation error: {0}")]
    Validation(String),

    /// Token missing or expired; the host shell sends the user to login
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    /// Entry belongs to another user
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    /// A manual save is already running for this session
    #[error("A save is already in progress")]
    SaveInProgress,

    /// The editor was closed before the save started
    #[error("The editor session is closed")]
    SessionClosed,
}

impl ClientError {
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 | 422 => ClientError::Validation(message),
            401 => ClientError::Unauthenticated(message),
            403 => ClientError::Forbidden(message),
            404 => ClientError::NotFound(message),
            _ => ClientError::Server { status, message },
        }
    }

    /// Cross-user or expired access; surfaced upstream as a redirect
    pub fn is_authorization(&self) -> bool {
        matches!(self, ClientError::Unauthenticated(_) | ClientError::Forbidden(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ClientError::from_status(status.as_u16(), err.to_string()),
            None => ClientError::Network(err.to_string()),
        }
    }
}
