//! Session error types.

use super::session::SessionId;

/// Errors from the session store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No live session with this id
    #[error("session {0} not found or expired")]
    NotFound(SessionId),

    /// Id is not a valid session identifier
    #[error("invalid session id: {0:?}")]
    InvalidId(String),
}
