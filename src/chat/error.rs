//! Chat errors

use thiserror::Error;

/// Errors returned by chat operations. Transport failures are not errors
/// here: they end up in the log as a failed reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Session not initialized, please restart the client")]
    SessionNotInitialized,
}
