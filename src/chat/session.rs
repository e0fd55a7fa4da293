//! Conversation session identity

use super::error::ChatError;
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

const SUFFIX_LEN: usize = 8;

/// The ephemeral identifier scoping one continuous exchange with the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
    created_at: DateTime<Utc>,
}

impl Session {
    fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            id: generate_session_id(created_at),
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Owns the session for one client instance.
///
/// Creation is an explicit step; everything that talks to the backend goes
/// through `get_session` and fails until it has happened.
#[derive(Debug, Default)]
pub struct SessionManager {
    current: Option<Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the session. Once created the id never changes, so later calls
    /// return the existing session.
    pub fn create_session(&mut self) -> &Session {
        self.current.get_or_insert_with(|| {
            let session = Session::new(Utc::now());
            tracing::info!(session_id = %session.id, "Created chat session");
            session
        })
    }

    pub fn get_session(&self) -> Result<&Session, ChatError> {
        self.current.as_ref().ok_or(ChatError::SessionNotInitialized)
    }
}

/// `session_<unix millis>_<random suffix>`. The suffix keeps two clients
/// opened in the same millisecond apart.
fn generate_session_id(now: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("session_{}_{suffix}", now.timestamp_millis())
}
