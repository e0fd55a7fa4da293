//! Send pipeline
//!
//! user text -> user message -> pending placeholder -> transport ->
//! classify/extract/render -> placeholder replaced by the reply -> hint.
//! On transport failure the placeholder is replaced by a fixed apology and
//! the reply pipeline is skipped.

use super::error::ChatError;
use super::log::MessageLog;
use super::message::Message;
use super::session::{Session, SessionManager};
use crate::reply::{self, hint, ConversationPhase, QuickReply};
use crate::transport::{BookingInfo, ChatRequest, Transport};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

pub const GREETING: &str =
    "Hello! I'm your flight booking assistant. Where would you like to fly from and to?";

/// Shown in place of a reply when the transport fails
pub const TRANSPORT_FAILURE_REPLY: &str =
    "Sorry, the service is temporarily unavailable. Please try again later.";

/// What a send did to the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing happened
    Ignored,
    /// Reply received and appended
    Completed {
        phase: ConversationPhase,
        booking: Option<BookingInfo>,
    },
    /// Transport failed; apology appended
    Failed { reason: String },
    /// Controller closed before the reply arrived; reply dropped
    Discarded,
}

struct ChatState {
    session: SessionManager,
    log: MessageLog,
    hint: &'static str,
}

/// Owns the session, the message log and the input hint for one client
pub struct ChatController<T: Transport> {
    transport: T,
    state: Mutex<ChatState>,
    shutdown: CancellationToken,
}

impl<T: Transport> ChatController<T> {
    /// New controller with the greeting in its log. No session yet: call
    /// `start_session` before sending.
    pub fn new(transport: T) -> Self {
        let mut log = MessageLog::new();
        log.append(reply_message(GREETING));

        Self {
            transport,
            state: Mutex::new(ChatState {
                session: SessionManager::new(),
                log,
                hint: hint::DEFAULT_HINT,
            }),
            shutdown: CancellationToken::new(),
        }
    }

    /// Create the session (once) and return it
    pub fn start_session(&self) -> Session {
        self.state().session.create_session().clone()
    }

    pub fn session_id(&self) -> Result<String, ChatError> {
        Ok(self.state().session.get_session()?.id().to_string())
    }

    /// Placeholder for the next input
    pub fn hint(&self) -> &'static str {
        self.state().hint
    }

    /// Snapshot of the log in display order
    pub fn messages(&self) -> Vec<Message> {
        self.state().log.all().cloned().collect()
    }

    /// Run `f` against the log without copying it
    pub fn with_log<R>(&self, f: impl FnOnce(&MessageLog) -> R) -> R {
        f(&self.state().log)
    }

    /// Quick replies offered by the latest assistant reply
    pub fn latest_actions(&self) -> Vec<QuickReply> {
        self.state().log.latest_actions().to_vec()
    }

    /// Tear down: replies still in flight are dropped without touching the log.
    ///
    /// Cancels under the state lock, so once this returns no send can
    /// mutate the log.
    pub fn close(&self) {
        let _state = self.state();
        self.shutdown.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Resubmit a quick reply's payload through the normal send path
    pub async fn invoke(&self, action: &QuickReply) -> Result<SendOutcome, ChatError> {
        tracing::debug!(label = %action.label, payload = %action.payload, "Quick reply invoked");
        self.send(&action.payload).await
    }

    /// Send user text and wait for the reply.
    ///
    /// Blank input is ignored. Without a session this fails before touching
    /// the log or the network. The user message and the placeholder are in
    /// the log before the request goes out.
    pub async fn send(&self, text: &str) -> Result<SendOutcome, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        let request = {
            let mut state = self.state();
            if self.is_closed() {
                return Ok(SendOutcome::Discarded);
            }
            let session_id = state.session.get_session()?.id().to_string();
            state.log.append(Message::user(text));
            state.log.append(Message::pending());
            ChatRequest::new(text, session_id)
        };

        tracing::debug!(
            session_id = %request.session_id,
            endpoint = %self.transport.endpoint(),
            "Sending chat message"
        );

        let result = tokio::select! {
            biased;
            () = self.shutdown.cancelled() => None,
            result = self.transport.send(&request) => Some(result),
        };
        let Some(result) = result else {
            tracing::debug!(session_id = %request.session_id, "Client closed, dropping reply");
            return Ok(SendOutcome::Discarded);
        };

        let (message, next_hint, outcome) = match result {
            Ok(chat_reply) => {
                let processed = reply::process(&chat_reply.message);
                let booking = chat_reply.created_booking().cloned();
                if let Some(info) = &booking {
                    tracing::info!(
                        session_id = %request.session_id,
                        booking_id = info.id,
                        flight_id = info.flight_id,
                        status = %info.status,
                        "Backend created booking"
                    );
                }
                (
                    Message::received(chat_reply.message, processed.view),
                    Some(processed.hint),
                    SendOutcome::Completed {
                        phase: processed.phase,
                        booking,
                    },
                )
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %request.session_id,
                    kind = e.kind.label(),
                    error = %e,
                    "Chat request failed"
                );
                (
                    Message::failed(TRANSPORT_FAILURE_REPLY, e.message.clone()),
                    None,
                    SendOutcome::Failed { reason: e.message },
                )
            }
        };

        let mut state = self.state();
        if self.is_closed() {
            tracing::debug!(session_id = %request.session_id, "Client closed, dropping reply");
            return Ok(SendOutcome::Discarded);
        }
        state.log.replace_pending(message);
        if let Some(next_hint) = next_hint {
            state.hint = next_hint;
        }
        Ok(outcome)
    }

    fn state(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Assistant message for `text` with its rendered view
fn reply_message(text: &str) -> Message {
    Message::received(text, reply::process(text).view)
}
