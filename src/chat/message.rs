//! Chat message types

use crate::reply::{classify, ConversationPhase, RenderedView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// Lifecycle of a message. A single tag instead of loading/error flags, so
/// a message cannot be both pending and failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MessageStatus {
    /// User input handed to the transport
    Sent,
    /// Placeholder occupying the assistant's turn while a request is outstanding
    Pending,
    /// Apology shown in place of a reply that never arrived
    Failed { reason: String },
    /// Completed assistant reply
    Received,
}

/// One entry in the conversation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Assigned by the log on append; 0 until then
    pub sequence_id: u64,
    pub role: Role,
    pub raw_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<RenderedView>,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub status: MessageStatus,
}

impl Message {
    fn new(
        role: Role,
        raw_content: String,
        view: Option<RenderedView>,
        status: MessageStatus,
    ) -> Self {
        Self {
            sequence_id: 0,
            role,
            raw_content,
            view,
            timestamp: Utc::now(),
            status,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into(), None, MessageStatus::Sent)
    }

    pub fn pending() -> Self {
        Self::new(Role::Assistant, String::new(), None, MessageStatus::Pending)
    }

    pub fn received(text: impl Into<String>, view: RenderedView) -> Self {
        Self::new(Role::Assistant, text.into(), Some(view), MessageStatus::Received)
    }

    pub fn failed(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            Role::Assistant,
            text.into(),
            None,
            MessageStatus::Failed {
                reason: reason.into(),
            },
        )
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, MessageStatus::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, MessageStatus::Failed { .. })
    }

    /// Phase of a completed assistant reply, recomputed from the raw text on
    /// every call. `None` for user input, placeholders and failures.
    pub fn phase(&self) -> Option<ConversationPhase> {
        match (self.role, &self.status) {
            (Role::Assistant, MessageStatus::Received) => Some(classify(&self.raw_content)),
            _ => None,
        }
    }
}
