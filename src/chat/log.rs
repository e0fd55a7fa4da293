//! Ordered conversation log
//!
//! Insertion order is display order. The only removal the log ever performs
//! is dropping the single pending placeholder.

use super::message::{Message, Role};
use crate::reply::QuickReply;

#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
    next_sequence_id: u64,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` at the end and return it with its sequence id.
    ///
    /// A new pending placeholder supersedes any existing one, so at most one
    /// pending entry exists at any time.
    pub fn append(&mut self, mut message: Message) -> &Message {
        if message.is_pending() {
            self.remove_pending();
        }
        self.next_sequence_id += 1;
        message.sequence_id = self.next_sequence_id;
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Drop the pending placeholder, if any, and append `message` in its
    /// place. Works the same when nothing is pending.
    pub fn replace_pending(&mut self, message: Message) -> &Message {
        if !self.remove_pending() {
            tracing::debug!("No pending placeholder to replace");
        }
        self.append(message)
    }

    fn remove_pending(&mut self) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| !m.is_pending());
        self.messages.len() != before
    }

    /// Messages in display order. Cheap to clone and restart; never mutates.
    pub fn all(
        &self,
    ) -> impl DoubleEndedIterator<Item = &Message> + ExactSizeIterator + Clone + '_ {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_pending()).count()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Quick replies of the most recent completed assistant reply
    pub fn latest_actions(&self) -> &[QuickReply] {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant && !m.is_pending())
            .and_then(|m| m.view.as_ref())
            .map(|view| view.actions.as_slice())
            .unwrap_or_default()
    }
}
