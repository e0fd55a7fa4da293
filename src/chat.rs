//! Conversation state for one client
//!
//! `ChatController` owns the session, the message log and the input hint,
//! and drives one user message at a time through the transport and the
//! reply pipeline.

mod controller;
mod error;
mod log;
mod message;
mod session;

#[cfg(test)]
mod proptests;

pub use controller::{ChatController, SendOutcome};
pub use error::ChatError;
pub use message::{Message, Role};
pub use session::Session;
