//! Reply classification
//!
//! Maps raw assistant text onto the conversation phase it belongs to.

use super::markers;
use serde::{Deserialize, Serialize};

/// Conversation phase of an assistant reply
///
/// Never stored: recomputed from the reply text whenever it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    /// A numbered list of flights to choose from
    FlightOptions,
    /// Booking summary awaiting confirm/modify
    ConfirmationRequest,
    /// Current booking details plus instructions for changing them
    EditRequest,
    BookingSuccess,
    /// Anything else
    Generic,
}

impl ConversationPhase {
    /// All phases in classification priority order. The first phase whose
    /// signature matches wins, so reordering changes behavior for replies
    /// that match more than one signature.
    pub const PRIORITY: [ConversationPhase; 5] = [
        ConversationPhase::FlightOptions,
        ConversationPhase::ConfirmationRequest,
        ConversationPhase::EditRequest,
        ConversationPhase::BookingSuccess,
        ConversationPhase::Generic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FlightOptions => "flight_options",
            Self::ConfirmationRequest => "confirmation_request",
            Self::EditRequest => "edit_request",
            Self::BookingSuccess => "booking_success",
            Self::Generic => "generic",
        }
    }

    /// Whether `text` carries this phase's signature
    fn matches(self, text: &str) -> bool {
        match self {
            Self::FlightOptions => {
                text.contains(markers::OPTION_LISTING) && text.contains(markers::SELECT_FLIGHT)
            }
            Self::ConfirmationRequest => text.contains(markers::CONFIRM_BOOKING),
            Self::EditRequest => {
                text.contains(markers::EDIT_REQUEST) && text.contains(markers::EDIT_COMPLETE)
            }
            Self::BookingSuccess => text.contains(markers::BOOKING_SUCCESS),
            Self::Generic => true,
        }
    }
}

/// Classify an assistant reply. Pure and deterministic; never fails.
pub fn classify(text: &str) -> ConversationPhase {
    ConversationPhase::PRIORITY
        .into_iter()
        .find(|phase| phase.matches(text))
        .unwrap_or(ConversationPhase::Generic)
}
