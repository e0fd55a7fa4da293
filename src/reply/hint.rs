//! Input placeholder selection

use super::ConversationPhase;

pub const FLIGHT_OPTIONS_HINT: &str = "Enter the flight option number, e.g. \"1\"";
pub const CONFIRMATION_HINT: &str =
    "Type \"confirm\" to complete the booking, or \"modify\" to change details";
pub const EDIT_HINT: &str = "Provide the details you want to change, or type \"confirm\" to finish";
pub const DEFAULT_HINT: &str =
    "Ask a question, e.g. \"I want to book a flight from Beijing to Shanghai\"";

/// Placeholder for the next input after a reply in `phase`
pub fn hint_for(phase: ConversationPhase) -> &'static str {
    match phase {
        ConversationPhase::FlightOptions => FLIGHT_OPTIONS_HINT,
        ConversationPhase::ConfirmationRequest => CONFIRMATION_HINT,
        ConversationPhase::EditRequest => EDIT_HINT,
        ConversationPhase::BookingSuccess | ConversationPhase::Generic => DEFAULT_HINT,
    }
}
