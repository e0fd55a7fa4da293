//! Property-based tests for the reply pipeline
//!
//! - Classification is deterministic and total
//! - Priority order decides replies matching several signatures
//! - Flight listings always offer exactly five selections
//! - Extraction never panics on arbitrary text

use super::classify::{classify, ConversationPhase};
use super::extract::extract;
use super::hint::{hint_for, DEFAULT_HINT};
use super::render::{quick_replies, render};
use super::markers;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_phase() -> impl Strategy<Value = ConversationPhase> {
    prop_oneof![
        Just(ConversationPhase::FlightOptions),
        Just(ConversationPhase::ConfirmationRequest),
        Just(ConversationPhase::EditRequest),
        Just(ConversationPhase::BookingSuccess),
        Just(ConversationPhase::Generic),
    ]
}

/// Filler text that cannot accidentally contain a marker
fn arb_filler() -> impl Strategy<Value = String> {
    "[a-z0-9 .,:¥\n]{0,60}"
}

fn arb_marker() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(markers::OPTION_LISTING),
        Just(markers::SELECT_FLIGHT),
        Just(markers::CONFIRM_BOOKING),
        Just(markers::EDIT_REQUEST),
        Just(markers::EDIT_COMPLETE),
        Just(markers::EDIT_GUIDANCE),
        Just(markers::BOOKING_SUCCESS),
        Just(markers::PRICE),
        Just(markers::FLIGHT_SECTION),
        Just(markers::PASSENGER_SECTION),
        Just("Option 1:"),
        Just("\n\n"),
    ]
}

/// Reply text mixing filler with backend markers
fn arb_reply() -> impl Strategy<Value = String> {
    proptest::collection::vec((arb_filler(), arb_marker()), 0..6).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(filler, marker)| format!("{filler}{marker}"))
            .collect()
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_classify_is_deterministic(text in arb_reply()) {
        prop_assert_eq!(classify(&text), classify(&text));
    }

    #[test]
    fn prop_filler_alone_is_generic(text in arb_filler()) {
        prop_assert_eq!(classify(&text), ConversationPhase::Generic);
    }

    #[test]
    fn prop_flight_options_wins_over_everything(
        prefix in arb_reply(),
        suffix in arb_reply(),
    ) {
        let text = format!(
            "{prefix}{}{}{}{suffix}",
            markers::CONFIRM_BOOKING,
            markers::OPTION_LISTING,
            markers::SELECT_FLIGHT,
        );
        prop_assert_eq!(classify(&text), ConversationPhase::FlightOptions);
    }

    #[test]
    fn prop_confirmation_wins_over_edit_and_success(filler in arb_filler()) {
        let text = format!(
            "{}{filler}{}{}{}",
            markers::EDIT_REQUEST,
            markers::EDIT_COMPLETE,
            markers::BOOKING_SUCCESS,
            markers::CONFIRM_BOOKING,
        );
        prop_assert_eq!(classify(&text), ConversationPhase::ConfirmationRequest);
    }

    #[test]
    fn prop_flight_listing_offers_five_selections(text in arb_reply()) {
        let phase = ConversationPhase::FlightOptions;
        let view = render(phase, &extract(phase, &text));
        let payloads: Vec<String> = view.actions.iter().map(|a| a.payload.clone()).collect();
        prop_assert_eq!(payloads, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn prop_extraction_is_total(phase in arb_phase(), text in arb_reply()) {
        let extraction = extract(phase, &text);
        prop_assert_eq!(extraction.phase(), phase);
        let view = render(phase, &extraction);
        prop_assert_eq!(view.actions, quick_replies(phase));
    }

    #[test]
    fn prop_hint_ignores_extraction(text in arb_reply()) {
        let phase = classify(&text);
        let hint = hint_for(phase);
        prop_assert!(!hint.is_empty());
        if matches!(phase, ConversationPhase::Generic | ConversationPhase::BookingSuccess) {
            prop_assert_eq!(hint, DEFAULT_HINT);
        }
    }
}
