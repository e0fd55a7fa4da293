//! Property-based tests for the send pipeline
//!
//! Any mix of successful and failed round trips leaves the log with one
//! greeting plus a user message and a reply per send, and no placeholder.

use super::controller::{ChatController, TRANSPORT_FAILURE_REPLY};
use super::log::MessageLog;
use crate::transport::testing::MockTransport;
use crate::transport::TransportError;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Turn {
    Reply(String),
    Fail(String),
}

fn arb_turn() -> impl Strategy<Value = Turn> {
    prop_oneof![
        3 => prop_oneof![
            Just("Where would you like to go?".to_string()),
            Just("Here are your options.\nOption 1: CA1501\nPrice ¥500\nPlease select a flight number.".to_string()),
            Just("Please confirm your booking information:\n\nFlight Information: CA1501\n\nPassenger Information: John".to_string()),
            Just("Please tell me what you would like to modify.".to_string()),
            Just("Booking successful!".to_string()),
        ]
        .prop_map(Turn::Reply),
        1 => "[a-z ]{1,20}".prop_map(Turn::Fail),
    ]
}

fn arb_input() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,12}( [a-z0-9]{1,12}){0,3}"
}

fn run(turns: &[(String, Turn)]) -> ChatController<MockTransport> {
    let mock = MockTransport::new();
    for (_, turn) in turns {
        match turn {
            Turn::Reply(text) => mock.queue_text(text),
            Turn::Fail(reason) => mock.queue_error(TransportError::network(reason.clone())),
        }
    }

    let controller = ChatController::new(mock);
    controller.start_session();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    rt.block_on(async {
        for (input, _) in turns {
            controller.send(input).await.unwrap();
        }
    });
    controller
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_log_grows_by_two_per_send(
        turns in proptest::collection::vec((arb_input(), arb_turn()), 0..8)
    ) {
        let controller = run(&turns);
        prop_assert_eq!(controller.messages().len(), 2 * turns.len() + 1);
        prop_assert_eq!(controller.with_log(MessageLog::pending_count), 0);
    }

    #[test]
    fn prop_sequence_ids_increase(
        turns in proptest::collection::vec((arb_input(), arb_turn()), 1..8)
    ) {
        let controller = run(&turns);
        let ids: Vec<u64> = controller.messages().iter().map(|m| m.sequence_id).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_failures_keep_text_out_of_pipeline(
        turns in proptest::collection::vec((arb_input(), arb_turn()), 1..8)
    ) {
        let controller = run(&turns);
        let messages = controller.messages();
        for (i, (input, turn)) in turns.iter().enumerate() {
            let user = &messages[2 * i + 1];
            let reply = &messages[2 * i + 2];
            prop_assert_eq!(&user.raw_content, input);
            match turn {
                Turn::Reply(text) => {
                    prop_assert_eq!(&reply.raw_content, text);
                    prop_assert!(reply.phase().is_some());
                }
                Turn::Fail(_) => {
                    prop_assert_eq!(reply.raw_content.as_str(), TRANSPORT_FAILURE_REPLY);
                    prop_assert!(reply.phase().is_none());
                }
            }
        }
    }
}
