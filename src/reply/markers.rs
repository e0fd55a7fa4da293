//! Marker strings emitted by the booking dialogue backend
//!
//! Matching is case-sensitive substring matching. Keep these in sync with
//! the backend's reply templates.

use regex::Regex;
use std::sync::LazyLock;

/// Present in any flight option listing
pub const OPTION_LISTING: &str = "Option";

/// Instruction closing a flight option listing
pub const SELECT_FLIGHT: &str = "Please select a flight number";

/// Header of the booking summary awaiting confirmation
pub const CONFIRM_BOOKING: &str = "Please confirm your booking information";

/// Opening of the edit prompt
pub const EDIT_REQUEST: &str = "Please tell me what you would like to modify";

/// Closing instruction of the edit prompt
pub const EDIT_COMPLETE: &str = "When you have finished modifying";

/// First line of the guidance block inside the edit prompt
pub const EDIT_GUIDANCE: &str = "You can modify information by";

pub const BOOKING_SUCCESS: &str = "Booking successful";

/// Lines carrying a fare are emphasized
pub const PRICE: &str = "Price";

pub const FLIGHT_SECTION: &str = "Flight Information";
pub const PASSENGER_SECTION: &str = "Passenger Information";

/// Separates paragraphs (sections) in backend replies
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// Start of one option block, e.g. `Option 3:`
pub static OPTION_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Option \d+:").expect("option boundary pattern is valid"));
