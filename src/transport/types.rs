//! Wire types for the booking backend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /api/chat/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: session_id.into(),
        }
    }
}

/// Response of `POST /api/chat/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    /// Assistant text
    pub message: String,
    #[serde(default)]
    pub booking_created: bool,
    #[serde(default)]
    pub booking_info: Option<BookingInfo>,
}

impl ChatReply {
    /// Plain reply with no booking attached
    #[cfg(test)]
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            booking_created: false,
            booking_info: None,
        }
    }

    /// Booking the backend reports as created by this exchange
    pub fn created_booking(&self) -> Option<&BookingInfo> {
        self.booking_info.as_ref().filter(|_| self.booking_created)
    }
}

/// Summary of a booking created through the chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    pub id: i64,
    pub flight_id: i64,
    pub airline: String,
    #[serde(default)]
    pub passenger_name: Option<String>,
    pub status: String,
}

/// Where the backend's dialogue currently is for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStage {
    Searching,
    Selecting,
    CollectingInfo,
    Confirming,
    Modifying,
    #[serde(other)]
    Unknown,
}

impl BookingStage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Searching => "searching flights",
            Self::Selecting => "selecting a flight",
            Self::CollectingInfo => "collecting passenger details",
            Self::Confirming => "awaiting confirmation",
            Self::Modifying => "modifying the booking",
            Self::Unknown => "unknown",
        }
    }
}

/// Decimal fields arrive as strings or numbers depending on backend settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Text(s) => f.write_str(s),
            Amount::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Flight selected in the pending booking
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectedFlight {
    pub id: i64,
    pub airline: String,
    pub source: String,
    pub destination: String,
    pub date: String,
    pub time: String,
    pub price: Amount,
    #[serde(default)]
    pub duration: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PassengerInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Response of `GET /api/booking-state/?session_id=...`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookingState {
    pub booking_stage: BookingStage,
    pub status: String,
    #[serde(default)]
    pub source_city: Option<String>,
    #[serde(default)]
    pub destination_city: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub flight_info: Option<SelectedFlight>,
    #[serde(default)]
    pub passenger_info: Option<PassengerInfo>,
}
