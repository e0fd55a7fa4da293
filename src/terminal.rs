//! Line-oriented terminal rendering and input parsing for the chat shell

use crate::chat::{Message, Role, Session};
use crate::reply::{ConversationPhase, GroupTone, QuickReply, Segment};
use crate::transport::{BookingInfo, BookingState};
use crossterm::style::{Color, Stylize};

pub const HELP: &str = "\
Type a message and press Enter.
  /N           invoke quick reply N
  /state       show the backend's booking state
  /transcript  dump the conversation as JSON
  /help        show this help
  /quit        exit";

const INDENT: &str = "  ";
const GROUP_BAR: &str = "│ ";

#[derive(Debug, Clone, Copy)]
struct Theme {
    user: Color,
    assistant: Color,
    muted: Color,
    emphasis: Color,
    danger: Color,
    info: Color,
    warning: Color,
    success: Color,
}

impl Theme {
    fn default_dark() -> Self {
        Self {
            user: Color::Blue,
            assistant: Color::Cyan,
            muted: Color::DarkGrey,
            emphasis: Color::Red,
            danger: Color::Red,
            info: Color::Blue,
            warning: Color::Yellow,
            success: Color::Green,
        }
    }

    fn tone(&self, tone: GroupTone) -> Color {
        match tone {
            GroupTone::Neutral => self.muted,
            GroupTone::Info => self.info,
            GroupTone::Warning => self.warning,
            GroupTone::Success => self.success,
        }
    }
}

/// Formats log entries as terminal lines. Without styling the output is
/// plain text.
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    theme: Option<Theme>,
}

impl TerminalRenderer {
    pub fn new(styled: bool) -> Self {
        Self {
            theme: styled.then(Theme::default_dark),
        }
    }

    pub fn message(&self, message: &Message) -> String {
        let speaker = match message.role {
            Role::User => {
                return format!("{} {}", self.paint("you>", |t| t.user, true), message.raw_content);
            }
            Role::Assistant => self.paint("assistant>", |t| t.assistant, true),
        };
        if message.is_pending() {
            return format!("{speaker} {}", self.paint("...", |t| t.muted, false));
        }
        if message.is_failed() {
            return format!("{speaker} {}", self.paint(&message.raw_content, |t| t.danger, false));
        }

        let header = match message.phase().and_then(phase_caption) {
            Some(caption) => format!("{speaker} {}", self.paint(caption, |t| t.muted, false)),
            None => speaker,
        };
        let mut lines = vec![header];
        match &message.view {
            Some(view) => {
                for segment in &view.segments {
                    self.segment(segment, INDENT, &mut lines);
                }
                if !view.actions.is_empty() {
                    lines.push(self.actions(&view.actions));
                }
            }
            None => lines.extend(
                message
                    .raw_content
                    .lines()
                    .map(|line| format!("{INDENT}{line}")),
            ),
        }
        lines.join("\n")
    }

    /// Quick replies as `[n] label`, numbered from 1
    pub fn actions(&self, actions: &[QuickReply]) -> String {
        let items: Vec<String> = actions
            .iter()
            .enumerate()
            .map(|(i, action)| {
                self.paint(&format!("[{}] {}", i + 1, action.label), |t| t.info, false)
            })
            .collect();
        format!("{INDENT}{}", items.join("  "))
    }

    pub fn booking_created(&self, booking: &BookingInfo) -> String {
        let passenger = booking.passenger_name.as_deref().unwrap_or("-");
        self.paint(
            &format!(
                "Booking #{} created: flight {} ({}), passenger {}, status {}",
                booking.id, booking.flight_id, booking.airline, passenger, booking.status
            ),
            |t| t.success,
            true,
        )
    }

    pub fn booking_state(&self, state: &BookingState) -> String {
        let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

        let mut lines = vec![
            self.paint(
                &format!("Booking stage: {} ({})", state.booking_stage.label(), state.status),
                |t| t.info,
                true,
            ),
            format!(
                "{INDENT}Route: {} -> {}",
                or_dash(&state.source_city),
                or_dash(&state.destination_city)
            ),
            format!("{INDENT}Date: {}", or_dash(&state.departure_date)),
        ];
        if let Some(flight) = &state.flight_info {
            lines.push(format!(
                "{INDENT}Flight: {} {} {} -> {} {} {}, price {}",
                flight.id,
                flight.airline,
                flight.source,
                flight.destination,
                flight.date,
                flight.time,
                flight.price
            ));
        }
        if let Some(passenger) = &state.passenger_info {
            lines.push(format!(
                "{INDENT}Passenger: {}, {}, {}",
                or_dash(&passenger.name),
                or_dash(&passenger.email),
                or_dash(&passenger.phone)
            ));
        }
        lines.join("\n")
    }

    /// Startup line naming the session, so the user can quote it to support
    pub fn session_started(&self, session: &Session) -> String {
        self.notice(&format!(
            "Session ID: {} (started {})",
            session.id(),
            session.created_at().format("%Y-%m-%d %H:%M:%S UTC")
        ))
    }

    /// Flat notice, e.g. a missing session or a failed lookup
    pub fn notice(&self, text: &str) -> String {
        self.paint(text, |t| t.warning, false)
    }

    fn segment(&self, segment: &Segment, indent: &str, out: &mut Vec<String>) {
        match segment {
            Segment::Text { text } => out.push(format!("{indent}{text}")),
            Segment::Emphasis { text } => {
                out.push(format!("{indent}{}", self.paint(text, |t| t.emphasis, true)));
            }
            Segment::Preformatted { text } => {
                out.extend(text.lines().map(|line| format!("{indent}{line}")));
            }
            Segment::Group {
                tone,
                title,
                children,
            } => {
                let bar = self.paint(GROUP_BAR, |t| t.tone(*tone), false);
                if let Some(title) = title {
                    out.push(format!("{indent}{}", self.paint(title, |t| t.tone(*tone), true)));
                }
                let nested = format!("{indent}{bar}");
                for child in children {
                    self.segment(child, &nested, out);
                }
            }
        }
    }

    fn paint(&self, text: &str, color: impl Fn(&Theme) -> Color, bold: bool) -> String {
        match &self.theme {
            None => text.to_string(),
            Some(theme) if bold => text.with(color(theme)).bold().to_string(),
            Some(theme) => text.with(color(theme)).to_string(),
        }
    }
}

/// Shown next to the speaker for replies that moved the booking along
fn phase_caption(phase: ConversationPhase) -> Option<&'static str> {
    match phase {
        ConversationPhase::FlightOptions => Some("(flight options)"),
        ConversationPhase::ConfirmationRequest => Some("(please confirm)"),
        ConversationPhase::EditRequest => Some("(editing booking)"),
        ConversationPhase::BookingSuccess => Some("(booked)"),
        ConversationPhase::Generic => None,
    }
}

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Message(String),
    /// 1-based index into the latest quick replies
    QuickReply(usize),
    State,
    Transcript,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_input(line: &str) -> ShellInput {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return ShellInput::Message(line.to_string());
    };

    match command {
        "state" => ShellInput::State,
        "transcript" => ShellInput::Transcript,
        "help" | "?" => ShellInput::Help,
        "quit" | "exit" => ShellInput::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if n > 0 => ShellInput::QuickReply(n),
            _ => ShellInput::Unknown(line.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatController;
    use crate::reply;
    use crate::transport::testing::MockTransport;
    use crate::transport::BookingStage;

    fn plain() -> TerminalRenderer {
        TerminalRenderer::new(false)
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("  hello "), ShellInput::Message("hello".to_string()));
        assert_eq!(parse_input("1"), ShellInput::Message("1".to_string()));
        assert_eq!(parse_input("/2"), ShellInput::QuickReply(2));
        assert_eq!(parse_input("/state"), ShellInput::State);
        assert_eq!(parse_input("/transcript"), ShellInput::Transcript);
        assert_eq!(parse_input("/help"), ShellInput::Help);
        assert_eq!(parse_input("/quit"), ShellInput::Quit);
        assert_eq!(parse_input("/0"), ShellInput::Unknown("/0".to_string()));
        assert_eq!(parse_input("/fly"), ShellInput::Unknown("/fly".to_string()));
    }

    #[test]
    fn test_user_and_pending_lines() {
        assert_eq!(plain().message(&Message::user("Beijing")), "you> Beijing");
        assert_eq!(plain().message(&Message::pending()), "assistant> ...");
    }

    #[test]
    fn test_failed_message_shows_apology_only() {
        let message = Message::failed("Sorry.", "connection refused");
        assert_eq!(plain().message(&message), "assistant> Sorry.");
    }

    #[test]
    fn test_flight_options_render() {
        let text = "Here are your options.\nOption 1: CA1501\nPrice ¥500\nOption 2: MU5101\nPlease select a flight number.";
        let message = Message::received(text, reply::process(text).view);
        let out = plain().message(&message);

        assert!(out.starts_with("assistant> (flight options)\n"));
        assert!(out.contains("│ Option 1: CA1501"));
        assert!(out.contains("│ Price ¥500"));
        assert!(out.ends_with(
            "[1] Select Flight 1  [2] Select Flight 2  [3] Select Flight 3  [4] Select Flight 4  [5] Select Flight 5"
        ));
    }

    #[test]
    fn test_generic_reply_has_plain_speaker() {
        let text = "Which city are you departing from?";
        let message = Message::received(text, reply::process(text).view);
        assert_eq!(
            plain().message(&message),
            "assistant>\n  Which city are you departing from?"
        );
    }

    #[test]
    fn test_session_started_names_session() {
        let session = ChatController::new(MockTransport::new()).start_session();
        let line = plain().session_started(&session);

        assert!(line.starts_with(&format!("Session ID: {} (started ", session.id())));
        assert!(line.ends_with(" UTC)"));
    }

    #[test]
    fn test_nested_group_indent() {
        let mut out = Vec::new();
        let segment = Segment::titled_group(
            GroupTone::Info,
            "Flight Information",
            vec![Segment::text("CA1501")],
        );
        plain().segment(&segment, INDENT, &mut out);
        assert_eq!(out, vec!["  Flight Information", "  │ CA1501"]);
    }

    #[test]
    fn test_styled_output_differs() {
        let styled = TerminalRenderer::new(true).message(&Message::user("hi"));
        assert_ne!(styled, "you> hi");
        assert!(styled.contains("hi"));
    }

    #[test]
    fn test_booking_state_summary() {
        let state = BookingState {
            booking_stage: BookingStage::Selecting,
            status: "pending".to_string(),
            source_city: Some("Beijing".to_string()),
            destination_city: Some("Shanghai".to_string()),
            departure_date: None,
            flight_info: None,
            passenger_info: None,
        };
        let out = plain().booking_state(&state);
        assert!(out.contains("Route: Beijing -> Shanghai"));
        assert!(out.contains("Date: -"));
    }
}
