//! Display tree and quick replies for an extracted reply

use super::extract::{Extraction, OptionBlock};
use super::markers;
use super::ConversationPhase;
use serde::{Deserialize, Serialize};

/// Number of flight selection shortcuts offered with every option listing.
/// Fixed: not derived from how many option blocks were parsed.
pub const FLIGHT_SELECTION_ACTIONS: usize = 5;

/// Visual tone of a grouped block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupTone {
    Neutral,
    Info,
    Warning,
    Success,
}

/// One display block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Text {
        text: String,
    },
    Emphasis {
        text: String,
    },
    /// Shown verbatim, line breaks preserved
    Preformatted {
        text: String,
    },
    Group {
        tone: GroupTone,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        children: Vec<Segment>,
    },
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    pub fn emphasis(text: impl Into<String>) -> Self {
        Segment::Emphasis { text: text.into() }
    }

    pub fn preformatted(text: impl Into<String>) -> Self {
        Segment::Preformatted { text: text.into() }
    }

    pub fn group(tone: GroupTone, children: Vec<Segment>) -> Self {
        Segment::Group {
            tone,
            title: None,
            children,
        }
    }

    pub fn titled_group(tone: GroupTone, title: impl Into<String>, children: Vec<Segment>) -> Self {
        Segment::Group {
            tone,
            title: Some(title.into()),
            children,
        }
    }
}

/// A control that resubmits `payload` through the normal send path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReply {
    pub label: String,
    pub payload: String,
}

impl QuickReply {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Rendered form of one assistant reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedView {
    pub segments: Vec<Segment>,
    pub actions: Vec<QuickReply>,
}

/// Build the display tree from `extraction` and the quick replies for `phase`.
///
/// Segments come from the extraction alone; no text is re-parsed here.
pub fn render(phase: ConversationPhase, extraction: &Extraction) -> RenderedView {
    if extraction.phase() != phase {
        tracing::warn!(
            phase = phase.label(),
            extracted = extraction.phase().label(),
            "Rendering extraction for a different phase"
        );
    }

    RenderedView {
        segments: segments(extraction),
        actions: quick_replies(phase),
    }
}

/// Quick replies offered for `phase`
pub fn quick_replies(phase: ConversationPhase) -> Vec<QuickReply> {
    match phase {
        ConversationPhase::FlightOptions => (1..=FLIGHT_SELECTION_ACTIONS)
            .map(|n| QuickReply::new(format!("Select Flight {n}"), n.to_string()))
            .collect(),
        ConversationPhase::ConfirmationRequest => vec![
            QuickReply::new("Confirm Booking", "confirm"),
            QuickReply::new("Modify Information", "modify"),
        ],
        ConversationPhase::EditRequest => vec![
            QuickReply::new("Reselect Flight", "reselect flight"),
            QuickReply::new("Finish Editing", "confirm"),
        ],
        ConversationPhase::BookingSuccess | ConversationPhase::Generic => vec![],
    }
}

fn option_group(block: &OptionBlock) -> Segment {
    let children = block
        .lines
        .iter()
        .map(|line| {
            if line.emphasized {
                Segment::emphasis(&line.text)
            } else {
                Segment::text(&line.text)
            }
        })
        .collect();
    Segment::group(GroupTone::Neutral, children)
}

fn line_segments(lines: &[String]) -> Vec<Segment> {
    lines.iter().map(Segment::text).collect()
}

fn segments(extraction: &Extraction) -> Vec<Segment> {
    match extraction {
        Extraction::FlightOptions {
            intro,
            options,
            footer,
        } => {
            let mut out = Vec::with_capacity(3);
            if let Some(intro) = intro {
                out.push(Segment::text(intro));
            }
            out.push(Segment::group(
                GroupTone::Neutral,
                options.iter().map(option_group).collect(),
            ));
            if let Some(footer) = footer {
                out.push(Segment::text(footer));
            }
            out
        }
        Extraction::ConfirmationRequest {
            header,
            flight,
            passenger,
            footer,
            ..
        } => {
            vec![
                Segment::text(header),
                Segment::group(
                    GroupTone::Info,
                    vec![
                        Segment::titled_group(
                            GroupTone::Info,
                            markers::FLIGHT_SECTION,
                            line_segments(flight),
                        ),
                        Segment::titled_group(
                            GroupTone::Info,
                            markers::PASSENGER_SECTION,
                            line_segments(passenger),
                        ),
                    ],
                ),
                Segment::text(footer),
            ]
        }
        Extraction::EditRequest {
            header,
            current_info,
            guidance,
        } => vec![
            Segment::text(header),
            Segment::group(GroupTone::Warning, vec![Segment::preformatted(current_info)]),
            Segment::group(GroupTone::Success, vec![Segment::preformatted(guidance)]),
        ],
        Extraction::BookingSuccess { lines } => {
            vec![Segment::group(GroupTone::Success, line_segments(lines))]
        }
        Extraction::Generic { lines } => line_segments(lines),
    }
}
