//! Phase-specific structured extraction
//!
//! Each phase has a pure function from raw reply text to an `Extraction`.
//! Text that does not have the expected shape still extracts: missing parts
//! come back empty rather than failing.

use super::markers::{self, OPTION_BOUNDARY, PARAGRAPH_BREAK};
use super::ConversationPhase;

/// Phase-tagged structured payload, consumed by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    FlightOptions {
        /// Text before the first option block, `None` when blank
        intro: Option<String>,
        options: Vec<OptionBlock>,
        /// Paragraph after the last blank line, `None` when absent
        footer: Option<String>,
    },
    ConfirmationRequest {
        header: String,
        flight: Vec<String>,
        passenger: Vec<String>,
        /// Last paragraph; the header itself when there is only one
        footer: String,
        lookup: SectionLookup,
    },
    EditRequest {
        header: String,
        current_info: String,
        guidance: String,
    },
    BookingSuccess {
        lines: Vec<String>,
    },
    Generic {
        lines: Vec<String>,
    },
}

impl Extraction {
    pub fn phase(&self) -> ConversationPhase {
        match self {
            Self::FlightOptions { .. } => ConversationPhase::FlightOptions,
            Self::ConfirmationRequest { .. } => ConversationPhase::ConfirmationRequest,
            Self::EditRequest { .. } => ConversationPhase::EditRequest,
            Self::BookingSuccess { .. } => ConversationPhase::BookingSuccess,
            Self::Generic { .. } => ConversationPhase::Generic,
        }
    }
}

/// One `Option N:` block, split into lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionBlock {
    pub lines: Vec<OptionLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLine {
    pub text: String,
    /// Set for fare lines
    pub emphasized: bool,
}

/// How the confirmation sections were located
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLookup {
    /// Found by their label prefixes, wherever they appear
    Prefix,
    /// No labelled flight section; sections 1 and 2 were assumed to be
    /// flight and passenger information. Misparses when the backend orders
    /// sections differently.
    Positional,
}

/// Extract the structured fields `phase` expects from `text`.
pub fn extract(phase: ConversationPhase, text: &str) -> Extraction {
    match phase {
        ConversationPhase::FlightOptions => extract_flight_options(text),
        ConversationPhase::ConfirmationRequest => extract_confirmation(text),
        ConversationPhase::EditRequest => extract_edit_request(text),
        ConversationPhase::BookingSuccess => Extraction::BookingSuccess {
            lines: split_lines(text),
        },
        ConversationPhase::Generic => Extraction::Generic {
            lines: split_lines(text),
        },
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn slice(text: &str, start: usize, end: usize) -> &str {
    text.get(start..end).unwrap_or_default()
}

fn extract_flight_options(text: &str) -> Extraction {
    let starts: Vec<usize> = OPTION_BOUNDARY.find_iter(text).map(|m| m.start()).collect();

    // The footer is the paragraph after the last blank line, provided it
    // comes after the last option marker; otherwise it would swallow options.
    let footer_start = text
        .rfind(PARAGRAPH_BREAK)
        .map(|i| i + PARAGRAPH_BREAK.len())
        .filter(|&i| starts.last().map_or(true, |&last| i > last));
    let body_end = footer_start.map_or(text.len(), |i| i - PARAGRAPH_BREAK.len());

    let intro_end = starts.first().copied().unwrap_or(body_end);
    let intro = non_blank(slice(text, 0, intro_end));

    let options = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(body_end).max(start);
            let lines = slice(text, start, end)
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty())
                .map(|line| OptionLine {
                    text: line.to_string(),
                    emphasized: line.contains(markers::PRICE),
                })
                .collect();
            OptionBlock { lines }
        })
        .collect();

    let footer = footer_start.and_then(|i| non_blank(slice(text, i, text.len())));

    Extraction::FlightOptions {
        intro,
        options,
        footer,
    }
}

fn section_lines(section: Option<&str>, label: &str) -> Vec<String> {
    section
        .map(|s| {
            s.lines()
                .filter(|line| *line != label && !line.trim().is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn extract_confirmation(text: &str) -> Extraction {
    let sections: Vec<&str> = text.split(PARAGRAPH_BREAK).collect();
    let header = sections.first().copied().unwrap_or_default().to_string();
    let footer = sections.last().copied().unwrap_or_default().to_string();

    // A later section with the same label replaces an earlier one.
    let find = |label: &str| sections.iter().rev().copied().find(|s| s.starts_with(label));

    let (flight, passenger, lookup) = match find(markers::FLIGHT_SECTION) {
        Some(flight) => (
            Some(flight),
            find(markers::PASSENGER_SECTION),
            SectionLookup::Prefix,
        ),
        None => {
            tracing::debug!(
                sections = sections.len(),
                "No labelled flight section, falling back to positional sections"
            );
            (
                sections.get(1).copied(),
                sections.get(2).copied(),
                SectionLookup::Positional,
            )
        }
    };

    Extraction::ConfirmationRequest {
        header,
        flight: section_lines(flight, markers::FLIGHT_SECTION),
        passenger: section_lines(passenger, markers::PASSENGER_SECTION),
        footer,
        lookup,
    }
}

fn extract_edit_request(text: &str) -> Extraction {
    let lines: Vec<&str> = text.lines().collect();
    let header = lines.first().copied().unwrap_or_default().to_string();

    // Without the guidance line, the closing instruction is the guidance.
    let guidance_at = lines
        .iter()
        .position(|line| line.contains(markers::EDIT_GUIDANCE))
        .unwrap_or(lines.len().saturating_sub(1));
    let info_end = guidance_at.max(1).min(lines.len());

    let current_info = lines.get(1..info_end).unwrap_or_default().join("\n");
    let guidance = lines.get(guidance_at..).unwrap_or_default().join("\n");

    Extraction::EditRequest {
        header,
        current_info,
        guidance,
    }
}
