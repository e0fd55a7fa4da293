//! Assistant reply pipeline
//!
//! Turns raw assistant text into something the shell can act on:
//! classify into a conversation phase, extract phase-specific fields,
//! render a display tree with quick replies, and pick the next input hint.
//!
//! Every backend marker string lives in `markers`; nothing outside this
//! module matches against assistant text.

pub mod classify;
pub mod extract;
pub mod hint;
mod markers;
pub mod render;

#[cfg(test)]
mod proptests;

pub use classify::{classify, ConversationPhase};
pub use extract::extract;
pub use hint::hint_for;
pub use render::{render, GroupTone, QuickReply, RenderedView, Segment};

/// Output of running one assistant reply through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedReply {
    pub phase: ConversationPhase,
    pub view: RenderedView,
    pub hint: &'static str,
}

/// Classify, extract and render `text`.
///
/// The hint depends only on the phase, so it is chosen right after
/// classification and never waits on extraction.
pub fn process(text: &str) -> ProcessedReply {
    let phase = classify(text);
    let hint = hint_for(phase);
    let extraction = extract(phase, text);
    let view = render(phase, &extraction);

    tracing::debug!(
        phase = phase.label(),
        segments = view.segments.len(),
        actions = view.actions.len(),
        "Processed assistant reply"
    );

    ProcessedReply { phase, view, hint }
}
