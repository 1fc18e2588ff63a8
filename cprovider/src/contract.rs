//! Consumer-facing stream contract checks.
//!
//! A provider stream (real or mock) must keep text snapshots prefix
//! consistent, reconcile any `TextEnd` with its deltas, keep tool-use ids
//! unique, and end with exactly one terminal event.
//!
//! ```rust
//! use cprovider::{StopReason, StreamEvent, check_stream_contract};
//!
//! let events = vec![
//!     StreamEvent::text_delta("hello", "hello"),
//!     StreamEvent::text_delta(" world", "hello world"),
//!     StreamEvent::text_end("hello world"),
//!     StreamEvent::finish(StopReason::Stop, "mock", 10, 5),
//! ];
//! assert!(check_stream_contract(&events).is_ok());
//! ```

use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::StreamEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolationKind {
    SnapshotMismatch,
    DuplicateTextEnd,
    TextEndMismatch,
    DuplicateToolUseId,
    MissingTerminal,
    EventAfterTerminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractViolation {
    pub kind: ContractViolationKind,
    /// Position of the offending event, or the sequence length when the
    /// problem is something missing at the end.
    pub index: usize,
    pub message: String,
}

impl ContractViolation {
    pub fn new(kind: ContractViolationKind, index: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            message: message.into(),
        }
    }
}

impl Display for ContractViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} at event {}: {}", self.kind, self.index, self.message)
    }
}

impl Error for ContractViolation {}

pub fn check_stream_contract(events: &[StreamEvent]) -> Result<(), ContractViolation> {
    let mut accumulated = String::new();
    let mut text_end_seen = false;
    let mut tool_use_ids = HashSet::new();
    let mut terminal_at = None::<usize>;

    for (index, event) in events.iter().enumerate() {
        if let Some(terminal) = terminal_at {
            return Err(ContractViolation::new(
                ContractViolationKind::EventAfterTerminal,
                index,
                format!("{} emitted after terminal event at {terminal}", event.kind()),
            ));
        }

        match event {
            StreamEvent::TextDelta { content, snapshot } => {
                accumulated.push_str(content);
                if *snapshot != accumulated {
                    return Err(ContractViolation::new(
                        ContractViolationKind::SnapshotMismatch,
                        index,
                        format!("snapshot {snapshot:?} does not equal accumulated {accumulated:?}"),
                    ));
                }
            }
            StreamEvent::TextEnd { full_text } => {
                if text_end_seen {
                    return Err(ContractViolation::new(
                        ContractViolationKind::DuplicateTextEnd,
                        index,
                        "more than one text_end in a single invocation",
                    ));
                }
                text_end_seen = true;

                if *full_text != accumulated {
                    return Err(ContractViolation::new(
                        ContractViolationKind::TextEndMismatch,
                        index,
                        format!("full_text {full_text:?} does not equal deltas {accumulated:?}"),
                    ));
                }
            }
            StreamEvent::ToolCall { tool_use_id, .. } => {
                if !tool_use_ids.insert(tool_use_id.as_str()) {
                    return Err(ContractViolation::new(
                        ContractViolationKind::DuplicateToolUseId,
                        index,
                        format!("tool_use_id {tool_use_id:?} reused"),
                    ));
                }
            }
            StreamEvent::Finish { .. } | StreamEvent::Error { .. } => terminal_at = Some(index),
            StreamEvent::ToolResult { .. }
            | StreamEvent::ReasoningStart
            | StreamEvent::ReasoningDelta { .. } => {}
        }
    }

    if terminal_at.is_none() {
        return Err(ContractViolation::new(
            ContractViolationKind::MissingTerminal,
            events.len(),
            "stream ended without finish or error",
        ));
    }

    Ok(())
}
