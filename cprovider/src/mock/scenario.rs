//! Pre-authored event sequences and the cycling store that hands them out.
//!
//! ```rust
//! use cprovider::{ScenarioStore, error_scenario, text_scenario};
//!
//! let mut store = ScenarioStore::new(vec![text_scenario("first"), error_scenario("boom", true)]);
//! let first = store.next_scenario().expect("non-empty store");
//! let second = store.next_scenario().expect("non-empty store");
//! let third = store.next_scenario().expect("non-empty store");
//!
//! assert_eq!(first, third);
//! assert_ne!(first, second);
//! assert_eq!(store.next_index(), 3);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::{StopReason, StreamEvent};

const SCENARIO_MODEL: &str = "mock";
const DEFAULT_TOOL_USE_ID: &str = "call_1";
const DEFAULT_INPUT_TOKENS: u32 = 10;
const DEFAULT_OUTPUT_TOKENS: u32 = 5;

/// One simulated turn: an immutable, cheaply clonable event sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    events: Arc<[StreamEvent]>,
}

impl Scenario {
    pub fn new(events: Vec<StreamEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }

    pub fn events(&self) -> &[StreamEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl From<Vec<StreamEvent>> for Scenario {
    fn from(events: Vec<StreamEvent>) -> Self {
        Self::new(events)
    }
}

impl Scenario {
    /// One-shot iterator over the events; the scenario itself stays reusable.
    pub fn replay(self) -> ScenarioReplay {
        ScenarioReplay {
            scenario: self,
            position: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioReplay {
    scenario: Scenario,
    position: usize,
}

impl Iterator for ScenarioReplay {
    type Item = StreamEvent;

    fn next(&mut self) -> Option<StreamEvent> {
        let event = self.scenario.events.get(self.position).cloned()?;
        self.position += 1;
        Some(event)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.scenario.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl std::iter::FusedIterator for ScenarioReplay {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioStoreErrorKind {
    EmptyStore,
    Parse,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioStoreError {
    pub kind: ScenarioStoreErrorKind,
    pub message: String,
}

impl ScenarioStoreError {
    pub fn new(kind: ScenarioStoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn empty_store() -> Self {
        Self::new(
            ScenarioStoreErrorKind::EmptyStore,
            "scenario store holds no scenarios",
        )
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ScenarioStoreErrorKind::Parse, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ScenarioStoreErrorKind::Io, message)
    }
}

impl Display for ScenarioStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ScenarioStoreError {}

#[derive(Debug, Clone, Default)]
pub struct ScenarioStore {
    scenarios: Vec<Scenario>,
    next_index: usize,
}

impl ScenarioStore {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self {
            scenarios,
            next_index: 0,
        }
    }

    /// Parses a JSON array of scenarios, each an array of tagged events.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioStoreError> {
        let scenarios = serde_json::from_str::<Vec<Vec<StreamEvent>>>(json).map_err(|error| {
            ScenarioStoreError::parse(format!("failed to deserialize scenarios: {error}"))
        })?;

        Ok(Self::new(scenarios.into_iter().map(Scenario::new).collect()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ScenarioStoreError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|error| {
            ScenarioStoreError::io(format!(
                "failed to read scenario file {}: {error}",
                path.display()
            ))
        })?;

        Self::from_json_str(&json)
    }

    pub fn push(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    /// Returns `scenarios[next_index % len]` and advances the index by one,
    /// whatever the caller later does with the returned scenario.
    pub fn next_scenario(&mut self) -> Result<Scenario, ScenarioStoreError> {
        if self.scenarios.is_empty() {
            return Err(ScenarioStoreError::empty_store());
        }

        let scenario = self.scenarios[self.next_index % self.scenarios.len()].clone();
        self.next_index += 1;
        Ok(scenario)
    }

    /// Position the next call to [`next_scenario`](Self::next_scenario) will use.
    pub fn next_position(&self) -> Option<usize> {
        if self.scenarios.is_empty() {
            None
        } else {
            Some(self.next_index % self.scenarios.len())
        }
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl From<Vec<Scenario>> for ScenarioStore {
    fn from(scenarios: Vec<Scenario>) -> Self {
        Self::new(scenarios)
    }
}

/// Fluent scenario authoring; text deltas get their snapshots computed.
///
/// ```rust
/// use cprovider::{ScenarioBuilder, StopReason, StreamEvent, check_stream_contract};
/// use serde_json::json;
///
/// let scenario = ScenarioBuilder::new()
///     .text("Let me")
///     .text(" check")
///     .tool_call("call_1", "run", json!({ "cmd": "ls" }))
///     .finish(StopReason::ToolCalls, 10, 5)
///     .build();
///
/// assert_eq!(scenario.events()[1], StreamEvent::text_delta(" check", "Let me check"));
/// assert!(check_stream_contract(scenario.events()).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioBuilder {
    events: Vec<StreamEvent>,
    snapshot: String,
    model: Option<String>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model name reported by `finish`; defaults to `"mock"`.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn text(mut self, content: impl Into<String>) -> Self {
        let content = content.into();
        self.snapshot.push_str(&content);
        self.events.push(StreamEvent::text_delta(content, self.snapshot.clone()));
        self
    }

    /// Closes the text block with everything emitted so far.
    pub fn text_end(mut self) -> Self {
        self.events.push(StreamEvent::text_end(self.snapshot.clone()));
        self
    }

    pub fn tool_call(
        mut self,
        tool_use_id: impl Into<String>,
        tool_name: impl Into<String>,
        tool_input: Value,
    ) -> Self {
        self.events.push(StreamEvent::tool_call(tool_use_id, tool_name, tool_input));
        self
    }

    pub fn tool_result(
        mut self,
        tool_use_id: impl Into<String>,
        content: impl Into<String>,
        is_error: bool,
    ) -> Self {
        self.events.push(StreamEvent::tool_result(tool_use_id, content, is_error));
        self
    }

    pub fn reasoning(mut self, content: impl Into<String>) -> Self {
        self.events.push(StreamEvent::ReasoningStart);
        self.events.push(StreamEvent::reasoning_delta(content));
        self
    }

    pub fn finish(
        mut self,
        stop_reason: impl Into<StopReason>,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Self {
        let model = self
            .model
            .clone()
            .unwrap_or_else(|| SCENARIO_MODEL.to_string());
        self.events.push(StreamEvent::finish(
            stop_reason,
            model,
            input_tokens,
            output_tokens,
        ));
        self
    }

    pub fn error(mut self, error: impl Into<String>, recoverable: bool) -> Self {
        self.events.push(StreamEvent::error(error, recoverable));
        self
    }

    /// Appends an event verbatim, without snapshot bookkeeping.
    pub fn event(mut self, event: StreamEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn build(self) -> Scenario {
        Scenario::new(self.events)
    }
}

/// Text reply: one delta followed by `Finish { stop, 10 in, 5 out }`.
pub fn text_scenario(text: impl Into<String>) -> Scenario {
    text_scenario_with_usage(text, DEFAULT_INPUT_TOKENS, DEFAULT_OUTPUT_TOKENS)
}

pub fn text_scenario_with_usage(
    text: impl Into<String>,
    input_tokens: u32,
    output_tokens: u32,
) -> Scenario {
    ScenarioBuilder::new()
        .text(text)
        .finish(StopReason::Stop, input_tokens, output_tokens)
        .build()
}

/// Tool call with id `call_1` followed by `Finish { tool_calls }`.
pub fn tool_call_scenario(tool_name: impl Into<String>, tool_input: Value) -> Scenario {
    tool_call_scenario_with(tool_name, tool_input, DEFAULT_TOOL_USE_ID, "")
}

/// Tool call with an explicit id, preceded by a text delta when `text` is non-empty.
pub fn tool_call_scenario_with(
    tool_name: impl Into<String>,
    tool_input: Value,
    tool_use_id: impl Into<String>,
    text: &str,
) -> Scenario {
    let mut builder = ScenarioBuilder::new();
    if !text.is_empty() {
        builder = builder.text(text);
    }

    builder
        .tool_call(tool_use_id, tool_name, tool_input)
        .finish(
            StopReason::ToolCalls,
            DEFAULT_INPUT_TOKENS,
            DEFAULT_OUTPUT_TOKENS,
        )
        .build()
}

pub fn error_scenario(error: impl Into<String>, recoverable: bool) -> Scenario {
    ScenarioBuilder::new().error(error, recoverable).build()
}

/// Unrecoverable `"Connection lost"` stream error.
pub fn connection_lost_scenario() -> Scenario {
    error_scenario("Connection lost", false)
}
