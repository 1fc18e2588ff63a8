//! Streaming event vocabulary, stream contracts, and in-memory stream utilities.
//!
//! ```rust
//! use cprovider::{BoxedEventStream, StopReason, StreamEvent, VecEventStream};
//!
//! let stream = VecEventStream::new(vec![
//!     StreamEvent::text_delta("hello", "hello"),
//!     StreamEvent::finish(StopReason::Stop, "mock", 10, 5),
//! ]);
//! let _boxed: BoxedEventStream<'static> = Box::pin(stream);
//! ```

use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{TokenUsage, ToolCall, ToolResult};

/// Why a provider stopped producing output.
///
/// Serialises to the provider wire strings (`"stop"`, `"tool_calls"`, ...);
/// unknown strings are kept verbatim in [`StopReason::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StopReason {
    Stop,
    ToolCalls,
    MaxTokens,
    MockComplete,
    Other(String),
}

impl StopReason {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stop => "stop",
            Self::ToolCalls => "tool_calls",
            Self::MaxTokens => "max_tokens",
            Self::MockComplete => "mock_complete",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl Display for StopReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for StopReason {
    fn from(value: &str) -> Self {
        match value {
            "stop" => Self::Stop,
            "tool_calls" => Self::ToolCalls,
            "max_tokens" => Self::MaxTokens,
            "mock_complete" => Self::MockComplete,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for StopReason {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<StopReason> for String {
    fn from(value: StopReason) -> Self {
        match value {
            StopReason::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// One item of a provider stream.
///
/// Within one invocation, `TextDelta::snapshot` is always the concatenation
/// of every `content` emitted so far, `TextEnd::full_text` reconciles with
/// the deltas, and exactly one terminal event (`Finish` or `Error`) closes
/// the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    TextDelta {
        content: String,
        snapshot: String,
    },
    TextEnd {
        full_text: String,
    },
    ToolCall {
        tool_use_id: String,
        tool_name: String,
        tool_input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default)]
        is_error: bool,
    },
    ReasoningStart,
    ReasoningDelta {
        content: String,
    },
    Finish {
        stop_reason: StopReason,
        #[serde(default)]
        model: String,
        #[serde(default)]
        input_tokens: u32,
        #[serde(default)]
        output_tokens: u32,
    },
    Error {
        error: String,
        #[serde(default)]
        recoverable: bool,
    },
}

impl StreamEvent {
    pub fn text_delta(content: impl Into<String>, snapshot: impl Into<String>) -> Self {
        Self::TextDelta {
            content: content.into(),
            snapshot: snapshot.into(),
        }
    }

    pub fn text_end(full_text: impl Into<String>) -> Self {
        Self::TextEnd {
            full_text: full_text.into(),
        }
    }

    pub fn tool_call(
        tool_use_id: impl Into<String>,
        tool_name: impl Into<String>,
        tool_input: Value,
    ) -> Self {
        Self::ToolCall {
            tool_use_id: tool_use_id.into(),
            tool_name: tool_name.into(),
            tool_input,
        }
    }

    pub fn tool_result(
        tool_use_id: impl Into<String>,
        content: impl Into<String>,
        is_error: bool,
    ) -> Self {
        Self::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error,
        }
    }

    pub fn reasoning_delta(content: impl Into<String>) -> Self {
        Self::ReasoningDelta {
            content: content.into(),
        }
    }

    pub fn finish(
        stop_reason: impl Into<StopReason>,
        model: impl Into<String>,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Self {
        Self::Finish {
            stop_reason: stop_reason.into(),
            model: model.into(),
            input_tokens,
            output_tokens,
        }
    }

    pub fn error(error: impl Into<String>, recoverable: bool) -> Self {
        Self::Error {
            error: error.into(),
            recoverable,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::TextDelta { .. } => EventKind::TextDelta,
            Self::TextEnd { .. } => EventKind::TextEnd,
            Self::ToolCall { .. } => EventKind::ToolCall,
            Self::ToolResult { .. } => EventKind::ToolResult,
            Self::ReasoningStart => EventKind::ReasoningStart,
            Self::ReasoningDelta { .. } => EventKind::ReasoningDelta,
            Self::Finish { .. } => EventKind::Finish,
            Self::Error { .. } => EventKind::Error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind().is_terminal()
    }
}

/// Payload-free label of a [`StreamEvent`] variant, used for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    TextDelta,
    TextEnd,
    ToolCall,
    ToolResult,
    ReasoningStart,
    ReasoningDelta,
    Finish,
    Error,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextDelta => "text_delta",
            Self::TextEnd => "text_end",
            Self::ToolCall => "tool_call",
            Self::ToolResult => "tool_result",
            Self::ReasoningStart => "reasoning_start",
            Self::ReasoningDelta => "reasoning_delta",
            Self::Finish => "finish",
            Self::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finish | Self::Error)
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider stream contract.
///
/// Invariants for consumers:
/// - Events are emitted in source order, one per poll, only when polled.
/// - Zero or more non-terminal events are followed by exactly one terminal
///   event (`Finish` or `Error`).
/// - Once the stream yields `None`, it must not yield additional items.
/// - Failures are `StreamEvent::Error` items, never a separate error channel.
pub trait ModelEventStream: Stream<Item = StreamEvent> + Send {}

impl<T> ModelEventStream for T where T: Stream<Item = StreamEvent> + Send {}

pub type BoxedEventStream<'a> = Pin<Box<dyn ModelEventStream + 'a>>;

#[derive(Debug)]
pub struct VecEventStream {
    events: VecDeque<StreamEvent>,
}

impl VecEventStream {
    pub fn new(events: Vec<StreamEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl Stream for VecEventStream {
    type Item = StreamEvent;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<StreamEvent>> {
        Poll::Ready(self.events.pop_front())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.events.len(), Some(self.events.len()))
    }
}

/// Drains a stream into a vector.
pub async fn collect_events<S>(stream: S) -> Vec<StreamEvent>
where
    S: Stream<Item = StreamEvent>,
{
    stream.collect().await
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishSummary {
    pub stop_reason: StopReason,
    pub model: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFailure {
    pub error: String,
    pub recoverable: bool,
}

/// Everything one invocation produced, folded the way an agent loop would.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamOutcome {
    pub text: String,
    pub reasoning: String,
    pub tool_calls: Vec<ToolCall>,
    pub tool_results: Vec<ToolResult>,
    pub finish: Option<FinishSummary>,
    pub error: Option<StreamFailure>,
}

impl StreamOutcome {
    pub fn from_events(events: &[StreamEvent]) -> Self {
        let mut outcome = Self::default();

        for event in events {
            match event {
                StreamEvent::TextDelta { content, .. } => outcome.text.push_str(content),
                StreamEvent::TextEnd { full_text } => outcome.text = full_text.clone(),
                StreamEvent::ToolCall {
                    tool_use_id,
                    tool_name,
                    tool_input,
                } => outcome.tool_calls.push(ToolCall {
                    id: tool_use_id.clone(),
                    name: tool_name.clone(),
                    input: tool_input.clone(),
                }),
                StreamEvent::ToolResult {
                    tool_use_id,
                    content,
                    is_error,
                } => outcome.tool_results.push(ToolResult {
                    tool_call_id: tool_use_id.clone(),
                    output: content.clone(),
                    is_error: *is_error,
                }),
                StreamEvent::ReasoningStart => {}
                StreamEvent::ReasoningDelta { content } => outcome.reasoning.push_str(content),
                StreamEvent::Finish {
                    stop_reason,
                    model,
                    input_tokens,
                    output_tokens,
                } => {
                    outcome.finish = Some(FinishSummary {
                        stop_reason: stop_reason.clone(),
                        model: model.clone(),
                        usage: TokenUsage::new(*input_tokens, *output_tokens),
                    })
                }
                StreamEvent::Error { error, recoverable } => {
                    outcome.error = Some(StreamFailure {
                        error: error.clone(),
                        recoverable: *recoverable,
                    })
                }
            }
        }

        outcome
    }

    pub fn is_success(&self) -> bool {
        self.finish.is_some() && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::task::Waker;

    use serde_json::json;

    use super::*;

    #[test]
    fn vec_event_stream_yields_events_in_order_then_stays_exhausted() {
        let mut stream = Box::pin(VecEventStream::new(vec![
            StreamEvent::text_delta("one", "one"),
            StreamEvent::finish(StopReason::Stop, "mock", 1, 1),
        ]));
        let mut cx = Context::from_waker(Waker::noop());

        assert_eq!(stream.size_hint(), (2, Some(2)));
        assert_eq!(
            stream.as_mut().poll_next(&mut cx),
            Poll::Ready(Some(StreamEvent::text_delta("one", "one")))
        );
        assert_eq!(stream.remaining(), 1);
        assert!(matches!(
            stream.as_mut().poll_next(&mut cx),
            Poll::Ready(Some(StreamEvent::Finish { .. }))
        ));
        assert_eq!(stream.as_mut().poll_next(&mut cx), Poll::Ready(None));
        assert_eq!(stream.as_mut().poll_next(&mut cx), Poll::Ready(None));
    }

    #[test]
    fn stop_reason_round_trips_known_and_custom_strings() {
        assert_eq!(StopReason::from("stop"), StopReason::Stop);
        assert_eq!(StopReason::from("tool_calls"), StopReason::ToolCalls);
        assert_eq!(StopReason::from("mock_complete"), StopReason::MockComplete);
        assert_eq!(
            StopReason::from("content_filter"),
            StopReason::Other("content_filter".to_string())
        );
        assert_eq!(StopReason::MockComplete.to_string(), "mock_complete");
        assert_eq!(String::from(StopReason::Other("x".into())), "x");
    }

    #[test]
    fn event_kind_marks_only_finish_and_error_terminal() {
        assert!(StreamEvent::finish("stop", "m", 0, 0).is_terminal());
        assert!(StreamEvent::error("boom", true).is_terminal());
        assert!(!StreamEvent::text_end("x").is_terminal());
        assert!(!StreamEvent::ReasoningStart.is_terminal());
        assert_eq!(StreamEvent::reasoning_delta("hm").kind().to_string(), "reasoning_delta");
    }

    #[test]
    fn stream_event_serialises_with_snake_case_type_tag() {
        let event = StreamEvent::tool_call("call_1", "search", json!({ "query": "test" }));
        let value = serde_json::to_value(&event).expect("serialise");

        assert_eq!(
            value,
            json!({
                "type": "tool_call",
                "tool_use_id": "call_1",
                "tool_name": "search",
                "tool_input": { "query": "test" }
            })
        );
    }

    #[test]
    fn finish_event_deserialises_with_default_usage() {
        let event: StreamEvent =
            serde_json::from_str(r#"{"type":"finish","stop_reason":"stop"}"#).expect("parse");

        assert_eq!(event, StreamEvent::finish(StopReason::Stop, "", 0, 0));

        let unit: StreamEvent =
            serde_json::from_str(r#"{"type":"reasoning_start"}"#).expect("parse");
        assert_eq!(unit, StreamEvent::ReasoningStart);
    }

    #[test]
    fn stream_outcome_folds_text_tools_and_terminal() {
        let events = vec![
            StreamEvent::ReasoningStart,
            StreamEvent::reasoning_delta("thinking"),
            StreamEvent::text_delta("Let me", "Let me"),
            StreamEvent::text_delta(" check", "Let me check"),
            StreamEvent::tool_call("call_1", "run", json!({ "cmd": "ls" })),
            StreamEvent::tool_result("call_1", "Cargo.toml", false),
            StreamEvent::finish(StopReason::ToolCalls, "mock", 10, 5),
        ];

        let outcome = StreamOutcome::from_events(&events);

        assert_eq!(outcome.text, "Let me check");
        assert_eq!(outcome.reasoning, "thinking");
        assert_eq!(outcome.tool_calls.len(), 1);
        assert_eq!(outcome.tool_calls[0].name, "run");
        assert_eq!(outcome.tool_results[0].output, "Cargo.toml");
        assert!(outcome.is_success());
        let finish = outcome.finish.expect("finish");
        assert_eq!(finish.usage.total_tokens(), 15);
        assert_eq!(finish.stop_reason, StopReason::ToolCalls);
    }

    #[test]
    fn stream_outcome_records_stream_errors_as_failure() {
        let outcome = StreamOutcome::from_events(&[StreamEvent::error("Rate limit", true)]);

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.error,
            Some(StreamFailure {
                error: "Rate limit".to_string(),
                recoverable: true,
            })
        );
    }

    #[tokio::test]
    async fn collect_events_drains_boxed_stream() {
        let boxed: BoxedEventStream<'static> = Box::pin(VecEventStream::new(vec![
            StreamEvent::text_delta("a", "a"),
            StreamEvent::finish(StopReason::Stop, "mock", 0, 1),
        ]));

        let events = collect_events(boxed).await;
        assert_eq!(events.len(), 2);
    }
}
