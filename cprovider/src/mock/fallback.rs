//! Deterministic fallback output when no scenario is programmed.
//!
//! The response text is split on single spaces into word fragments: the
//! first fragment is the first word verbatim, every later fragment is a
//! space followed by the next word, so concatenating the fragments
//! reproduces the text exactly.
//!
//! ```rust
//! use cprovider::{FallbackGenerator, ResponseHints, StreamEvent};
//!
//! let events = FallbackGenerator::new("mock-model")
//!     .generate(ResponseHints::Prompt(""), false)
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(events[0], StreamEvent::text_delta("This", "This"));
//! assert_eq!(events[1], StreamEvent::text_delta(" is", "This is"));
//! assert!(events.last().is_some_and(StreamEvent::is_terminal));
//! ```

use std::iter::FusedIterator;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::{StopReason, StreamEvent};

pub const PLAIN_MOCK_RESPONSE: &str = "This is a mock response for testing purposes.";

static OUTPUT_KEYS_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)output_keys:\s*\[(.*?)\]").expect("output_keys pattern is valid")
});
static KEYS_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:keys|with keys):\s*([a-zA-Z0-9_,\s]+)").expect("keys pattern is valid")
});
static JSON_OBJECT_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{[^}]*"([a-zA-Z0-9_]+)":\s*"#).expect("json object pattern is valid")
});
static JSON_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([a-zA-Z0-9_]+)":\s*"#).expect("json key pattern is valid"));

/// What the fallback may use to shape a JSON response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseHints<'a> {
    /// Free prompt text; keys are pulled out with [`extract_output_keys`].
    Prompt(&'a str),
    /// Keys already extracted by the caller.
    Keys(&'a [String]),
}

impl ResponseHints<'_> {
    pub fn keys(&self) -> Vec<String> {
        match self {
            Self::Prompt(prompt) => extract_output_keys(prompt),
            Self::Keys(keys) => keys
                .iter()
                .filter(|key| !key.is_empty())
                .cloned()
                .collect(),
        }
    }
}

/// Pulls expected output key names out of a system prompt.
///
/// Recognised forms, first match wins: `output_keys: [a, b]`,
/// `keys: a, b` / `with keys: a, b`, and `"a":` entries of an inline JSON
/// object. Returns an empty list when nothing matches.
pub fn extract_output_keys(prompt: &str) -> Vec<String> {
    if let Some(captures) = OUTPUT_KEYS_LIST.captures(prompt) {
        return captures[1]
            .split(',')
            .map(|key| key.trim().trim_matches(['"', '\'']))
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(captures) = KEYS_CLAUSE.captures(prompt) {
        return captures[1]
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect();
    }

    if JSON_OBJECT_KEY.is_match(prompt) {
        let mut keys = Vec::<String>::new();
        for captures in JSON_KEY.captures_iter(prompt) {
            let key = &captures[1];
            if !keys.iter().any(|seen| seen == key) {
                keys.push(key.to_string());
            }
        }
        return keys;
    }

    Vec::new()
}

/// Builds the mock response body.
///
/// In JSON mode this is a pretty-printed object mapping every hinted key to
/// `"mock_<key>_value"`, or `{"result": "mock_result_value"}` without keys.
pub fn mock_response_text(hints: ResponseHints<'_>, json_mode: bool) -> String {
    if !json_mode {
        return PLAIN_MOCK_RESPONSE.to_string();
    }

    let mut keys = hints.keys();
    if keys.is_empty() {
        keys.push("result".to_string());
    }

    let object = keys
        .into_iter()
        .map(|key| {
            let value = Value::String(format!("mock_{key}_value"));
            (key, value)
        })
        .collect::<Map<String, Value>>();
    let value = Value::Object(object);

    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    model: String,
}

impl FallbackGenerator {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn generate(&self, hints: ResponseHints<'_>, json_mode: bool) -> FallbackEvents {
        FallbackEvents::new(mock_response_text(hints, json_mode), self.model.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Deltas,
    End,
    Finish,
    Done,
}

/// Lazily produced fallback events: `TextDelta+`, `TextEnd`, `Finish`.
///
/// Each fragment is cut from the text only when the next event is requested.
/// The finish event carries no token usage.
#[derive(Debug, Clone)]
pub struct FallbackEvents {
    text: String,
    cursor: Option<usize>,
    snapshot: String,
    started: bool,
    model: String,
    stage: Stage,
}

impl FallbackEvents {
    pub fn new(text: String, model: String) -> Self {
        Self {
            snapshot: String::with_capacity(text.len()),
            text,
            cursor: Some(0),
            started: false,
            model,
            stage: Stage::Deltas,
        }
    }

    fn next_fragment(&mut self) -> Option<String> {
        let start = self.cursor?;
        let rest = &self.text[start..];
        let (word, next) = match rest.find(' ') {
            Some(offset) => (&rest[..offset], Some(start + offset + 1)),
            None => (rest, None),
        };

        let fragment = if !self.started {
            word.to_string()
        } else {
            format!(" {word}")
        };
        self.cursor = next;
        self.started = true;
        Some(fragment)
    }
}

impl Iterator for FallbackEvents {
    type Item = StreamEvent;

    fn next(&mut self) -> Option<StreamEvent> {
        loop {
            match self.stage {
                Stage::Deltas => match self.next_fragment() {
                    Some(fragment) => {
                        self.snapshot.push_str(&fragment);
                        return Some(StreamEvent::text_delta(fragment, self.snapshot.clone()));
                    }
                    None => self.stage = Stage::End,
                },
                Stage::End => {
                    self.stage = Stage::Finish;
                    return Some(StreamEvent::text_end(self.snapshot.clone()));
                }
                Stage::Finish => {
                    self.stage = Stage::Done;
                    return Some(StreamEvent::finish(
                        StopReason::MockComplete,
                        self.model.clone(),
                        0,
                        0,
                    ));
                }
                Stage::Done => return None,
            }
        }
    }
}

impl FusedIterator for FallbackEvents {}
