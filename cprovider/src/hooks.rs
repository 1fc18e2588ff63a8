//! Operational hook contracts for provider invocations.
//!
//! Hooks observe; they never influence which events are emitted. All
//! methods default to no-ops so implementors pick the callbacks they need.

use std::fmt::{Display, Formatter};

use crate::{EventKind, ProviderId, TokenUsage};

/// Where the events of one streaming invocation come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamSource {
    /// Position of the replayed scenario within the store.
    Scenario(usize),
    Fallback,
}

impl Display for StreamSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scenario(position) => write!(f, "scenario:{position}"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

pub trait ProviderOperationHooks: Send + Sync {
    /// Called once per `stream` call, after the invocation has been recorded.
    ///
    /// Runs while the provider's engine lock is held, so calls arrive in
    /// invocation order. Implementations must not call back into the provider.
    fn on_stream_start(
        &self,
        _provider: ProviderId,
        _model: &str,
        _invocation: usize,
        _source: StreamSource,
    ) {
    }

    fn on_stream_event(&self, _provider: ProviderId, _invocation: usize, _kind: EventKind) {}

    /// Called when the consumer drains the stream. Early drops skip this.
    fn on_stream_end(
        &self,
        _provider: ProviderId,
        _invocation: usize,
        _events_emitted: usize,
        _terminal: Option<EventKind>,
    ) {
    }

    fn on_complete(&self, _provider: ProviderId, _operation: &str, _usage: TokenUsage) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_source_display_names_scenario_position() {
        assert_eq!(StreamSource::Scenario(2).to_string(), "scenario:2");
        assert_eq!(StreamSource::Fallback.to_string(), "fallback");
    }

    #[test]
    fn noop_hooks_accept_every_callback() {
        let hooks = NoopOperationHooks;
        hooks.on_stream_start(ProviderId::Mock, "mock-model", 0, StreamSource::Fallback);
        hooks.on_stream_event(ProviderId::Mock, 0, EventKind::TextDelta);
        hooks.on_stream_end(ProviderId::Mock, 0, 3, Some(EventKind::Finish));
        hooks.on_complete(ProviderId::Mock, "complete", TokenUsage::default());
    }
}
