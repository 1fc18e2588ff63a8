//! Metrics-based observability hooks for streaming and single-shot calls.
//!
//! ```rust
//! use cobserve::MetricsObservabilityHooks;
//! use cprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use cprovider::{EventKind, ProviderId, ProviderOperationHooks, StreamSource, TokenUsage};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_stream_start(
        &self,
        provider: ProviderId,
        _model: &str,
        _invocation: usize,
        source: StreamSource,
    ) {
        let source = match source {
            StreamSource::Scenario(_) => "scenario",
            StreamSource::Fallback => "fallback",
        };
        metrics::counter!(
            "cassette_stream_started_total",
            "provider" => provider.to_string(),
            "source" => source
        )
        .increment(1);
    }

    fn on_stream_event(&self, provider: ProviderId, _invocation: usize, kind: EventKind) {
        metrics::counter!(
            "cassette_stream_events_total",
            "provider" => provider.to_string(),
            "kind" => kind.as_str()
        )
        .increment(1);
    }

    fn on_stream_end(
        &self,
        provider: ProviderId,
        _invocation: usize,
        events_emitted: usize,
        terminal: Option<EventKind>,
    ) {
        metrics::histogram!(
            "cassette_stream_events_per_invocation",
            "provider" => provider.to_string(),
            "terminal" => terminal.map_or("none", |kind| kind.as_str())
        )
        .record(events_emitted as f64);
    }

    fn on_complete(&self, provider: ProviderId, operation: &str, usage: TokenUsage) {
        metrics::counter!(
            "cassette_complete_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "cassette_complete_output_tokens",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .record(usage.output_tokens as f64);
    }
}
