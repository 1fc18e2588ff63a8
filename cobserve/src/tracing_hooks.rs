//! Tracing-based observability hooks for streaming and single-shot calls.
//!
//! ```rust
//! use cobserve::TracingObservabilityHooks;
//! use cprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use cprovider::{EventKind, ProviderId, ProviderOperationHooks, StreamSource, TokenUsage};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_stream_start(
        &self,
        provider: ProviderId,
        model: &str,
        invocation: usize,
        source: StreamSource,
    ) {
        tracing::info!(
            phase = "provider",
            event = "stream_start",
            provider = %provider,
            model,
            invocation,
            source = %source
        );
    }

    fn on_stream_event(&self, provider: ProviderId, invocation: usize, kind: EventKind) {
        tracing::debug!(
            phase = "provider",
            event = "stream_event",
            provider = %provider,
            invocation,
            kind = kind.as_str()
        );
    }

    fn on_stream_end(
        &self,
        provider: ProviderId,
        invocation: usize,
        events_emitted: usize,
        terminal: Option<EventKind>,
    ) {
        match terminal {
            Some(EventKind::Error) => tracing::warn!(
                phase = "provider",
                event = "stream_end",
                provider = %provider,
                invocation,
                events_emitted,
                terminal = "error"
            ),
            Some(kind) => tracing::info!(
                phase = "provider",
                event = "stream_end",
                provider = %provider,
                invocation,
                events_emitted,
                terminal = kind.as_str()
            ),
            None => tracing::warn!(
                phase = "provider",
                event = "stream_end",
                provider = %provider,
                invocation,
                events_emitted,
                terminal = "none"
            ),
        }
    }

    fn on_complete(&self, provider: ProviderId, operation: &str, usage: TokenUsage) {
        tracing::info!(
            phase = "provider",
            event = "complete",
            provider = %provider,
            operation,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens
        );
    }
}
