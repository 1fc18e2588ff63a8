use std::panic::{AssertUnwindSafe, catch_unwind};

use cprovider::{EventKind, ProviderId, ProviderOperationHooks, StreamSource, TokenUsage};

/// Swallows panics raised by the wrapped hooks so a faulty observer cannot
/// abort a stream mid-emission.
pub struct SafeProviderHooks<H> {
    inner: H,
}

impl<H> SafeProviderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H> ProviderOperationHooks for SafeProviderHooks<H>
where
    H: ProviderOperationHooks,
{
    fn on_stream_start(
        &self,
        provider: ProviderId,
        model: &str,
        invocation: usize,
        source: StreamSource,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_stream_start(provider, model, invocation, source)
        }));
    }

    fn on_stream_event(&self, provider: ProviderId, invocation: usize, kind: EventKind) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_stream_event(provider, invocation, kind)
        }));
    }

    fn on_stream_end(
        &self,
        provider: ProviderId,
        invocation: usize,
        events_emitted: usize,
        terminal: Option<EventKind>,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_stream_end(provider, invocation, events_emitted, terminal)
        }));
    }

    fn on_complete(&self, provider: ProviderId, operation: &str, usage: TokenUsage) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_complete(provider, operation, usage)
        }));
    }
}
