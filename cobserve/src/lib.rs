//! Production-friendly observability hooks for mock provider invocations.
//!
//! ```rust
//! use cobserve::{MetricsObservabilityHooks, SafeProviderHooks, TracingObservabilityHooks};
//! use cprovider::MockProvider;
//!
//! let _provider = MockProvider::builder()
//!     .hooks(SafeProviderHooks::new(TracingObservabilityHooks))
//!     .build();
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::SafeProviderHooks;
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{MetricsObservabilityHooks, SafeProviderHooks, TracingObservabilityHooks};
}
