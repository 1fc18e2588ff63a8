//! Unified facade over the cassette workspace crates.
//!
//! Re-exports the provider abstractions, the deterministic mock provider,
//! and the observability hooks, plus macros for terse test setup.
//!
//! ```rust
//! use cassette::prelude::*;
//!
//! let provider = MockProvider::builder()
//!     .scenario(cs_scenario![text("Hello"), finish("stop", 10, 5)])
//!     .hooks(SafeProviderHooks::new(TracingObservabilityHooks))
//!     .build();
//!
//! let _stream = provider.stream(ModelRequest::new(cs_messages![user => "hi"]));
//! assert_eq!(provider.stream_calls().len(), 1);
//! ```

mod macros;

pub mod prelude;
pub mod util;

pub use ccommon;
pub use cobserve;
pub use cprovider;
pub use serde_json;

pub use ccommon::{BoxFuture, GenerationOptions, MetadataMap};
pub use cobserve::{MetricsObservabilityHooks, SafeProviderHooks, TracingObservabilityHooks};
pub use cprovider::{
    BoxedEventStream, CallLedger, ContractViolation, ContractViolationKind, EventKind,
    FallbackEvents, FallbackGenerator, FinishSummary, InvocationRecord, Message, MockProvider,
    MockProviderBuilder, ModelEventStream, ModelProvider, ModelRequest, ModelRequestBuilder,
    ModelResponse, NoopOperationHooks, ProviderError, ProviderErrorKind, ProviderFuture,
    ProviderId, ProviderOperationHooks, ProviderRegistry, ResponseHints, Role, Scenario,
    ScenarioBuilder, ScenarioStore, ScenarioStoreError, ScenarioStoreErrorKind, StopReason,
    StreamEvent, StreamFailure, StreamOutcome, StreamSource, TokenUsage, ToolCall,
    ToolDefinition, ToolExecutor, ToolResult, VecEventStream, check_stream_contract,
    collect_events, connection_lost_scenario, error_scenario, extract_output_keys,
    mock_response_text, text_scenario, text_scenario_with_usage, tool_call_scenario,
    tool_call_scenario_with,
};

pub use util::{
    assistant_message, observed_mock_provider, parse_provider_id, request, system_message,
    tool_message, user_message,
};
