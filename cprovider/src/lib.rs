//! Provider abstractions and a deterministic mock streaming provider.
//!
//! The mock replays pre-authored scenarios in cycling order or, when none
//! were supplied, streams a word-split fallback derived from the system
//! prompt. Every streaming call is recorded for later assertions.
//!
//! ```rust
//! use cprovider::{Message, MockProvider, ModelProvider, ModelRequest, Role, text_scenario};
//!
//! let provider = MockProvider::builder()
//!     .scenario(text_scenario("Hello from the mock"))
//!     .build();
//!
//! let _stream = provider.stream(ModelRequest::new(vec![Message::new(Role::User, "hi")]));
//! assert_eq!(provider.call_index(), 1);
//! ```

mod contract;
mod error;
mod hooks;
mod mock;
mod model;
mod provider;
mod registry;
mod stream;

pub mod prelude;

pub use contract::{ContractViolation, ContractViolationKind, check_stream_contract};
pub use error::{ProviderError, ProviderErrorKind};
pub use hooks::{NoopOperationHooks, ProviderOperationHooks, StreamSource};
pub use mock::{
    CallLedger, DEFAULT_MOCK_MODEL, FallbackEvents, FallbackGenerator, InvocationRecord,
    MockProvider, MockProviderBuilder, PLAIN_MOCK_RESPONSE, ResponseHints, Scenario,
    ScenarioBuilder, ScenarioReplay, ScenarioStore, ScenarioStoreError, ScenarioStoreErrorKind,
    connection_lost_scenario, error_scenario, extract_output_keys, mock_response_text,
    text_scenario, text_scenario_with_usage, tool_call_scenario, tool_call_scenario_with,
};
pub use model::{
    Message, ModelRequest, ModelRequestBuilder, ModelResponse, ProviderId, Role, TokenUsage,
    ToolCall, ToolDefinition, ToolResult,
};
pub use provider::{ModelProvider, ProviderFuture, ToolExecutor};
pub use registry::ProviderRegistry;
pub use stream::{
    BoxedEventStream, EventKind, FinishSummary, ModelEventStream, StopReason, StreamEvent,
    StreamFailure, StreamOutcome, VecEventStream, collect_events,
};

pub use ccommon::{BoxFuture, GenerationOptions, MetadataMap};
