//! Common `cprovider` imports for downstream crates.

pub use ccommon::{BoxFuture, GenerationOptions, MetadataMap};
pub use crate::{
    BoxedEventStream, EventKind, Message, MockProvider, MockProviderBuilder, ModelEventStream,
    ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse, NoopOperationHooks,
    ProviderError, ProviderErrorKind, ProviderId, ProviderOperationHooks, ProviderRegistry, Role,
    Scenario, ScenarioBuilder, ScenarioStore, StopReason, StreamEvent, StreamOutcome,
    StreamSource, TokenUsage, ToolCall, ToolDefinition, ToolExecutor, ToolResult,
    check_stream_contract, collect_events, error_scenario, text_scenario, tool_call_scenario,
};
