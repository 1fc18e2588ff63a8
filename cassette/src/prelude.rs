//! Common imports for most cassette test suites.

pub use crate::{
    BoxedEventStream, EventKind, GenerationOptions, Message, MetricsObservabilityHooks,
    MockProvider, MockProviderBuilder, ModelProvider, ModelRequest, ModelRequestBuilder,
    ModelResponse, ProviderError, ProviderId, ProviderOperationHooks, ProviderRegistry, Role,
    SafeProviderHooks, Scenario, ScenarioBuilder, ScenarioStore, StopReason, StreamEvent,
    StreamOutcome, TokenUsage, ToolCall, ToolDefinition, ToolResult, TracingObservabilityHooks,
    assistant_message, check_stream_contract, collect_events, connection_lost_scenario, cs_messages,
    cs_msg, cs_scenario, error_scenario, observed_mock_provider, parse_provider_id, request,
    system_message, text_scenario, tool_call_scenario, tool_message, user_message,
};
