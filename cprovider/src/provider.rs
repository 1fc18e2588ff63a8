use crate::{BoxedEventStream, ModelRequest, ModelResponse, ProviderError, ProviderId};
use crate::{ToolCall, ToolResult};

pub type ProviderFuture<'a, T> = ccommon::BoxFuture<'a, T>;

/// Runs one tool call on behalf of a provider's tool loop.
pub trait ToolExecutor: Send + Sync {
    fn execute(&self, tool_call: &ToolCall) -> Result<ToolResult, ProviderError>;
}

impl<F> ToolExecutor for F
where
    F: Fn(&ToolCall) -> Result<ToolResult, ProviderError> + Send + Sync,
{
    fn execute(&self, tool_call: &ToolCall) -> Result<ToolResult, ProviderError> {
        self(tool_call)
    }
}

pub trait ModelProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    fn model(&self) -> &str;

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;

    fn complete_with_tools<'a>(
        &'a self,
        request: ModelRequest,
        executor: &'a dyn ToolExecutor,
        max_iterations: u32,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;

    /// Starts a streaming invocation.
    ///
    /// Never fails: anything that goes wrong is reported as a
    /// [`StreamEvent::Error`](crate::StreamEvent::Error) inside the stream.
    fn stream<'a>(&'a self, request: ModelRequest) -> BoxedEventStream<'a>;
}
