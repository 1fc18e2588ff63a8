//! Mock provider that replays scenarios or streams a deterministic fallback.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_stream::stream;

use crate::mock::fallback::{FallbackEvents, FallbackGenerator, ResponseHints, mock_response_text};
use crate::mock::ledger::{CallLedger, InvocationRecord};
use crate::mock::scenario::{Scenario, ScenarioReplay, ScenarioStore};
use crate::{
    BoxedEventStream, ModelProvider, ModelRequest, ModelResponse, NoopOperationHooks,
    ProviderError, ProviderFuture, ProviderId, ProviderOperationHooks, StopReason, StreamEvent,
    StreamSource, TokenUsage, ToolExecutor,
};

pub const DEFAULT_MOCK_MODEL: &str = "mock-model";

/// Scenario index and ledger; always mutated together under one lock.
#[derive(Debug, Default)]
struct EngineState {
    store: ScenarioStore,
    ledger: CallLedger,
}

/// Deterministic stand-in for a streaming LLM provider.
///
/// Every `stream` call records its arguments and picks its event source at
/// call time, before anything is polled: the next scenario in cycling order
/// when scenarios were supplied, otherwise the word-split fallback built
/// from the system prompt.
///
/// ```rust
/// use cprovider::{Message, MockProvider, ModelProvider, ModelRequest, Role, text_scenario};
///
/// let provider = MockProvider::builder()
///     .scenario(text_scenario("first"))
///     .scenario(text_scenario("second"))
///     .build();
///
/// let _first = provider.stream(ModelRequest::new(vec![Message::new(Role::User, "hi")]));
/// let _second = provider.stream(ModelRequest::new(vec![Message::new(Role::User, "again")]));
///
/// assert_eq!(provider.call_index(), 2);
/// assert_eq!(provider.stream_calls().len(), 2);
/// ```
pub struct MockProvider {
    model: String,
    fallback: FallbackGenerator,
    state: Mutex<EngineState>,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> MockProviderBuilder {
        MockProviderBuilder::new()
    }

    pub fn with_scenarios(model: impl Into<String>, scenarios: Vec<Scenario>) -> Self {
        Self::builder().model(model).scenarios(scenarios).build()
    }

    /// Number of scenarios handed out so far.
    pub fn call_index(&self) -> usize {
        self.lock_state().store.next_index()
    }

    pub fn scenario_count(&self) -> usize {
        self.lock_state().store.len()
    }

    pub fn scenarios(&self) -> Vec<Scenario> {
        self.lock_state().store.scenarios().to_vec()
    }

    /// Snapshot of every recorded `stream` call, oldest first.
    pub fn stream_calls(&self) -> Vec<InvocationRecord> {
        self.lock_state().ledger.all().to_vec()
    }

    pub fn last_stream_call(&self) -> Option<InvocationRecord> {
        self.lock_state().ledger.last().cloned()
    }

    // Emission must not fail, so a poisoned lock is taken over as is.
    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_invocation(&self, request: &ModelRequest) -> (usize, InvocationEvents) {
        let (invocation, selected) = {
            let mut state = self.lock_state();
            let invocation = state.ledger.record(InvocationRecord::from(request));
            let position = state.store.next_position();
            // An empty store only means "use the fallback".
            let selected = state.store.next_scenario().ok().zip(position);
            let source = match selected {
                Some((_, position)) => StreamSource::Scenario(position),
                None => StreamSource::Fallback,
            };
            // Still locked, so start hooks observe invocations in order.
            self.hooks.on_stream_start(ProviderId::Mock, &self.model, invocation, source);
            (invocation, selected)
        };

        let hints = ResponseHints::Prompt(&request.system);
        let events = match selected {
            Some((scenario, _)) => InvocationEvents::Scenario(scenario.replay()),
            None => InvocationEvents::Fallback(self.fallback.generate(hints, false)),
        };
        (invocation, events)
    }

    fn single_shot(&self, operation: &str, content: String) -> ModelResponse {
        let response = ModelResponse {
            provider: ProviderId::Mock,
            model: self.model.clone(),
            content,
            stop_reason: StopReason::MockComplete,
            usage: TokenUsage::default(),
        };
        self.hooks.on_complete(ProviderId::Mock, operation, response.usage);
        response
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock_state();
        f.debug_struct("MockProvider")
            .field("model", &self.model)
            .field("scenarios", &state.store.len())
            .field("call_index", &state.store.next_index())
            .field("recorded_calls", &state.ledger.len())
            .finish()
    }
}

impl ModelProvider for MockProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Mock
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            let content = mock_response_text(
                ResponseHints::Prompt(&request.system),
                request.options.json_mode,
            );
            Ok(self.single_shot("complete", content))
        })
    }

    fn complete_with_tools<'a>(
        &'a self,
        request: ModelRequest,
        _executor: &'a dyn ToolExecutor,
        _max_iterations: u32,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            // Tools are never executed; the prompt alone decides JSON output.
            let system = request.system.to_lowercase();
            let json_mode = system.contains("json") || system.contains("output_keys");
            let content = mock_response_text(ResponseHints::Prompt(&request.system), json_mode);
            Ok(self.single_shot("complete_with_tools", content))
        })
    }

    fn stream<'a>(&'a self, request: ModelRequest) -> BoxedEventStream<'a> {
        let (invocation, events) = self.begin_invocation(&request);
        let provider = self.id();
        let hooks = Arc::clone(&self.hooks);

        Box::pin(stream! {
            let mut emitted = 0_usize;
            let mut terminal = None;

            for event in events {
                let kind = event.kind();
                emitted += 1;
                if kind.is_terminal() {
                    terminal = Some(kind);
                }

                hooks.on_stream_event(provider, invocation, kind);
                yield event;
            }

            hooks.on_stream_end(provider, invocation, emitted, terminal);
        })
    }
}

enum InvocationEvents {
    Scenario(ScenarioReplay),
    Fallback(FallbackEvents),
}

impl Iterator for InvocationEvents {
    type Item = StreamEvent;

    fn next(&mut self) -> Option<StreamEvent> {
        match self {
            Self::Scenario(replay) => replay.next(),
            Self::Fallback(events) => events.next(),
        }
    }
}

pub struct MockProviderBuilder {
    model: String,
    store: ScenarioStore,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl MockProviderBuilder {
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MOCK_MODEL.to_string(),
            store: ScenarioStore::default(),
            hooks: Arc::new(NoopOperationHooks),
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.store.push(scenario);
        self
    }

    pub fn scenarios(mut self, scenarios: impl IntoIterator<Item = Scenario>) -> Self {
        for scenario in scenarios {
            self.store.push(scenario);
        }
        self
    }

    /// Replaces any scenarios added so far, e.g. with a store loaded from JSON.
    pub fn scenario_store(mut self, store: ScenarioStore) -> Self {
        self.store = store;
        self
    }

    pub fn hooks<H>(self, hooks: H) -> Self
    where
        H: ProviderOperationHooks + 'static,
    {
        self.shared_hooks(Arc::new(hooks))
    }

    pub fn shared_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> MockProvider {
        MockProvider {
            fallback: FallbackGenerator::new(self.model.clone()),
            model: self.model,
            state: Mutex::new(EngineState {
                store: self.store,
                ledger: CallLedger::new(),
            }),
            hooks: self.hooks,
        }
    }
}

impl Default for MockProviderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
