//! Deterministic mock provider: scenario replay, fallback generation, and
//! the ledger of recorded invocations.

mod fallback;
mod ledger;
mod provider;
mod scenario;

pub use fallback::{
    FallbackEvents, FallbackGenerator, PLAIN_MOCK_RESPONSE, ResponseHints, extract_output_keys,
    mock_response_text,
};
pub use ledger::{CallLedger, InvocationRecord};
pub use provider::{DEFAULT_MOCK_MODEL, MockProvider, MockProviderBuilder};
pub use scenario::{
    Scenario, ScenarioBuilder, ScenarioReplay, ScenarioStore, ScenarioStoreError,
    ScenarioStoreErrorKind, connection_lost_scenario, error_scenario, text_scenario,
    text_scenario_with_usage, tool_call_scenario, tool_call_scenario_with,
};
