//! Small convenience constructors for common types.

use crate::{
    Message, MockProvider, ModelRequest, ProviderId, Role, SafeProviderHooks, Scenario,
    TracingObservabilityHooks,
};

pub fn system_message(content: impl Into<String>) -> Message {
    Message::new(Role::System, content)
}

pub fn user_message(content: impl Into<String>) -> Message {
    Message::new(Role::User, content)
}

pub fn assistant_message(content: impl Into<String>) -> Message {
    Message::new(Role::Assistant, content)
}

pub fn tool_message(content: impl Into<String>) -> Message {
    Message::new(Role::Tool, content)
}

/// Single user turn with a system prompt.
pub fn request(system: impl Into<String>, user_input: impl Into<String>) -> ModelRequest {
    ModelRequest::new(vec![user_message(user_input)]).with_system(system)
}

/// Mock provider that logs every invocation through `tracing`.
pub fn observed_mock_provider(scenarios: Vec<Scenario>) -> MockProvider {
    MockProvider::builder()
        .scenarios(scenarios)
        .hooks(SafeProviderHooks::new(TracingObservabilityHooks))
        .build()
}

pub fn parse_provider_id(value: &str) -> Option<ProviderId> {
    match value.trim().to_ascii_lowercase().as_str() {
        "anthropic" | "claude" => Some(ProviderId::Anthropic),
        "litellm" | "lite-llm" | "lite_llm" => Some(ProviderId::LiteLlm),
        "mock" | "fake" => Some(ProviderId::Mock),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::{ModelProvider, ProviderId, Role, collect_events, text_scenario};

    use super::{observed_mock_provider, parse_provider_id, request, user_message};

    #[test]
    fn parse_provider_id_supports_aliases() {
        assert_eq!(parse_provider_id("Anthropic"), Some(ProviderId::Anthropic));
        assert_eq!(parse_provider_id("claude"), Some(ProviderId::Anthropic));
        assert_eq!(parse_provider_id(" lite-llm "), Some(ProviderId::LiteLlm));
        assert_eq!(parse_provider_id("mock"), Some(ProviderId::Mock));
        assert_eq!(parse_provider_id("unknown"), None);
    }

    #[test]
    fn message_and_request_helpers_apply_expected_defaults() {
        let message = user_message("hello");
        assert_eq!(message.role, Role::User);

        let request = request("Be terse.", "hello");
        assert_eq!(request.system, "Be terse.");
        assert_eq!(request.messages, vec![message]);
        assert_eq!(request.tools, None);
    }

    #[tokio::test]
    async fn observed_mock_provider_replays_scenarios() {
        let provider = observed_mock_provider(vec![text_scenario("traced")]);

        let events = collect_events(provider.stream(request("", "hi"))).await;

        assert_eq!(events, text_scenario("traced").events());
        assert_eq!(provider.id(), ProviderId::Mock);
    }
}
