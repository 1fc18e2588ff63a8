use std::sync::Arc;

use cprovider::{
    EventKind, Message, MockProvider, ModelProvider, ModelRequest, Role, ScenarioStore,
    StopReason, StreamEvent, StreamOutcome, ToolDefinition, check_stream_contract,
    collect_events, connection_lost_scenario, error_scenario, text_scenario,
    text_scenario_with_usage, tool_call_scenario, tool_call_scenario_with,
};
use futures_util::StreamExt;
use serde_json::json;

fn hi() -> ModelRequest {
    ModelRequest::new(vec![Message::new(Role::User, "hi")])
}

async fn collect(provider: &MockProvider, request: ModelRequest) -> Vec<StreamEvent> {
    collect_events(provider.stream(request)).await
}

fn text_deltas(events: &[StreamEvent]) -> Vec<(&str, &str)> {
    events
        .iter()
        .filter_map(|event| match event {
            StreamEvent::TextDelta { content, snapshot } => {
                Some((content.as_str(), snapshot.as_str()))
            }
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn fallback_streams_deltas_then_text_end_then_finish() {
    let provider = MockProvider::new();
    let events = collect(&provider, hi()).await;

    let kinds = events.iter().map(StreamEvent::kind).collect::<Vec<_>>();
    let (head, tail) = kinds.split_last_chunk::<2>().expect("at least two events");
    assert!(!head.is_empty());
    assert!(head.iter().all(|kind| *kind == EventKind::TextDelta));
    assert_eq!(tail, &[EventKind::TextEnd, EventKind::Finish]);

    let outcome = StreamOutcome::from_events(&events);
    let finish = outcome.finish.expect("finish event");
    assert_eq!(finish.stop_reason, StopReason::MockComplete);
    assert_eq!(finish.model, "mock-model");
    assert!(check_stream_contract(&events).is_ok());
}

#[tokio::test]
async fn fallback_snapshots_grow_and_end_with_full_text() {
    let provider = MockProvider::builder().model("mock-test").build();
    let events = collect(&provider, hi()).await;

    let deltas = text_deltas(&events);
    for pair in deltas.windows(2) {
        assert!(pair[1].1.starts_with(pair[0].1));
    }

    let concatenated = deltas.iter().map(|(content, _)| *content).collect::<String>();
    let full_text = events
        .iter()
        .find_map(|event| match event {
            StreamEvent::TextEnd { full_text } => Some(full_text.as_str()),
            _ => None,
        })
        .expect("text end");
    assert_eq!(full_text, concatenated);
    assert_eq!(deltas.last().map(|(_, snapshot)| *snapshot), Some(full_text));
}

#[tokio::test]
async fn fallback_finish_reports_zero_token_usage() {
    let provider = MockProvider::new();
    let plain = collect(&provider, hi()).await;
    let json = collect(&provider, hi().with_system("Respond with keys: a, b")).await;

    for events in [plain, json] {
        assert!(matches!(
            events.last(),
            Some(StreamEvent::Finish {
                stop_reason: StopReason::MockComplete,
                input_tokens: 0,
                output_tokens: 0,
                ..
            })
        ));
    }
}

#[tokio::test]
async fn fallback_finish_reports_configured_model() {
    let provider = MockProvider::builder().model("gpt-test").build();
    let events = collect(&provider, hi()).await;

    assert!(matches!(
        events.last(),
        Some(StreamEvent::Finish { model, .. }) if model == "gpt-test"
    ));
}

#[tokio::test]
async fn text_scenario_yields_delta_and_stop_finish() {
    let provider = MockProvider::with_scenarios("mock-model", vec![text_scenario("Hello world")]);
    let events = collect(&provider, hi()).await;

    assert_eq!(
        events,
        vec![
            StreamEvent::text_delta("Hello world", "Hello world"),
            StreamEvent::finish(StopReason::Stop, "mock", 10, 5),
        ]
    );
}

#[tokio::test]
async fn text_scenario_respects_custom_usage() {
    let provider = MockProvider::with_scenarios(
        "mock-model",
        vec![text_scenario_with_usage("ok", 100, 50)],
    );
    let events = collect(&provider, hi()).await;

    assert!(matches!(
        events.last(),
        Some(StreamEvent::Finish {
            input_tokens: 100,
            output_tokens: 50,
            ..
        })
    ));
}

#[tokio::test]
async fn tool_call_scenarios_replay_call_and_finish() {
    let provider = MockProvider::builder()
        .scenario(tool_call_scenario("search", json!({ "query": "test" })))
        .scenario(tool_call_scenario_with(
            "run",
            json!({ "cmd": "ls" }),
            "custom_123",
            "Let me check",
        ))
        .build();

    let plain = collect(&provider, hi()).await;
    assert_eq!(plain.len(), 2);
    assert_eq!(
        plain[0],
        StreamEvent::tool_call("call_1", "search", json!({ "query": "test" }))
    );
    assert!(matches!(
        &plain[1],
        StreamEvent::Finish { stop_reason: StopReason::ToolCalls, .. }
    ));

    let with_text = collect(&provider, hi()).await;
    let outcome = StreamOutcome::from_events(&with_text);
    assert_eq!(with_text.len(), 3);
    assert_eq!(outcome.text, "Let me check");
    assert_eq!(outcome.tool_calls.len(), 1);
    assert_eq!(outcome.tool_calls[0].id, "custom_123");
}

#[tokio::test]
async fn error_scenarios_end_the_stream_with_an_error_event() {
    let provider = MockProvider::builder()
        .scenario(connection_lost_scenario())
        .scenario(error_scenario("Rate limit", true))
        .build();

    let lost = collect(&provider, hi()).await;
    assert_eq!(lost, vec![StreamEvent::error("Connection lost", false)]);
    assert!(!StreamOutcome::from_events(&lost).is_success());

    let limited = collect(&provider, hi()).await;
    assert_eq!(limited, vec![StreamEvent::error("Rate limit", true)]);
}

#[tokio::test]
async fn scenarios_cycle_across_calls() {
    let provider = MockProvider::builder()
        .scenario(text_scenario("first"))
        .scenario(text_scenario("second"))
        .build();

    let contents = [
        collect(&provider, hi()).await,
        collect(&provider, hi()).await,
        collect(&provider, hi()).await,
    ]
    .iter()
    .map(|events| StreamOutcome::from_events(events).text)
    .collect::<Vec<_>>();

    assert_eq!(contents, vec!["first", "second", "first"]);
}

#[tokio::test]
async fn single_scenario_wraps_around_and_counts_calls() {
    let provider = MockProvider::with_scenarios("mock-model", vec![text_scenario("hello world")]);

    for _ in 0..3 {
        let events = collect(&provider, hi()).await;
        assert_eq!(events[0], StreamEvent::text_delta("hello world", "hello world"));
    }

    assert_eq!(provider.call_index(), 3);
    assert_eq!(provider.stream_calls().len(), 3);
}

#[tokio::test]
async fn stream_calls_capture_messages_system_and_tools() {
    let provider = MockProvider::with_scenarios("mock-model", vec![text_scenario("ok")]);
    let tools = vec![
        ToolDefinition::new("search", "Searches the index")
            .with_input_schema(json!({ "type": "object", "required": ["query"] })),
    ];

    let _ = collect(
        &provider,
        hi().with_system("Be helpful")
            .with_tools(tools.clone())
            .with_metadata("trace_id", "t-1"),
    )
    .await;

    let calls = provider.stream_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].messages, vec![Message::new(Role::User, "hi")]);
    assert_eq!(calls[0].system, "Be helpful");
    assert_eq!(calls[0].tools, Some(tools));
}

#[tokio::test]
async fn stream_calls_are_recorded_in_fallback_mode_too() {
    let provider = MockProvider::new();
    let _ = collect(&provider, hi()).await;

    let last = provider.last_stream_call().expect("one call recorded");
    assert_eq!(last.system, "");
    assert_eq!(last.tools, None);
}

#[tokio::test]
async fn no_arg_construction_starts_empty_and_still_streams() {
    let provider = MockProvider::new();
    assert_eq!(provider.model(), "mock-model");
    assert_eq!(provider.scenario_count(), 0);
    assert_eq!(provider.call_index(), 0);
    assert!(provider.stream_calls().is_empty());

    let events = collect(&provider, hi()).await;
    assert!(events.len() >= 2);
}

#[tokio::test]
async fn scenarios_loaded_from_json_drive_the_stream() {
    let store = ScenarioStore::from_json_str(
        r#"[
            [
                {"type": "reasoning_start"},
                {"type": "reasoning_delta", "content": "thinking"},
                {"type": "text_delta", "content": "done", "snapshot": "done"},
                {"type": "text_end", "full_text": "done"},
                {"type": "finish", "stop_reason": "stop", "model": "fixture", "input_tokens": 1, "output_tokens": 1}
            ]
        ]"#,
    )
    .expect("valid fixture");
    let provider = MockProvider::builder().scenario_store(store).build();

    let events = collect(&provider, hi()).await;
    let outcome = StreamOutcome::from_events(&events);

    assert_eq!(outcome.reasoning, "thinking");
    assert_eq!(outcome.text, "done");
    assert!(outcome.is_success());
    assert!(check_stream_contract(&events).is_ok());
}

#[tokio::test]
async fn overlapping_streams_keep_their_call_time_scenarios() {
    let provider = Arc::new(
        MockProvider::builder()
            .scenario(text_scenario("A"))
            .scenario(text_scenario("B"))
            .build(),
    );

    let first = provider.stream(hi());
    let second = provider.stream(hi());
    let (first, second) = tokio::join!(collect_events(first), collect_events(second));

    assert_eq!(StreamOutcome::from_events(&first).text, "A");
    assert_eq!(StreamOutcome::from_events(&second).text, "B");
}

#[tokio::test]
async fn concurrent_tasks_each_record_exactly_one_call() {
    let provider = Arc::new(MockProvider::with_scenarios(
        "mock-model",
        vec![text_scenario("x"), text_scenario("y")],
    ));

    let handles = (0..16)
        .map(|_| {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move {
                let mut stream = provider.stream(hi());
                let mut count = 0;
                while stream.next().await.is_some() {
                    count += 1;
                }
                count
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        assert_eq!(handle.await.expect("task should finish"), 2);
    }

    assert_eq!(provider.call_index(), 16);
    assert_eq!(provider.stream_calls().len(), 16);
}
