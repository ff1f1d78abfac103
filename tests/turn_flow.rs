use algoassist::config::GenerationSettings;
use algoassist::providers::mock::{MockProvider, MOCK_OK};
use algoassist::turn::{run_turn, TurnExitReason, APOLOGY, DYNAMIC_TYPING_NOTE};
use algoassist::types::{AlgorithmRequest, Conversation, Role};

fn settings() -> GenerationSettings {
    GenerationSettings::default()
}

#[tokio::test]
async fn successful_turn_appends_user_then_assistant() {
    let provider = MockProvider::new();
    let outcome = run_turn(
        Conversation::new(),
        &provider,
        &settings(),
        AlgorithmRequest::new("reverse a linked list"),
    )
    .await;

    assert_eq!(outcome.exit_reason, TurnExitReason::Ok);
    assert!(outcome.error.is_none());
    let turns = outcome.conversation.turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, Role::User);
    assert_eq!(turns[0].content, "reverse a linked list");
    assert_eq!(turns[1].role, Role::Assistant);
    assert_eq!(turns[1].content, MOCK_OK);
    assert!(!outcome.response.used_dynamic_typing_framing);
}

#[tokio::test]
async fn provider_failure_records_apology_turn() {
    let provider = MockProvider::new();
    let outcome = run_turn(
        Conversation::new(),
        &provider,
        &settings(),
        AlgorithmRequest::new("__mock_fail__: rate limited"),
    )
    .await;

    assert_eq!(outcome.exit_reason, TurnExitReason::ProviderError);
    assert_eq!(outcome.exit_reason.as_str(), "provider_error");
    let turns = outcome.conversation.turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].content, APOLOGY);
    assert_eq!(outcome.response.explanation_text, APOLOGY);
    assert!(outcome
        .error
        .as_deref()
        .expect("error text")
        .contains("rate limited"));
}

#[tokio::test]
async fn dynamic_typing_note_is_appended_for_python() {
    let provider = MockProvider::new();
    let outcome = run_turn(
        Conversation::new(),
        &provider,
        &settings(),
        AlgorithmRequest::new("merge intervals").with_language("Python"),
    )
    .await;

    assert!(outcome.response.used_dynamic_typing_framing);
    assert!(outcome
        .response
        .explanation_text
        .ends_with(DYNAMIC_TYPING_NOTE));
    // The note lands in the recorded turn too, not just the response.
    assert!(outcome.conversation.turns()[1]
        .content
        .ends_with(DYNAMIC_TYPING_NOTE));
}

#[tokio::test]
async fn no_note_for_statically_typed_target() {
    let provider = MockProvider::new();
    let outcome = run_turn(
        Conversation::new(),
        &provider,
        &settings(),
        AlgorithmRequest::new("merge intervals").with_language("Rust"),
    )
    .await;

    assert!(!outcome.response.used_dynamic_typing_framing);
    assert!(!outcome.response.explanation_text.contains(DYNAMIC_TYPING_NOTE));
}

#[tokio::test]
async fn noisy_reply_is_sanitized_before_recording() {
    let provider = MockProvider::new();
    let outcome = run_turn(
        Conversation::new(),
        &provider,
        &settings(),
        AlgorithmRequest::new("__mock_noisy__ longest common subsequence"),
    )
    .await;

    let text = &outcome.response.explanation_text;
    assert!(!text.contains("<think>"));
    assert!(!text.contains("```"));
    assert!(!text.contains("Algorithm:"));
    assert!(text.contains("Step 1: scan."));
    assert!(text.contains("Step 2: merge."));
}

#[tokio::test]
async fn empty_problem_description_still_completes() {
    let provider = MockProvider::new();
    let outcome = run_turn(
        Conversation::new(),
        &provider,
        &settings(),
        AlgorithmRequest::new(""),
    )
    .await;

    assert_eq!(outcome.exit_reason, TurnExitReason::Ok);
    assert_eq!(outcome.conversation.turns()[0].content, "");
    assert_eq!(outcome.conversation.turns()[1].content, MOCK_OK);
}

#[tokio::test]
async fn history_accumulates_across_turns_in_order() {
    let provider = MockProvider::new();
    let settings = settings();

    let first = run_turn(
        Conversation::new(),
        &provider,
        &settings,
        AlgorithmRequest::new("first question"),
    )
    .await;
    let second = run_turn(
        first.conversation,
        &provider,
        &settings,
        AlgorithmRequest::new("__mock_fail__: down"),
    )
    .await;

    let turns = second.conversation.turns();
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[0].content, "first question");
    assert_eq!(turns[1].content, MOCK_OK);
    assert_eq!(turns[2].content, "__mock_fail__: down");
    assert_eq!(turns[3].content, APOLOGY);
}
