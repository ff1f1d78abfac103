use crate::config::GenerationSettings;
use crate::prompt::build_algorithm_prompt;
use crate::providers::{GenerateRequest, Message, ModelProvider};
use crate::sanitize::sanitize_explanation;
use crate::types::{AlgorithmRequest, AlgorithmResponse, Conversation};

pub const APOLOGY: &str = "Sorry, I encountered an error generating the algorithm explanation.";

pub const DYNAMIC_TYPING_NOTE: &str =
    "Note: This explanation assumes a dynamically typed language like Python or JavaScript.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnExitReason {
    Ok,
    ProviderError,
}

impl TurnExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnExitReason::Ok => "ok",
            TurnExitReason::ProviderError => "provider_error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub conversation: Conversation,
    pub response: AlgorithmResponse,
    pub exit_reason: TurnExitReason,
    pub error: Option<String>,
}

/// Handles one user turn: appends the user's problem description, calls the
/// provider with the built prompt, sanitizes the reply, and appends the
/// assistant turn. The conversation is threaded through by value; there is
/// no other session state. On provider failure the assistant turn records a
/// fixed apology so the history stays consistent, and the error is surfaced
/// separately for the UI banner.
pub async fn run_turn(
    mut conversation: Conversation,
    provider: &dyn ModelProvider,
    settings: &GenerationSettings,
    request: AlgorithmRequest,
) -> TurnOutcome {
    conversation.push_user(request.problem_description.clone());

    let built = build_algorithm_prompt(&request);
    let req = GenerateRequest {
        model: settings.model.clone(),
        messages: vec![Message::user(built.text)],
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
        top_p: settings.top_p,
    };

    match provider.generate(req).await {
        Ok(resp) => {
            let mut explanation = sanitize_explanation(&resp.content);
            if built.dynamic_typing {
                if !explanation.is_empty() {
                    explanation.push_str("\n\n");
                }
                explanation.push_str(DYNAMIC_TYPING_NOTE);
            }
            conversation.push_assistant(explanation.clone());
            TurnOutcome {
                conversation,
                response: AlgorithmResponse {
                    explanation_text: explanation,
                    used_dynamic_typing_framing: built.dynamic_typing,
                },
                exit_reason: TurnExitReason::Ok,
                error: None,
            }
        }
        Err(e) => {
            conversation.push_assistant(APOLOGY);
            TurnOutcome {
                conversation,
                response: AlgorithmResponse {
                    explanation_text: APOLOGY.to_string(),
                    used_dynamic_typing_framing: false,
                },
                exit_reason: TurnExitReason::ProviderError,
                error: Some(e.to_string()),
            }
        }
    }
}
