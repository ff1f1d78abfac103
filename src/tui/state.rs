use crate::turn::{TurnExitReason, TurnOutcome};
use crate::types::Conversation;

/// State backing the chat view. The conversation is owned here between
/// turns and handed to `run_turn` by value when the user submits.
pub struct ChatUiState {
    pub conversation: Conversation,
    pub input: String,
    /// Transcript scroll offset in lines; `usize::MAX` pins to the bottom.
    pub scroll: usize,
    pub busy: bool,
    pub error_banner: Option<String>,
    pub target_language: String,
}

impl ChatUiState {
    pub fn new(target_language: String) -> Self {
        Self {
            conversation: Conversation::new(),
            input: String::new(),
            scroll: usize::MAX,
            busy: false,
            error_banner: None,
            target_language,
        }
    }

    /// Drains the input box for submission.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    pub fn apply_outcome(&mut self, outcome: TurnOutcome) {
        self.conversation = outcome.conversation;
        self.error_banner = match outcome.exit_reason {
            TurnExitReason::Ok => None,
            TurnExitReason::ProviderError => Some(format!(
                "inference failed: {}",
                outcome.error.unwrap_or_else(|| "unknown error".to_string())
            )),
        };
        self.busy = false;
        self.scroll = usize::MAX;
    }
}
