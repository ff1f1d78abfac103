use std::fmt;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::providers::{GenerateRequest, GenerateResponse, Message, ModelProvider};
use crate::types::Role;

pub const MOCK_OK: &str = "mock: step-by-step explanation";
/// Reply containing every noise pattern the sanitizer removes.
pub const MOCK_NOISY: &str =
    "<think>internal reasoning</think>Step 1: scan.\n```python\nx = 1\n```\nStep 2: merge.\nAlgorithm: restated";

const FAIL_MARKER: &str = "__mock_fail__:";
const NOISY_MARKER: &str = "__mock_noisy__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockProviderError {
    ScriptedFailure { message: String },
    EmptyFailureMessage,
}

impl fmt::Display for MockProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScriptedFailure { message } => {
                write!(f, "mock provider scripted failure: {message}")
            }
            Self::EmptyFailureMessage => {
                write!(f, "mock provider failure marker must include a message")
            }
        }
    }
}

impl std::error::Error for MockProviderError {}

/// Deterministic provider for tests. Markers anywhere in the latest user
/// message drive the behavior, so they survive being embedded in a built
/// prompt: a failure marker fails with a typed error carrying the rest of
/// its line, a noisy marker returns output full of sanitizer targets, and
/// anything else gets a fixed canned reply.
#[derive(Debug, Clone, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    fn build_response(&self, req: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        let content = match latest_user_content(&req.messages) {
            Some(c) => c,
            None => {
                return Ok(GenerateResponse {
                    content: MOCK_OK.to_string(),
                    usage: None,
                })
            }
        };

        if let Some(idx) = content.find(FAIL_MARKER) {
            let rest = &content[idx + FAIL_MARKER.len()..];
            let message = rest.lines().next().unwrap_or("").trim();
            if message.is_empty() {
                return Err(anyhow!(MockProviderError::EmptyFailureMessage));
            }
            return Err(anyhow!(MockProviderError::ScriptedFailure {
                message: message.to_string(),
            }));
        }

        if content.contains(NOISY_MARKER) {
            return Ok(GenerateResponse {
                content: MOCK_NOISY.to_string(),
                usage: None,
            });
        }

        Ok(GenerateResponse {
            content: MOCK_OK.to_string(),
            usage: None,
        })
    }
}

fn latest_user_content(messages: &[Message]) -> Option<&str> {
    messages
        .iter()
        .rev()
        .find(|m| matches!(m.role, Role::User))
        .map(|m| m.content.as_str())
}

#[async_trait]
impl ModelProvider for MockProvider {
    async fn generate(&self, req: GenerateRequest) -> anyhow::Result<GenerateResponse> {
        self.build_response(&req)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
