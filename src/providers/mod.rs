pub mod groq;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::Role;

/// One wire-level chat message. Roles serialize lowercase, matching the
/// chat-completions message format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One inference call: model name, messages, and the fixed sampling
/// parameters sent with every turn.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

/// External inference collaborator. One call per user turn, no retries, no
/// streaming.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn generate(&self, req: GenerateRequest) -> anyhow::Result<GenerateResponse>;

    fn name(&self) -> &'static str;
}
