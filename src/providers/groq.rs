use std::fmt;
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::providers::{GenerateRequest, GenerateResponse, Message, ModelProvider, Usage};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroqProviderError {
    Http { status: u16, body: String },
    EmptyChoices,
}

impl fmt::Display for GroqProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { status, body } => {
                write!(f, "chat completion request failed (HTTP {status}): {body}")
            }
            Self::EmptyChoices => write!(f, "chat completion response contained no choices"),
        }
    }
}

impl std::error::Error for GroqProviderError {}

/// reqwest client for an OpenAI-compatible /chat/completions endpoint with
/// bearer auth. The API key is injected by the caller; it is never embedded.
pub struct GroqProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GroqProvider {
    pub fn new(api_key: String, connect_timeout_ms: u64, request_timeout_ms: u64) -> anyhow::Result<Self> {
        let mut builder =
            reqwest::Client::builder().connect_timeout(Duration::from_millis(connect_timeout_ms));
        if request_timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(request_timeout_ms));
        }
        let client = builder
            .build()
            .context("failed to build HTTP client for chat completions")?;
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[derive(Deserialize)]
struct WireMessage {
    content: String,
}

#[async_trait]
impl ModelProvider for GroqProvider {
    async fn generate(&self, req: GenerateRequest) -> anyhow::Result<GenerateResponse> {
        let wire = WireRequest {
            model: &req.model,
            messages: &req.messages,
            max_tokens: req.max_tokens,
            temperature: req.temperature,
            top_p: req.top_p,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&wire)
            .send()
            .await
            .context("chat completion request did not complete")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(GroqProviderError::Http {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            }));
        }

        let parsed: WireResponse = response
            .json()
            .await
            .context("failed to parse chat completion response")?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!(GroqProviderError::EmptyChoices))?;

        Ok(GenerateResponse {
            content: choice.message.content,
            usage: parsed.usage,
        })
    }

    fn name(&self) -> &'static str {
        "groq"
    }
}

#[cfg(test)]
mod tests {
    use super::{GroqProvider, GroqProviderError, DEFAULT_BASE_URL};
    use crate::providers::ModelProvider;

    #[test]
    fn base_url_override_strips_trailing_slash() {
        let p = GroqProvider::new("k".to_string(), 1_000, 0)
            .expect("client")
            .with_base_url("http://localhost:8080/v1/".to_string());
        assert_eq!(p.base_url, "http://localhost:8080/v1");
        assert_eq!(p.name(), "groq");
    }

    #[test]
    fn default_base_url_is_openai_compatible() {
        let p = GroqProvider::new("k".to_string(), 1_000, 30_000).expect("client");
        assert_eq!(p.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn http_error_display_carries_status() {
        let e = GroqProviderError::Http {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert!(e.to_string().contains("HTTP 429"));
    }
}
