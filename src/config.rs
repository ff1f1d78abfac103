use std::path::Path;

use anyhow::{anyhow, Context};
use serde::Deserialize;

pub const API_KEY_ENV: &str = "GROQ_API_KEY";

pub const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_TOP_P: f32 = 0.5;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 120_000;

/// Model name plus the fixed sampling parameters sent with every turn.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

pub fn settings_summary(s: &GenerationSettings) -> String {
    format!(
        "params: model={} max_tokens={} temperature={} top_p={}",
        s.model, s.max_tokens, s.temperature, s.top_p
    )
}

/// Optional on-disk overrides (`assistant.yaml`). Absent fields keep their
/// defaults; the file itself is optional.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AssistantConfig {
    pub version: u32,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
}

pub fn load_config(path: &Path) -> anyhow::Result<AssistantConfig> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read assistant config: {}", path.display()))?;
    let cfg: AssistantConfig = serde_yaml::from_slice(&bytes)
        .with_context(|| format!("failed to parse assistant config: {}", path.display()))?;
    if cfg.version != 1 {
        return Err(anyhow!(
            "unsupported assistant config version {} at {}",
            cfg.version,
            path.display()
        ));
    }
    Ok(cfg)
}

impl AssistantConfig {
    pub fn apply_to(&self, settings: &mut GenerationSettings) {
        if let Some(model) = &self.model {
            settings.model = model.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            settings.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            settings.temperature = temperature;
        }
        if let Some(top_p) = self.top_p {
            settings.top_p = top_p;
        }
    }
}

/// Resolves the API credential: explicit flag first, then the environment.
/// There is no embedded fallback; a missing key is an initialization error.
pub fn resolve_api_key(flag: Option<&str>) -> anyhow::Result<String> {
    if let Some(key) = flag {
        if !key.trim().is_empty() {
            return Ok(key.trim().to_string());
        }
    }
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(anyhow!(
            "no API key: pass --api-key or set {API_KEY_ENV}"
        )),
    }
}
