use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use algoassist::config::{
    load_config, resolve_api_key, settings_summary, GenerationSettings,
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS,
};
use algoassist::providers::groq::GroqProvider;
use algoassist::providers::ModelProvider;
use algoassist::tui::run_chat;
use algoassist::turn::{run_turn, TurnExitReason};
use algoassist::types::{AlgorithmRequest, Conversation};

#[derive(Parser)]
#[command(
    name = "algoassist",
    version,
    about = "Chat assistant for step-by-step, code-free algorithm explanations"
)]
struct Cli {
    /// API key for the inference endpoint; falls back to GROQ_API_KEY.
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Path to assistant.yaml; defaults to ./assistant.yaml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model name override.
    #[arg(long, global = true)]
    model: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Target language for the explanation ("Any" for no preference).
    #[arg(long)]
    language: Option<String>,

    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT_MS)]
    connect_timeout_ms: u64,

    /// Per-request timeout; 0 disables it.
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_MS)]
    request_timeout_ms: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// One-shot: print the explanation for a single problem and exit.
    Ask {
        problem: String,
        #[arg(long)]
        language: Option<String>,
    },
    /// Print version and build information.
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Version) = &cli.command {
        println!(
            "algoassist {} (git {}, target {}, built {})",
            env!("CARGO_PKG_VERSION"),
            env!("ALGOASSIST_GIT_SHA"),
            env!("ALGOASSIST_TARGET"),
            env!("ALGOASSIST_BUILD_TIME_UTC")
        );
        return Ok(());
    }

    let mut settings = GenerationSettings::default();
    let mut config_language = None;
    let mut config_base_url = None;
    let config_path = cli.config.clone().or_else(|| {
        let p = PathBuf::from("assistant.yaml");
        p.exists().then_some(p)
    });
    if let Some(path) = config_path {
        let cfg = load_config(&path)?;
        cfg.apply_to(&mut settings);
        config_language = cfg.target_language;
        config_base_url = cfg.base_url;
        eprintln!("INFO: loaded assistant config from {}", path.display());
    }
    if let Some(model) = &cli.model {
        settings.model = model.clone();
    }

    let api_key = resolve_api_key(cli.api_key.as_deref())?;
    let mut provider = GroqProvider::new(api_key, cli.connect_timeout_ms, cli.request_timeout_ms)?;
    if let Some(base_url) = cli.base_url.clone().or(config_base_url) {
        provider = provider.with_base_url(base_url);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    let session_language = cli
        .language
        .clone()
        .or(config_language)
        .unwrap_or_else(|| "Any".to_string());

    match cli.command {
        Some(Commands::Ask { problem, language }) => {
            let language = language.unwrap_or(session_language);
            let request = AlgorithmRequest::new(problem).with_language(language);
            let outcome = runtime.block_on(run_turn(
                Conversation::new(),
                &provider,
                &settings,
                request,
            ));
            match outcome.exit_reason {
                TurnExitReason::Ok => {
                    println!("{}", outcome.response.explanation_text);
                    Ok(())
                }
                TurnExitReason::ProviderError => {
                    eprintln!(
                        "ERROR: turn ended with {}: {}",
                        outcome.exit_reason.as_str(),
                        outcome.error.unwrap_or_else(|| "unknown error".to_string())
                    );
                    std::process::exit(1);
                }
            }
        }
        None => {
            eprintln!(
                "INFO: starting chat (provider={}, {})",
                provider.name(),
                settings_summary(&settings)
            );
            run_chat(&runtime, &provider, &settings, &session_language)
        }
        Some(Commands::Version) => Ok(()),
    }
}
