use anyhow::{Context, Result};
use std::env;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "text-embedding-ada-002";
const DEFAULT_CORPUS: &str = "data/corpus.json";
const DEFAULT_TYPING_DELAY_MS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub corpus_path: String,
    /// Delay between revealed characters. 0 disables the animation.
    pub typing_delay_ms: u64,
}

impl Config {
    /// Reads configuration from the environment. The corpus path may also be
    /// given as the first CLI argument, which takes precedence.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;

        let api_base =
            env::var("FAQBOT_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model =
            env::var("FAQBOT_EMBEDDING_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let corpus_path = env::args()
            .nth(1)
            .or_else(|| env::var("FAQBOT_CORPUS").ok())
            .unwrap_or_else(|| DEFAULT_CORPUS.to_string());

        let typing_delay_ms = env::var("FAQBOT_TYPING_DELAY_MS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TYPING_DELAY_MS);

        Ok(Config {
            api_key,
            api_base,
            model,
            corpus_path,
            typing_delay_ms,
        })
    }
}
