//! The text-generation capability and its HTTP implementation.
//!
//! `HttpGenerator` talks to any OpenAI-compatible `chat/completions` endpoint.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, GenerationError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TEMPERATURE: f32 = 0.7;

const SYSTEM_MESSAGE: &str =
    "You summarize self-reported pain logs. You describe the data only and never give medical advice.";

/// `generate(prompt) -> text | error`.
///
/// Implementations may be slow and may return blank text; the orchestrator
/// treats blank output as a failed call.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

impl<T: TextGenerator> TextGenerator for &T {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, GenerationError>> + Send {
        (**self).generate(prompt)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpGeneratorConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl HttpGeneratorConfig {
    /// Read `PAINSUM_*` variables, loading `.env` first if present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_key = lookup("PAINSUM_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::new(2, "Missing PAINSUM_API_KEY in environment (.env)."))?;

        let base_url = lookup("PAINSUM_API_BASE")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let model = lookup("PAINSUM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match lookup("PAINSUM_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| AppError::new(2, format!("Invalid PAINSUM_TIMEOUT_SECS '{raw}': {e}")))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

pub struct HttpGenerator {
    client: Client,
    config: HttpGeneratorConfig,
}

impl HttpGenerator {
    pub fn new(config: HttpGeneratorConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(HttpGeneratorConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl TextGenerator for HttpGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.config.model,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(GenerationError::Status(resp.status().as_u16()));
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| GenerationError::Decode(e.to_string()))?;

        extract_text(parsed)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn extract_text(resp: ChatResponse) -> Result<String, GenerationError> {
    let text = resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if text.is_empty() {
        return Err(GenerationError::Empty);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn config_defaults() {
        let config = HttpGeneratorConfig::from_lookup(lookup(&[("PAINSUM_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_overrides_and_trims_base_url() {
        let config = HttpGeneratorConfig::from_lookup(lookup(&[
            ("PAINSUM_API_KEY", "sk-test"),
            ("PAINSUM_API_BASE", "http://localhost:11434/v1/"),
            ("PAINSUM_MODEL", "llama3"),
            ("PAINSUM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = HttpGeneratorConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let err = HttpGeneratorConfig::from_lookup(lookup(&[("PAINSUM_API_KEY", "  ")])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = HttpGeneratorConfig::from_lookup(lookup(&[
            ("PAINSUM_API_KEY", "sk-test"),
            ("PAINSUM_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn extract_text_from_response() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  You logged 3 entries.  "}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(resp).unwrap(), "You logged 3 entries.");
    }

    #[test]
    fn blank_or_missing_content_is_empty() {
        let blank: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap();
        assert!(matches!(extract_text(blank), Err(GenerationError::Empty)));

        let none: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(extract_text(none), Err(GenerationError::Empty)));
    }
}
