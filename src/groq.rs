use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama3-8b-8192";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 150;

/// Interface for sending a chat-style prompt to an LLM provider.
///
/// The handler depends only on this trait, so tests can substitute a stub
/// provider without any network access.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a system instruction followed by a user message and return the
    /// assistant's response text.
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String>;
}

/// Shared, read-only handle to the completion client.
///
/// `None` means the provider was never configured; the chat endpoint reports
/// it as unavailable and the health endpoint reflects it.
pub type CompletionHandle = Option<Arc<dyn CompletionClient>>;

/// Completion client for the Groq chat-completion API (OpenAI-compatible).
pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl GroqClient {
    /// Create a client with the fixed model settings used by the chat endpoint
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_message.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!("Sending completion request for model {}", self.model);

        let response = self
            .http
            .post(format!("{}/chat/completions", GROQ_API_BASE))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach completion API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Completion API returned {}: {}", status, body));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("Failed to parse completion API response")?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("Completion API returned no choices"))?;

        Ok(text)
    }
}
