use serde::{Deserialize, Serialize};

/// Request payload for the chat endpoint
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Response payload for a successful chat completion
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub success: bool,
}

/// Response payload for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub groq_configured: bool,
}

impl ChatRequest {
    /// The user message with surrounding whitespace removed
    pub fn trimmed_message(&self) -> &str {
        self.message.trim()
    }
}

impl ChatResponse {
    pub fn new(response: String) -> Self {
        Self {
            response,
            success: true,
        }
    }
}

impl HealthResponse {
    pub fn new(groq_configured: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            groq_configured,
        }
    }
}
