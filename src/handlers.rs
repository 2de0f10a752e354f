use crate::error::{AppError, AppResult};
use crate::groq::CompletionHandle;
use crate::models::{ChatRequest, ChatResponse, HealthResponse};
use axum::{Extension, response::Html, response::Json as ResponseJson};
use serde_json::Value;
use tracing::{debug, error, info};

/// Fixed system instruction sent with every completion request
const SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Provide concise, friendly responses \
     suitable for voice conversation. Keep responses conversational and not too long.";

/// Serve the chat page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Health check handler
/// Always returns 200; reports whether the completion client is configured
pub async fn health_check(
    Extension(completion): Extension<CompletionHandle>,
) -> ResponseJson<HealthResponse> {
    debug!("Health check endpoint called");
    ResponseJson(HealthResponse::new(completion.is_some()))
}

/// An empty/nil JSON payload carries no request at all: null, `false`, zero,
/// an empty string, or an empty array. An object is never treated as empty
/// here so a missing `message` field gets the field-level error instead.
fn is_empty_payload(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}

/// Chat handler: validate the request, call the completion provider, and
/// relay its answer
///
/// The body is taken raw so malformed JSON maps to the same error envelope
/// as every other failure instead of the default extractor rejection.
pub async fn chat_handler(
    Extension(completion): Extension<CompletionHandle>,
    body: String,
) -> AppResult<ResponseJson<ChatResponse>> {
    info!("Chat endpoint called");

    let data: Value = serde_json::from_str(&body).map_err(|e| {
        error!("Request body is not JSON: {}", e);
        AppError::InvalidRequest("Request must be JSON".to_string())
    })?;
    debug!("Received data: {}", data);

    if is_empty_payload(&data) {
        error!("No JSON data received");
        return Err(AppError::InvalidRequest("No data received".to_string()));
    }

    let request: ChatRequest = serde_json::from_value(data).map_err(|e| {
        error!("Request body has the wrong shape: {}", e);
        AppError::InvalidRequest("Request must be JSON".to_string())
    })?;

    let message = request.trimmed_message();
    info!("User message: {}", message);

    if message.is_empty() {
        error!("Empty message received");
        return Err(AppError::InvalidRequest("Message is required".to_string()));
    }

    let Some(client) = completion else {
        error!("Completion client is not available");
        return Err(AppError::ServiceUnavailable);
    };

    info!("Calling completion API...");
    let answer = client
        .complete(SYSTEM_PROMPT, message)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    info!("AI response generated successfully ({} chars)", answer.len());
    Ok(ResponseJson(ChatResponse::new(answer)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groq::CompletionClient;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StubClient {
        reply: Result<String, String>,
    }

    impl StubClient {
        fn ok(reply: &str) -> CompletionHandle {
            Some(Arc::new(Self {
                reply: Ok(reply.to_string()),
            }))
        }

        fn failing(message: &str) -> CompletionHandle {
            Some(Arc::new(Self {
                reply: Err(message.to_string()),
            }))
        }
    }

    #[async_trait]
    impl CompletionClient for StubClient {
        async fn complete(&self, _system_prompt: &str, _user_message: &str) -> anyhow::Result<String> {
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(anyhow!("{}", message)),
            }
        }
    }

    fn invalid_request_message(err: AppError) -> String {
        match err {
            AppError::InvalidRequest(msg) => msg,
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn health_check_reports_configured_client() {
        let ResponseJson(health) = health_check(Extension(StubClient::ok("hi"))).await;
        assert_eq!(health.status, "healthy");
        assert!(health.groq_configured);
    }

    #[tokio::test]
    async fn health_check_reports_missing_client() {
        let ResponseJson(health) = health_check(Extension(None)).await;
        assert_eq!(health.status, "healthy");
        assert!(!health.groq_configured);
    }

    #[tokio::test]
    async fn chat_rejects_non_json_body() {
        let result = chat_handler(Extension(StubClient::ok("hi")), "not json".to_string()).await;
        let msg = invalid_request_message(result.err().expect("should fail"));
        assert_eq!(msg, "Request must be JSON");
    }

    #[tokio::test]
    async fn chat_rejects_null_body() {
        let result = chat_handler(Extension(StubClient::ok("hi")), "null".to_string()).await;
        let msg = invalid_request_message(result.err().expect("should fail"));
        assert_eq!(msg, "No data received");
    }

    #[tokio::test]
    async fn chat_rejects_empty_json_payloads() {
        for body in ["[]", r#""""#, "0", "0.0", "false"] {
            let result = chat_handler(Extension(StubClient::ok("hi")), body.to_string()).await;
            let msg = invalid_request_message(result.err().expect("should fail"));
            assert_eq!(msg, "No data received", "body {}", body);
        }
    }

    #[tokio::test]
    async fn chat_rejects_missing_message() {
        let result = chat_handler(Extension(StubClient::ok("hi")), "{}".to_string()).await;
        let msg = invalid_request_message(result.err().expect("should fail"));
        assert_eq!(msg, "Message is required");
    }

    #[tokio::test]
    async fn chat_rejects_whitespace_message() {
        let body = r#"{"message": "   "}"#.to_string();
        let result = chat_handler(Extension(StubClient::ok("hi")), body).await;
        let msg = invalid_request_message(result.err().expect("should fail"));
        assert_eq!(msg, "Message is required");
    }

    #[tokio::test]
    async fn chat_fails_when_client_unavailable() {
        let body = r#"{"message": "Hello"}"#.to_string();
        let result = chat_handler(Extension(None), body).await;
        assert!(matches!(result, Err(AppError::ServiceUnavailable)));
    }

    #[tokio::test]
    async fn chat_relays_completion_text() {
        let body = r#"{"message": "Hello"}"#.to_string();
        let result = chat_handler(Extension(StubClient::ok("Hi there!")), body).await;
        let ResponseJson(response) = result.expect("should succeed");
        assert_eq!(response.response, "Hi there!");
        assert!(response.success);
    }

    #[tokio::test]
    async fn chat_surfaces_provider_failure_as_upstream_error() {
        let body = r#"{"message": "Hello"}"#.to_string();
        let result = chat_handler(Extension(StubClient::failing("rate limited")), body).await;
        match result {
            Err(AppError::Upstream(detail)) => assert!(detail.contains("rate limited")),
            other => panic!("expected Upstream error, got {:?}", other.err()),
        }
    }
}
