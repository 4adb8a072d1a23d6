/// LLM Client: the single point of entry for all chat-completion calls.
///
/// No other module talks to a provider API directly; handlers resolve a key
/// and hand a `CompletionRequest` to the `ChatProvider` carried in `AppState`.
///
/// One attempt per call: provider failures surface to the caller as-is.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::debug;

use crate::models::credentials::AiProvider;

mod anthropic;
mod gemini;
mod openai;
pub mod prompts;
#[cfg(test)]
pub mod scripted;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Everything needed for one chat completion.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub provider: AiProvider,
    pub model: &'a str,
    pub api_key: &'a str,
    pub system: &'a str,
    pub prompt: &'a str,
}

/// A chat-completion backend. `LlmClient` is the production implementation;
/// tests substitute a scripted one.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Sends one system + user message pair and returns the reply text.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError>;
}

/// Base URLs per provider. Defaults point at the public vendor endpoints.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub openai: String,
    pub anthropic: String,
    pub gemini: String,
    pub groq: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            openai: OPENAI_API_BASE.to_string(),
            anthropic: ANTHROPIC_API_BASE.to_string(),
            gemini: GEMINI_API_BASE.to_string(),
            groq: GROQ_API_BASE.to_string(),
        }
    }
}

impl ProviderEndpoints {
    fn base_for(&self, provider: AiProvider) -> &str {
        let base = match provider {
            AiProvider::OpenAi => &self.openai,
            AiProvider::Anthropic => &self.anthropic,
            AiProvider::Gemini => &self.gemini,
            AiProvider::Groq => &self.groq,
        };
        base.trim_end_matches('/')
    }
}

/// HTTP client for every supported provider. Cloning shares the connection pool.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoints: ProviderEndpoints,
}

impl LlmClient {
    pub fn new(timeout: Duration, endpoints: ProviderEndpoints) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoints,
        })
    }
}

#[async_trait]
impl ChatProvider for LlmClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        let base = self.endpoints.base_for(request.provider);
        debug!(
            "Dispatching prompt to {} model {} ({} chars)",
            request.provider.as_str(),
            request.model,
            request.prompt.len()
        );

        let text = match request.provider {
            // Groq speaks the OpenAI chat-completions dialect.
            AiProvider::OpenAi | AiProvider::Groq => {
                openai::complete(&self.client, base, &request).await?
            }
            AiProvider::Anthropic => anthropic::complete(&self.client, base, &request).await?,
            AiProvider::Gemini => gemini::complete(&self.client, base, &request).await?,
        };

        if text.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Decodes a successful response body, or turns a non-2xx response into
/// `LlmError::Api` carrying the provider's own error message when it has one.
async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, LlmError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        // OpenAI, Groq, Anthropic and Gemini all nest the message under `error.message`.
        let message = serde_json::from_str::<ProviderError>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        return Err(LlmError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use axum::{
        http::{HeaderMap, StatusCode, Uri},
        response::IntoResponse,
        Json, Router,
    };
    use serde_json::json;

    use super::*;

    #[test]
    fn test_endpoints_trim_trailing_slash() {
        let endpoints = ProviderEndpoints {
            groq: "http://localhost:9000/openai/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            endpoints.base_for(AiProvider::Groq),
            "http://localhost:9000/openai/v1"
        );
        assert_eq!(endpoints.base_for(AiProvider::Gemini), GEMINI_API_BASE);
    }

    #[test]
    fn test_provider_error_message_extraction() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        let parsed: ProviderError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "Incorrect API key provided");
    }

    #[test]
    fn test_api_error_display_includes_status() {
        let err = LlmError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 401): invalid x-api-key");
    }

    /// Serves `app` on a loopback port and points every provider at it.
    async fn stub_vendor(app: Router) -> ProviderEndpoints {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/", listener.local_addr().unwrap());
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        ProviderEndpoints {
            openai: base.clone(),
            anthropic: base.clone(),
            gemini: base.clone(),
            groq: base,
        }
    }

    async fn call(endpoints: ProviderEndpoints, provider: AiProvider) -> Result<String, LlmError> {
        let client = LlmClient::new(Duration::from_secs(5), endpoints).unwrap();
        client
            .complete(CompletionRequest {
                provider,
                model: "test-model",
                api_key: "key-123",
                system: "sys",
                prompt: "hello",
            })
            .await
    }

    #[tokio::test]
    async fn test_error_status_surfaces_provider_message() {
        let endpoints = stub_vendor(Router::new().fallback(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": { "message": "Incorrect API key provided", "type": "auth" } })),
            )
        }))
        .await;

        let err = call(endpoints, AiProvider::OpenAi).await.unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_with_plain_body_keeps_body() {
        let endpoints = stub_vendor(Router::new().fallback(|| async {
            (StatusCode::SERVICE_UNAVAILABLE, "upstream overloaded")
        }))
        .await;

        let err = call(endpoints, AiProvider::Anthropic).await.unwrap_err();

        assert!(matches!(
            err,
            LlmError::Api { status: 503, ref message } if message == "upstream overloaded"
        ));
    }

    #[tokio::test]
    async fn test_groq_uses_chat_completions_with_bearer_key() {
        let endpoints = stub_vendor(Router::new().fallback(
            |uri: Uri, headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({
                    "choices": [{ "message": { "content": format!("{} {auth}", uri.path()) } }]
                }))
                .into_response()
            },
        ))
        .await;

        let reply = call(endpoints, AiProvider::Groq).await.unwrap();

        assert_eq!(reply, "/chat/completions Bearer key-123");
    }

    #[tokio::test]
    async fn test_blank_reply_is_empty_content() {
        let endpoints = stub_vendor(Router::new().fallback(|| async {
            Json(json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] }))
        }))
        .await;

        let err = call(endpoints, AiProvider::Gemini).await.unwrap_err();

        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_success_body_that_is_not_json_is_parse_error() {
        let endpoints = stub_vendor(Router::new().fallback(|| async { "<html>gateway</html>" })).await;

        let err = call(endpoints, AiProvider::OpenAi).await.unwrap_err();

        assert!(matches!(err, LlmError::Parse(_)));
    }
}
