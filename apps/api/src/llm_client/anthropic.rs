//! Anthropic Messages API wire format.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{decode_response, CompletionRequest, LlmError};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicResponse {
    /// Text of the first text block.
    fn text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text)
    }
}

pub(super) async fn complete(
    client: &Client,
    base: &str,
    request: &CompletionRequest<'_>,
) -> Result<String, LlmError> {
    let body = AnthropicRequest {
        model: request.model,
        max_tokens: MAX_TOKENS,
        system: request.system,
        messages: vec![AnthropicMessage {
            role: "user",
            content: request.prompt,
        }],
    };

    let response = client
        .post(format!("{base}/messages"))
        .header("x-api-key", request.api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&body)
        .send()
        .await?;

    let reply: AnthropicResponse = decode_response(response).await?;

    debug!(
        "anthropic call succeeded: input_tokens={}, output_tokens={}",
        reply.usage.input_tokens, reply.usage.output_tokens
    );

    reply.text().ok_or(LlmError::EmptyContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_skips_non_text_blocks() {
        let body = r#"{
            "content": [
                {"type": "thinking", "thinking": "..."},
                {"type": "text", "text": "{\"content\": \"hi\"}"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 4}
        }"#;
        let reply: AnthropicResponse = serde_json::from_str(body).unwrap();
        assert_eq!(reply.text().as_deref(), Some("{\"content\": \"hi\"}"));
    }

    #[test]
    fn test_text_none_when_no_text_block() {
        let body = r#"{"content": [], "usage": {"input_tokens": 1, "output_tokens": 0}}"#;
        let reply: AnthropicResponse = serde_json::from_str(body).unwrap();
        assert!(reply.text().is_none());
    }
}
