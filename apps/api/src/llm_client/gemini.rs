//! Gemini `generateContent` wire format.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{decode_response, CompletionRequest, LlmError};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        Some(text)
    }
}

pub(super) async fn complete(
    client: &Client,
    base: &str,
    request: &CompletionRequest<'_>,
) -> Result<String, LlmError> {
    let body = GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: request.system,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part {
                text: request.prompt,
            }],
        }],
    };

    let response = client
        .post(format!("{base}/models/{}:generateContent", request.model))
        .header("x-goog-api-key", request.api_key)
        .json(&body)
        .send()
        .await?;

    let reply: GenerateResponse = decode_response(response).await?;

    if let Some(usage) = &reply.usage_metadata {
        debug!(
            "gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
            usage.prompt_token_count, usage.candidates_token_count
        );
    }

    reply.text().ok_or(LlmError::EmptyContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_parts_of_first_candidate() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "world"}]}},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 3}
        }"#;
        let reply: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(reply.text().as_deref(), Some("Hello, world"));
    }

    #[test]
    fn test_blocked_prompt_has_no_text() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let reply: GenerateResponse = serde_json::from_str(body).unwrap();
        assert!(reply.text().is_none());
    }

    #[test]
    fn test_request_omits_role_on_system_instruction() {
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: "sys" }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: "hi" }],
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value["system_instruction"].get("role").is_none());
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
    }
}
