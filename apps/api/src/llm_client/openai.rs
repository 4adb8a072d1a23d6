//! OpenAI chat-completions wire format (also served by Groq).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{decode_response, CompletionRequest, LlmError};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

pub(super) async fn complete(
    client: &Client,
    base: &str,
    request: &CompletionRequest<'_>,
) -> Result<String, LlmError> {
    let body = ChatRequest {
        model: request.model,
        messages: [
            ChatMessage {
                role: "system",
                content: request.system,
            },
            ChatMessage {
                role: "user",
                content: request.prompt,
            },
        ],
    };

    let response = client
        .post(format!("{base}/chat/completions"))
        .bearer_auth(request.api_key)
        .json(&body)
        .send()
        .await?;

    let reply: ChatResponse = decode_response(response).await?;

    if let Some(usage) = &reply.usage {
        debug!(
            "{} call succeeded: prompt_tokens={}, completion_tokens={}",
            request.provider.as_str(),
            usage.prompt_tokens,
            usage.completion_tokens
        );
    }

    reply
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(LlmError::EmptyContent)
}
