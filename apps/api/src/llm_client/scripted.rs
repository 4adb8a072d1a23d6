//! Scripted chat provider for tests. Replays queued replies in order and
//! records every request it receives, without touching the network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChatProvider, CompletionRequest, LlmError};
use crate::models::credentials::AiProvider;

/// A request as seen by the scripted provider.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub provider: AiProvider,
    pub model: String,
    pub api_key: String,
    pub system: String,
    pub prompt: String,
}

#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, String>>>,
    fallback: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    /// Replies are consumed front to back; `Err` entries become provider errors.
    pub fn new(replies: Vec<Result<&str, &str>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    /// Answers every call with the same reply.
    pub fn always(reply: &str) -> Self {
        Self {
            fallback: Some(reply.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            provider: request.provider,
            model: request.model.to_string(),
            api_key: request.api_key.to_string(),
            system: request.system.to_string(),
            prompt: request.prompt.to_string(),
        });

        let next = self.replies.lock().unwrap().pop_front();
        match (next, &self.fallback) {
            (Some(Ok(reply)), _) => Ok(reply),
            (Some(Err(message)), _) => Err(LlmError::Api {
                status: 500,
                message,
            }),
            (None, Some(reply)) => Ok(reply.clone()),
            (None, None) => Err(LlmError::Api {
                status: 500,
                message: "scripted provider exhausted".to_string(),
            }),
        }
    }
}
