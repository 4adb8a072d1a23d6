//! Response interpretation: turns a provider reply into a `PostContent`.
//!
//! A reply is `Structured` whenever it is strict JSON holding an object.
//! Fields are then read one by one: `content` always, `hashtags` and
//! `meta_description` only when the request asked for them, so a malformed
//! field the request never wanted cannot spoil the rest. Anything that is not
//! a JSON object is kept as `Raw` text and used verbatim as the post body;
//! that is a degraded result, not an error.

use serde_json::{Map, Value};
use tracing::warn;

use crate::models::post::{GenerationRequest, Platform, PostContent};

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply {
    Structured(Map<String, Value>),
    Raw(String),
}

impl ProviderReply {
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(fields)) => ProviderReply::Structured(fields),
            _ => ProviderReply::Raw(text.to_string()),
        }
    }

    /// Builds the platform's content. Hashtags and meta description survive
    /// only when the request asked for them.
    pub fn into_post_content(self, platform: Platform, request: &GenerationRequest) -> PostContent {
        match self {
            ProviderReply::Structured(fields) => PostContent {
                platform,
                content: string_field(&fields, "content").unwrap_or_default(),
                hashtags: request
                    .include_hashtags
                    .then(|| hashtags_field(&fields))
                    .flatten(),
                meta_description: request
                    .include_seo_optimization
                    .then(|| string_field(&fields, "meta_description"))
                    .flatten(),
            },
            ProviderReply::Raw(text) => {
                warn!(
                    "Reply for {} was not structured JSON; keeping raw text ({} chars)",
                    platform.as_str(),
                    text.len()
                );
                PostContent {
                    platform,
                    content: text,
                    hashtags: None,
                    meta_description: None,
                }
            }
        }
    }
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(Value::as_str).map(str::to_string)
}

/// A JSON array of strings. Non-string entries are skipped; any other shape
/// counts as absent.
fn hashtags_field(fields: &Map<String, Value>) -> Option<Vec<String>> {
    fields.get("hashtags").and_then(Value::as_array).map(|tags| {
        tags.iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

/// Interprets one provider reply for one platform.
pub fn interpret_reply(text: &str, platform: Platform, request: &GenerationRequest) -> PostContent {
    ProviderReply::parse(text).into_post_content(platform, request)
}
