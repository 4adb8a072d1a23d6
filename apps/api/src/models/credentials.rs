use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::DEFAULT_USER_ID;

/// Chat-completion vendor selected per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    OpenAi,
    Anthropic,
    Gemini,
    Groq,
}

impl AiProvider {
    pub const ALL: [AiProvider; 4] = [
        AiProvider::OpenAi,
        AiProvider::Anthropic,
        AiProvider::Gemini,
        AiProvider::Groq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => "openai",
            AiProvider::Anthropic => "anthropic",
            AiProvider::Gemini => "gemini",
            AiProvider::Groq => "groq",
        }
    }

    /// Models offered for this provider by `GET /api/available-models`.
    pub fn available_models(&self) -> &'static [&'static str] {
        match self {
            AiProvider::OpenAi => &[
                "gpt-4.1",
                "gpt-4.1-mini",
                "gpt-4.1-nano",
                "o4-mini",
                "o3-mini",
                "o3",
                "o1-mini",
                "gpt-4o-mini",
            ],
            AiProvider::Anthropic => &[
                "claude-sonnet-4-20250514",
                "claude-opus-4-20250514",
                "claude-3-7-sonnet-20250219",
                "claude-3-5-haiku-20241022",
                "claude-3-5-sonnet-20241022",
            ],
            AiProvider::Gemini => &[
                "gemini-2.5-flash-preview-04-17",
                "gemini-2.5-pro-preview-05-06",
                "gemini-2.0-flash",
                "gemini-2.0-flash-preview-image-generation",
                "gemini-2.0-flash-lite",
                "gemini-1.5-flash",
                "gemini-1.5-flash-8b",
                "gemini-1.5-pro",
            ],
            AiProvider::Groq => &[
                "llama-3.1-70b-versatile",
                "llama-3.1-8b-instant",
                "mixtral-8x7b-32768",
            ],
        }
    }
}

/// Stored provider credentials. One record per user scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfiguration {
    pub id: String,
    pub user_id: String,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/config`. Absent fields keep their stored value.
///
/// Serializes to an object holding only the present keys, which is the patch
/// merged into the stored JSONB document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfigurationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anthropic_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groq_api_key: Option<String>,
}

impl Default for ApiConfiguration {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            openai_api_key: None,
            anthropic_api_key: None,
            gemini_api_key: None,
            groq_api_key: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl ApiConfiguration {
    /// An empty record owned by `user_id`.
    pub fn for_user(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }

    fn slot(&self, provider: AiProvider) -> &Option<String> {
        match provider {
            AiProvider::OpenAi => &self.openai_api_key,
            AiProvider::Anthropic => &self.anthropic_api_key,
            AiProvider::Gemini => &self.gemini_api_key,
            AiProvider::Groq => &self.groq_api_key,
        }
    }

    fn slot_mut(&mut self, provider: AiProvider) -> &mut Option<String> {
        match provider {
            AiProvider::OpenAi => &mut self.openai_api_key,
            AiProvider::Anthropic => &mut self.anthropic_api_key,
            AiProvider::Gemini => &mut self.gemini_api_key,
            AiProvider::Groq => &mut self.groq_api_key,
        }
    }

    /// The stored key for `provider`, if one is set and not blank.
    pub fn key_for(&self, provider: AiProvider) -> Option<&str> {
        self.slot(provider)
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Merges an update into this record: fields present in the update win.
    pub fn apply(&mut self, update: ApiConfigurationUpdate) {
        let ApiConfigurationUpdate {
            openai_api_key,
            anthropic_api_key,
            gemini_api_key,
            groq_api_key,
        } = update;
        let incoming = [
            (AiProvider::OpenAi, openai_api_key),
            (AiProvider::Anthropic, anthropic_api_key),
            (AiProvider::Gemini, gemini_api_key),
            (AiProvider::Groq, groq_api_key),
        ];
        for (provider, value) in incoming {
            if value.is_some() {
                *self.slot_mut(provider) = value;
            }
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_for_ignores_blank_keys() {
        let config = ApiConfiguration {
            openai_api_key: Some("   ".to_string()),
            groq_api_key: Some("gsk-123".to_string()),
            ..Default::default()
        };
        assert_eq!(config.key_for(AiProvider::OpenAi), None);
        assert_eq!(config.key_for(AiProvider::Groq), Some("gsk-123"));
        assert_eq!(config.key_for(AiProvider::Anthropic), None);
    }

    #[test]
    fn test_apply_keeps_fields_absent_from_update() {
        let mut config = ApiConfiguration {
            openai_api_key: Some("sk-old".to_string()),
            gemini_api_key: Some("gm-old".to_string()),
            ..Default::default()
        };
        let created_at = config.created_at;

        config.apply(ApiConfigurationUpdate {
            openai_api_key: Some("sk-new".to_string()),
            ..Default::default()
        });

        assert_eq!(config.openai_api_key.as_deref(), Some("sk-new"));
        assert_eq!(config.gemini_api_key.as_deref(), Some("gm-old"));
        assert_eq!(config.created_at, created_at);
        assert!(config.updated_at >= created_at);
    }

    #[test]
    fn test_update_serializes_only_present_keys() {
        let update = ApiConfigurationUpdate {
            groq_api_key: Some("gsk-9".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "groq_api_key": "gsk-9" })
        );
    }

    #[test]
    fn test_provider_wire_names() {
        let names: Vec<_> = AiProvider::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["openai", "anthropic", "gemini", "groq"]);
        let parsed: AiProvider = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(parsed, AiProvider::Anthropic);
    }
}
