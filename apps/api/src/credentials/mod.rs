//! Provider credentials: the stored key record and key resolution shared by
//! every endpoint that calls a provider.

use crate::errors::AppError;
use crate::models::credentials::AiProvider;
use crate::models::DEFAULT_USER_ID;
use crate::store::Store;

pub mod handlers;

/// Returns the stored key for `provider`.
///
/// Fails with `AppError::Validation` when no record exists or the provider's
/// key is missing or blank; callers run this before any provider call.
pub async fn resolve_api_key(store: &dyn Store, provider: AiProvider) -> Result<String, AppError> {
    let config = store.get_api_config(DEFAULT_USER_ID).await?.ok_or_else(|| {
        AppError::Validation(
            "API configuration not found. Please configure your API keys first.".to_string(),
        )
    })?;

    config
        .key_for(provider)
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "API key for {} not configured.",
                provider.as_str()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::credentials::ApiConfigurationUpdate;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_missing_record_is_validation_error() {
        let store = MemoryStore::new();
        let err = resolve_api_key(&store, AiProvider::OpenAi).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("configuration not found")));
    }

    #[tokio::test]
    async fn test_key_resolved_per_provider() {
        let store = MemoryStore::new();
        store
            .merge_api_config("default", ApiConfigurationUpdate {
                anthropic_api_key: Some("sk-ant-1".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let key = resolve_api_key(&store, AiProvider::Anthropic).await.unwrap();
        assert_eq!(key, "sk-ant-1");

        let err = resolve_api_key(&store, AiProvider::Gemini).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "API key for gemini not configured."));
    }
}
