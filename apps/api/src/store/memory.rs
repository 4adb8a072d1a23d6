use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::analysis::PostAnalysis;
use crate::models::credentials::{ApiConfiguration, ApiConfigurationUpdate};
use crate::models::post::GeneratedPost;
use crate::models::schedule::ScheduledPost;
use crate::store::Store;

/// In-process store. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    api_configs: RwLock<HashMap<String, ApiConfiguration>>,
    generated_posts: RwLock<HashMap<String, GeneratedPost>>,
    analyses: RwLock<Vec<PostAnalysis>>,
    scheduled_posts: RwLock<Vec<ScheduledPost>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored generated posts.
    #[cfg(test)]
    pub async fn generated_post_count(&self) -> usize {
        self.generated_posts.read().await.len()
    }

    #[cfg(test)]
    pub async fn analysis_count(&self) -> usize {
        self.analyses.read().await.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_api_config(&self, user_id: &str) -> Result<Option<ApiConfiguration>> {
        Ok(self.api_configs.read().await.get(user_id).cloned())
    }

    async fn merge_api_config(
        &self,
        user_id: &str,
        update: ApiConfigurationUpdate,
    ) -> Result<ApiConfiguration> {
        // Read-modify-write under one write guard.
        let mut configs = self.api_configs.write().await;
        let config = configs
            .entry(user_id.to_string())
            .or_insert_with(|| ApiConfiguration::for_user(user_id));
        config.apply(update);
        Ok(config.clone())
    }

    async fn insert_generated_post(&self, post: &GeneratedPost) -> Result<()> {
        self.generated_posts
            .write()
            .await
            .insert(post.id.clone(), post.clone());
        Ok(())
    }

    async fn find_generated_posts(&self, ids: &[String]) -> Result<Vec<GeneratedPost>> {
        let posts = self.generated_posts.read().await;
        Ok(ids.iter().filter_map(|id| posts.get(id).cloned()).collect())
    }

    async fn insert_analysis(&self, analysis: &PostAnalysis) -> Result<()> {
        self.analyses.write().await.push(analysis.clone());
        Ok(())
    }

    async fn insert_scheduled_post(&self, post: &ScheduledPost) -> Result<()> {
        self.scheduled_posts.write().await.push(post.clone());
        Ok(())
    }

    async fn list_scheduled_posts(&self, user_id: &str) -> Result<Vec<ScheduledPost>> {
        let mut posts: Vec<ScheduledPost> = self
            .scheduled_posts
            .read()
            .await
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal dates.
        posts.sort_by_key(|p| p.scheduled_date);
        Ok(posts)
    }

    async fn delete_scheduled_post(&self, id: &str) -> Result<bool> {
        let mut posts = self.scheduled_posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::models::post::Platform;
    use crate::models::schedule::ScheduledPostCreate;

    fn scheduled(content: &str, hours_from_now: i64) -> ScheduledPost {
        ScheduledPostCreate {
            platform: Platform::Twitter,
            content: content.to_string(),
            hashtags: None,
            scheduled_date: Utc::now() + Duration::hours(hours_from_now),
        }
        .into()
    }

    #[tokio::test]
    async fn test_scheduled_posts_listed_by_date() {
        let store = MemoryStore::new();
        store.insert_scheduled_post(&scheduled("later", 48)).await.unwrap();
        store.insert_scheduled_post(&scheduled("sooner", 1)).await.unwrap();

        let listed = store.list_scheduled_posts("default").await.unwrap();
        let contents: Vec<_> = listed.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, vec!["sooner", "later"]);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_post_existed() {
        let store = MemoryStore::new();
        let post = scheduled("hello", 2);
        store.insert_scheduled_post(&post).await.unwrap();

        assert!(store.delete_scheduled_post(&post.id).await.unwrap());
        assert!(!store.delete_scheduled_post(&post.id).await.unwrap());
        assert!(store.list_scheduled_posts("default").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_api_config_merge_overwrites_present_keys_only() {
        let store = MemoryStore::new();
        let first = store
            .merge_api_config(
                "default",
                ApiConfigurationUpdate {
                    openai_api_key: Some("sk-1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let merged = store
            .merge_api_config(
                "default",
                ApiConfigurationUpdate {
                    gemini_api_key: Some("gm-1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(merged.id, first.id);
        assert_eq!(merged.openai_api_key.as_deref(), Some("sk-1"));
        assert_eq!(merged.gemini_api_key.as_deref(), Some("gm-1"));
        assert!(store.get_api_config("someone-else").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_merges_keep_both_keys() {
        let store = Arc::new(MemoryStore::new());
        let tasks: Vec<_> = [
            ApiConfigurationUpdate {
                openai_api_key: Some("sk-a".to_string()),
                ..Default::default()
            },
            ApiConfigurationUpdate {
                gemini_api_key: Some("gm-b".to_string()),
                ..Default::default()
            },
            ApiConfigurationUpdate {
                groq_api_key: Some("gsk-c".to_string()),
                ..Default::default()
            },
        ]
        .into_iter()
        .map(|update| {
            let store = store.clone();
            tokio::spawn(async move { store.merge_api_config("default", update).await })
        })
        .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let stored = store.get_api_config("default").await.unwrap().unwrap();
        assert_eq!(stored.openai_api_key.as_deref(), Some("sk-a"));
        assert_eq!(stored.gemini_api_key.as_deref(), Some("gm-b"));
        assert_eq!(stored.groq_api_key.as_deref(), Some("gsk-c"));
    }
}
