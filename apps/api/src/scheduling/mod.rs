//! Post scheduling: plain CRUD. Nothing advances a post's status; a
//! scheduled post stays `scheduled` until it is deleted.

use tracing::info;

use crate::errors::AppError;
use crate::models::schedule::{ScheduledPost, ScheduledPostCreate};
use crate::models::DEFAULT_USER_ID;
use crate::store::Store;

pub mod handlers;

pub async fn schedule_post(
    store: &dyn Store,
    create: ScheduledPostCreate,
) -> Result<ScheduledPost, AppError> {
    if create.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let post = ScheduledPost::from(create);
    store.insert_scheduled_post(&post).await?;
    info!(
        "Scheduled post {} for {} at {}",
        post.id,
        post.platform.as_str(),
        post.scheduled_date
    );
    Ok(post)
}

pub async fn list_scheduled_posts(store: &dyn Store) -> Result<Vec<ScheduledPost>, AppError> {
    Ok(store.list_scheduled_posts(DEFAULT_USER_ID).await?)
}

pub async fn delete_scheduled_post(store: &dyn Store, id: &str) -> Result<(), AppError> {
    if !store.delete_scheduled_post(id).await? {
        return Err(AppError::NotFound("Scheduled post not found".to_string()));
    }
    info!("Deleted scheduled post {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::post::Platform;
    use crate::models::schedule::ScheduleStatus;
    use crate::store::MemoryStore;

    fn create(content: &str) -> ScheduledPostCreate {
        ScheduledPostCreate {
            platform: Platform::Linkedin,
            content: content.to_string(),
            hashtags: Some(vec!["#hiring".to_string()]),
            scheduled_date: Utc.with_ymd_and_hms(2026, 11, 2, 9, 30, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_new_post_is_scheduled_and_listed() {
        let store = MemoryStore::new();

        let post = schedule_post(&store, create("We're hiring!")).await.unwrap();

        assert_eq!(post.status, ScheduleStatus::Scheduled);
        assert_eq!(post.user_id, DEFAULT_USER_ID);
        let listed = list_scheduled_posts(&store).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, post.id);
    }

    #[tokio::test]
    async fn test_delete_removes_from_listing() {
        let store = MemoryStore::new();
        let keep = schedule_post(&store, create("keep")).await.unwrap();
        let removed = schedule_post(&store, create("drop")).await.unwrap();

        delete_scheduled_post(&store, &removed.id).await.unwrap();

        let ids: Vec<_> = list_scheduled_posts(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![keep.id]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = delete_scheduled_post(&store, "does-not-exist").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blank_content_rejected() {
        let store = MemoryStore::new();
        let err = schedule_post(&store, create("  ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(list_scheduled_posts(&store).await.unwrap().is_empty());
    }
}
