use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::analysis::PostAnalysis;
use crate::models::credentials::{ApiConfiguration, ApiConfigurationUpdate};
use crate::models::post::GeneratedPost;
use crate::models::schedule::ScheduledPost;
use crate::store::Store;

/// PostgreSQL-backed store. Each record lives as one JSONB `doc` column next
/// to the handful of scalar columns used for lookups and ordering.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn get_api_config(&self, user_id: &str) -> Result<Option<ApiConfiguration>> {
        let doc = sqlx::query_scalar::<_, Json<ApiConfiguration>>(
            "SELECT doc FROM api_configurations WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to load API configuration")?;

        Ok(doc.map(|Json(config)| config))
    }

    async fn merge_api_config(
        &self,
        user_id: &str,
        update: ApiConfigurationUpdate,
    ) -> Result<ApiConfiguration> {
        let mut fresh = ApiConfiguration::for_user(user_id);
        fresh.apply(update.clone());

        // Only the keys present in the update, plus the new timestamp. `||`
        // merges them into the stored document inside the upsert itself.
        let mut patch = serde_json::to_value(&update).context("Failed to encode config update")?;
        if let Value::Object(fields) = &mut patch {
            fields.insert(
                "updated_at".to_string(),
                serde_json::to_value(fresh.updated_at)?,
            );
        }

        let Json(merged) = sqlx::query_scalar::<_, Json<ApiConfiguration>>(
            r#"
            INSERT INTO api_configurations (user_id, doc, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id)
            DO UPDATE SET doc = api_configurations.doc || $4,
                          updated_at = EXCLUDED.updated_at
            RETURNING doc
            "#,
        )
        .bind(user_id)
        .bind(Json(&fresh))
        .bind(fresh.updated_at)
        .bind(Json(patch))
        .fetch_one(&self.pool)
        .await
        .context("Failed to save API configuration")?;

        Ok(merged)
    }

    async fn insert_generated_post(&self, post: &GeneratedPost) -> Result<()> {
        sqlx::query(
            "INSERT INTO generated_posts (id, user_id, doc, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&post.id)
        .bind(&post.user_id)
        .bind(Json(post))
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to insert generated post {}", post.id))?;

        Ok(())
    }

    async fn find_generated_posts(&self, ids: &[String]) -> Result<Vec<GeneratedPost>> {
        let rows = sqlx::query_as::<_, (String, Json<GeneratedPost>)>(
            "SELECT id, doc FROM generated_posts WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load generated posts")?;

        let by_id: HashMap<String, GeneratedPost> = rows
            .into_iter()
            .map(|(id, Json(post))| (id, post))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
    }

    async fn insert_analysis(&self, analysis: &PostAnalysis) -> Result<()> {
        sqlx::query("INSERT INTO post_analyses (id, doc, created_at) VALUES ($1, $2, $3)")
            .bind(&analysis.id)
            .bind(Json(analysis))
            .bind(analysis.created_at)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to insert post analysis {}", analysis.id))?;

        Ok(())
    }

    async fn insert_scheduled_post(&self, post: &ScheduledPost) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO scheduled_posts (id, user_id, doc, scheduled_date, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&post.id)
        .bind(&post.user_id)
        .bind(Json(post))
        .bind(post.scheduled_date)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to insert scheduled post {}", post.id))?;

        Ok(())
    }

    async fn list_scheduled_posts(&self, user_id: &str) -> Result<Vec<ScheduledPost>> {
        let docs = sqlx::query_scalar::<_, Json<ScheduledPost>>(
            r#"
            SELECT doc FROM scheduled_posts
            WHERE user_id = $1
            ORDER BY scheduled_date ASC, created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list scheduled posts")?;

        Ok(docs.into_iter().map(|Json(post)| post).collect())
    }

    async fn delete_scheduled_post(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM scheduled_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete scheduled post {id}"))?;

        Ok(result.rows_affected() > 0)
    }
}
