//! Document store: the only place request handlers persist or read records.
//!
//! Every collection is a set of JSON documents keyed by a generated string id.
//! `PgStore` keeps them in PostgreSQL JSONB columns; `MemoryStore` keeps them
//! in process and backs local runs without `DATABASE_URL` as well as tests.
//!
//! `AppState` holds an `Arc<dyn Store>`, chosen at startup from config.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::analysis::PostAnalysis;
use crate::models::credentials::{ApiConfiguration, ApiConfigurationUpdate};
use crate::models::post::GeneratedPost;
use crate::models::schedule::ScheduledPost;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn get_api_config(&self, user_id: &str) -> Result<Option<ApiConfiguration>>;

    /// Creates the credential record for `user_id` or merges `update` into it
    /// atomically: keys present in the update overwrite, absent keys keep their
    /// stored value even under concurrent merges. Returns the merged record.
    async fn merge_api_config(
        &self,
        user_id: &str,
        update: ApiConfigurationUpdate,
    ) -> Result<ApiConfiguration>;

    async fn insert_generated_post(&self, post: &GeneratedPost) -> Result<()>;

    /// Looks up each id in turn. Unknown ids are skipped; the result follows
    /// the order of `ids`.
    async fn find_generated_posts(&self, ids: &[String]) -> Result<Vec<GeneratedPost>>;

    async fn insert_analysis(&self, analysis: &PostAnalysis) -> Result<()>;

    async fn insert_scheduled_post(&self, post: &ScheduledPost) -> Result<()>;

    /// Scheduled posts owned by `user_id`, earliest `scheduled_date` first.
    async fn list_scheduled_posts(&self, user_id: &str) -> Result<Vec<ScheduledPost>>;

    /// Returns `false` when no post with `id` existed.
    async fn delete_scheduled_post(&self, id: &str) -> Result<bool>;
}
