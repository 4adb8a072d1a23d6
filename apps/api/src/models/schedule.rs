use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::post::Platform;
use crate::models::DEFAULT_USER_ID;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    #[default]
    Scheduled,
    Published,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledPost {
    pub id: String,
    pub user_id: String,
    pub platform: Platform,
    pub content: String,
    pub hashtags: Option<Vec<String>>,
    pub scheduled_date: DateTime<Utc>,
    pub status: ScheduleStatus,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/schedule-post`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledPostCreate {
    pub platform: Platform,
    pub content: String,
    #[serde(default)]
    pub hashtags: Option<Vec<String>>,
    pub scheduled_date: DateTime<Utc>,
}

impl From<ScheduledPostCreate> for ScheduledPost {
    fn from(create: ScheduledPostCreate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            platform: create.platform,
            content: create.content,
            hashtags: create.hashtags,
            scheduled_date: create.scheduled_date,
            status: ScheduleStatus::Scheduled,
            created_at: Utc::now(),
        }
    }
}
