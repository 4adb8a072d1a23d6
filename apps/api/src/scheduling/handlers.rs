use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::schedule::{ScheduledPost, ScheduledPostCreate};
use crate::scheduling::{delete_scheduled_post, list_scheduled_posts, schedule_post};
use crate::state::AppState;

/// POST /api/schedule-post
pub async fn handle_schedule_post(
    State(state): State<AppState>,
    Json(create): Json<ScheduledPostCreate>,
) -> Result<Json<ScheduledPost>, AppError> {
    Ok(Json(schedule_post(state.store.as_ref(), create).await?))
}

/// GET /api/scheduled-posts
pub async fn handle_list_scheduled_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScheduledPost>>, AppError> {
    Ok(Json(list_scheduled_posts(state.store.as_ref()).await?))
}

/// DELETE /api/scheduled-posts/:id
pub async fn handle_delete_scheduled_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    delete_scheduled_post(state.store.as_ref(), &id).await?;
    Ok(Json(json!({ "message": "Scheduled post deleted successfully" })))
}
