pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::credentials::handlers as credentials;
use crate::errors::AppError;
use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::scheduling::handlers as scheduling;
use crate::state::AppState;

async fn image_search_disabled() -> Result<(), AppError> {
    Err(AppError::NotImplemented(
        "Image search integration is disabled".to_string(),
    ))
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Credentials
        .route(
            "/config",
            get(credentials::handle_get_config).post(credentials::handle_upsert_config),
        )
        .route("/available-models", get(credentials::handle_available_models))
        // Generation
        .route("/generate-posts", post(generation::handle_generate_posts))
        .route("/rewrite-content", post(generation::handle_rewrite_content))
        .route("/analyze-post", post(generation::handle_analyze_post))
        // Scheduling
        .route("/schedule-post", post(scheduling::handle_schedule_post))
        .route("/scheduled-posts", get(scheduling::handle_list_scheduled_posts))
        .route(
            "/scheduled-posts/:id",
            delete(scheduling::handle_delete_scheduled_post),
        )
        // Export
        .route("/export-posts/:format", get(export::handle_export_posts))
        .route("/search-images", get(image_search_disabled));

    // A nested "/" only matches "/api", so the slash form is routed here.
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/", get(health::root_handler))
        .nest("/api", api)
        .with_state(state)
}
