use std::collections::BTreeMap;

use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::models::credentials::{AiProvider, ApiConfiguration, ApiConfigurationUpdate};
use crate::models::DEFAULT_USER_ID;
use crate::state::AppState;

/// POST /api/config
///
/// Creates the credential record on first call; later calls overwrite only
/// the keys present in the body.
pub async fn handle_upsert_config(
    State(state): State<AppState>,
    Json(update): Json<ApiConfigurationUpdate>,
) -> Result<Json<ApiConfiguration>, AppError> {
    let config = state
        .store
        .merge_api_config(DEFAULT_USER_ID, update)
        .await?;

    let configured: Vec<_> = AiProvider::ALL
        .iter()
        .filter(|p| config.key_for(**p).is_some())
        .map(|p| p.as_str())
        .collect();
    info!("API configuration saved; providers with keys: {configured:?}");

    Ok(Json(config))
}

/// GET /api/config
///
/// Returns an empty, unsaved record when nothing is stored yet.
pub async fn handle_get_config(
    State(state): State<AppState>,
) -> Result<Json<ApiConfiguration>, AppError> {
    let config = state
        .store
        .get_api_config(DEFAULT_USER_ID)
        .await?
        .unwrap_or_default();
    Ok(Json(config))
}

/// GET /api/available-models
pub async fn handle_available_models() -> Json<BTreeMap<&'static str, &'static [&'static str]>> {
    Json(
        AiProvider::ALL
            .iter()
            .map(|p| (p.as_str(), p.available_models()))
            .collect(),
    )
}
