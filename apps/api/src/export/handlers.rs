use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::AppError;
use crate::export::{export_posts, ExportFile, ExportFormat};
use crate::state::AppState;

/// Collects ids from repeated `post_ids` parameters; a single parameter may
/// also carry a comma-separated list.
fn collect_post_ids(params: &[(String, String)]) -> Vec<String> {
    params
        .iter()
        .filter(|(key, _)| key == "post_ids")
        .flat_map(|(_, value)| value.split(','))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// GET /api/export-posts/:format?post_ids=...
pub async fn handle_export_posts(
    State(state): State<AppState>,
    Path(format): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ExportFile>, AppError> {
    let format: ExportFormat = format.parse()?;

    let post_ids = collect_post_ids(&params);
    if post_ids.is_empty() {
        return Err(AppError::Validation(
            "post_ids query parameter is required".to_string(),
        ));
    }

    Ok(Json(
        export_posts(state.store.as_ref(), format, &post_ids).await?,
    ))
}
