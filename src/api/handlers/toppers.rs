use axum::{
    extract::{Path, State},
    response::Json,
};
use std::sync::Arc;

use super::AppState;
use crate::analytics::TopperComparison;
use crate::api::error::ApiError;
use crate::config::TopperScope;

pub async fn get_toppers(
    State(state): State<Arc<AppState>>,
    Path(scope): Path<String>,
) -> Result<Json<TopperComparison>, ApiError> {
    let scope = scope.parse::<TopperScope>()?;
    Ok(Json(state.reporting().toppers(scope)?))
}
