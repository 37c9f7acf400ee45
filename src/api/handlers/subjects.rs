use axum::{
    extract::{Multipart, Path, Query, State},
    response::Json,
};
use std::sync::Arc;

use super::{parse_semester, AppState};
use crate::analytics::SubjectDashboard;
use crate::api::error::ApiError;
use crate::api::models::{SubjectListResponse, UploadParams};
use crate::api::parsers::upload::{read_sheet, weighting_or};
use crate::services::ingestion::IngestionReport;

pub async fn get_subjects(
    State(state): State<Arc<AppState>>,
    Path(semester): Path<String>,
) -> Result<Json<SubjectListResponse>, ApiError> {
    let semester = parse_semester(&semester)?;
    let subjects = state.reporting().subjects(semester)?;

    Ok(Json(SubjectListResponse { semester, subjects }))
}

pub async fn get_subject_dashboard(
    State(state): State<Arc<AppState>>,
    Path((semester, subject)): Path<(String, String)>,
) -> Result<Json<SubjectDashboard>, ApiError> {
    let semester = parse_semester(&semester)?;
    Ok(Json(state.reporting().subject_dashboard(semester, &subject)?))
}

/// Ingest a sheet whose rows all belong to the subject in the path.
pub async fn upload_subject_sheet(
    State(state): State<Arc<AppState>>,
    Path((semester, subject)): Path<(String, String)>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Result<Json<IngestionReport>, ApiError> {
    let semester = parse_semester(&semester)?;
    let scheme = weighting_or(params.weighting.as_deref(), state.config.grading.weighting_scheme)?;
    let sheet = read_sheet(&mut multipart).await?;

    let report = state
        .ingestion(scheme)
        .ingest_bytes(semester, &sheet, Some(subject.trim()))?;
    Ok(Json(report))
}
