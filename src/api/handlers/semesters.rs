use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Multipart, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::info;
use std::sync::Arc;

use super::{parse_semester, AppState};
use crate::analytics::SemesterDashboard;
use crate::api::error::ApiError;
use crate::api::models::{DeleteResponse, DuplicateResponse, RecordListResponse, UploadParams};
use crate::api::parsers::upload::{read_sheet, weighting_or};
use crate::domain::MarksForm;
use crate::services::entry::SubmitOutcome;
use crate::services::ingestion::IngestionReport;

pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Path(semester): Path<String>,
) -> Result<Json<SemesterDashboard>, ApiError> {
    let semester = parse_semester(&semester)?;
    Ok(Json(state.reporting().semester_dashboard(semester)?))
}

pub async fn get_records(
    State(state): State<Arc<AppState>>,
    Path(semester): Path<String>,
) -> Result<Json<RecordListResponse>, ApiError> {
    let semester = parse_semester(&semester)?;
    let records = state.reporting().records(semester)?;

    Ok(Json(RecordListResponse {
        semester,
        total: records.len(),
        records,
    }))
}

pub async fn submit_record(
    State(state): State<Arc<AppState>>,
    Path(semester): Path<String>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let semester = parse_semester(&semester)?;
    let Json(body) = payload?;
    let form: MarksForm = serde_json::from_value(body.clone()).map_err(|e| {
        ApiError::parse_error(format!("Invalid marks form: {}", e))
            .with_details(serde_json::json!({ "form": body }))
    })?;

    match state.entry().submit(semester, &form) {
        Ok(SubmitOutcome::Created(record)) => Ok((StatusCode::CREATED, Json(record)).into_response()),
        Ok(SubmitOutcome::Duplicate) => Ok(Json(DuplicateResponse { status: "duplicate" }).into_response()),
        Err(e) => Err(ApiError::from(e).with_form(&form)),
    }
}

pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, i64)>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path((semester, record_id)) = path?;
    let semester = parse_semester(&semester)?;

    if !state.stores.delete(semester, record_id)? {
        return Err(ApiError::not_found(format!(
            "Record {} not found in semester {}",
            record_id, semester
        )));
    }

    info!("Deleted record {} from semester {}", record_id, semester);
    Ok(Json(DeleteResponse { deleted: true }))
}

pub async fn upload_sheet(
    State(state): State<Arc<AppState>>,
    Path(semester): Path<String>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Result<Json<IngestionReport>, ApiError> {
    let semester = parse_semester(&semester)?;
    let scheme = weighting_or(params.weighting.as_deref(), state.config.grading.weighting_scheme)?;
    let sheet = read_sheet(&mut multipart).await?;

    let report = state.ingestion(scheme).ingest_bytes(semester, &sheet, None)?;
    Ok(Json(report))
}
