use axum::{
    extract::{Path, State},
    response::Json,
};
use std::sync::Arc;

use super::{parse_semester, AppState};
use crate::analytics::StudentReport;
use crate::api::error::ApiError;

pub async fn get_student(
    State(state): State<Arc<AppState>>,
    Path((semester, usn)): Path<(String, String)>,
) -> Result<Json<StudentReport>, ApiError> {
    let semester = parse_semester(&semester)?;
    Ok(Json(state.reporting().student_records(semester, &usn)?))
}
