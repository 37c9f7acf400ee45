use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    health,
    semesters::{delete_record, get_dashboard, get_records, submit_record, upload_sheet},
    students::get_student,
    subjects::{get_subject_dashboard, get_subjects, upload_subject_sheet},
    toppers::get_toppers,
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.storage.max_upload_bytes;

    let semester_routes = Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/records", get(get_records).post(submit_record))
        .route("/records/:id", delete(delete_record))
        .route("/upload", post(upload_sheet))
        .route("/subjects", get(get_subjects))
        .route("/subjects/:subject", get(get_subject_dashboard))
        .route("/subjects/:subject/upload", post(upload_subject_sheet))
        .route("/students/:usn", get(get_student));

    Router::new()
        .route("/health", get(health))
        .nest("/api/semesters/:semester", semester_routes)
        .route("/api/toppers/:scope", get(get_toppers))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
