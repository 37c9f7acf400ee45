use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::Serialize;

use crate::domain::MarksForm;
use crate::errors::MarksError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// JSON error returned by every handler.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach the rejected form so the client can correct it.
    pub fn with_form(mut self, form: &MarksForm) -> Self {
        let Ok(form) = serde_json::to_value(form) else {
            return self;
        };
        match self.details.as_mut().and_then(|d| d.as_object_mut()) {
            Some(details) => {
                details.insert("form".to_string(), form);
                self
            }
            None => self.with_details(serde_json::json!({ "form": form })),
        }
    }

    /// Request body or path that could not be read as the expected shape.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "PARSE_ERROR", message)
    }

    pub fn invalid_upload(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_UPLOAD", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<MarksError> for ApiError {
    fn from(err: MarksError) -> Self {
        let status = match &err {
            MarksError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        let api_error = Self::new(status, err.code(), err.to_string());

        match err {
            MarksError::Parse { field, value } => {
                api_error.with_details(serde_json::json!({ "field": field, "value": value }))
            }
            MarksError::MissingColumns(columns) => {
                api_error.with_details(serde_json::json!({ "columns": columns }))
            }
            _ => api_error,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::parse_error(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::parse_error(rejection.body_text())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<MarksError>() {
            Ok(marks_error) => marks_error.into(),
            Err(err) => {
                error!("Request failed: {:#}", err);
                Self::internal(format!("{:#}", err))
            }
        }
    }
}
