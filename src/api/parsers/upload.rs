use axum::extract::Multipart;

use crate::api::error::ApiError;
use crate::grading::WeightingScheme;

/// Name of the multipart field carrying the sheet.
pub const FILE_FIELD: &str = "file";

/// Pull the uploaded sheet out of the multipart body.
pub async fn read_sheet(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_upload(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        check_extension(field.file_name())?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::invalid_upload(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ApiError::invalid_upload("Uploaded file is empty"));
        }
        return Ok(bytes.to_vec());
    }

    Err(ApiError::invalid_upload(format!("Missing multipart field '{}'", FILE_FIELD)))
}

fn check_extension(file_name: Option<&str>) -> Result<(), ApiError> {
    match file_name.and_then(|name| name.rsplit_once('.')) {
        Some((_, ext)) if !ext.eq_ignore_ascii_case("csv") => Err(ApiError::invalid_upload(format!(
            "Unsupported file type '.{}', expected .csv",
            ext
        ))),
        _ => Ok(()),
    }
}

/// Weighting for one upload, falling back to the configured scheme.
pub fn weighting_or(requested: Option<&str>, default: WeightingScheme) -> Result<WeightingScheme, ApiError> {
    match requested.map(str::trim).filter(|w| !w.is_empty()) {
        Some(name) => name.parse().map_err(ApiError::invalid_upload),
        None => Ok(default),
    }
}
