use serde::{Deserialize, Serialize};

use crate::database::StudentSubjectRecord;
use crate::domain::Semester;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListResponse {
    pub semester: Semester,
    pub total: usize,
    pub records: Vec<StudentSubjectRecord>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectListResponse {
    pub semester: Semester,
    pub subjects: Vec<String>,
}

#[derive(Serialize)]
pub struct DuplicateResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UploadParams {
    pub weighting: Option<String>,
}
