//! Analysis handlers
//!
//! Lab reports and prescriptions arrive as multipart uploads with a single
//! `file` field; diagnosis takes a JSON symptom record.

use axum::{
    Json,
    extract::{Multipart, State},
};
use application::ApplicationError;
use domain::{AnalysisReport, MAX_SYMPTOMS_CHARS, SymptomRecord, TaskKind, UploadedFile};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Name of the multipart field carrying the upload
pub const UPLOAD_FIELD: &str = "file";

/// Successful analysis
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub task: TaskKind,
    /// Formatted HTML fragment, not escaped
    pub html: String,
    pub model: String,
    pub latency_ms: u64,
}

impl From<AnalysisReport> for AnalysisResponse {
    fn from(report: AnalysisReport) -> Self {
        Self {
            task: report.task,
            html: report.formatted.into_inner(),
            model: report.model,
            latency_ms: report.latency_ms,
        }
    }
}

/// Diagnosis request body
///
/// Age and gender are checked by the domain; only the symptom text length
/// is checked here.
#[derive(Debug, Deserialize, Validate)]
pub struct DiagnoseRequest {
    pub age: i64,
    pub gender: String,
    #[validate(length(max = MAX_SYMPTOMS_CHARS, message = "description is too long"))]
    pub symptoms: String,
}

/// Summarize an uploaded lab report
#[instrument(skip(state, multipart))]
pub async fn lab_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let upload = read_upload(multipart).await?;
    let report = state.assistant.summarize_lab_report(upload).await?;
    Ok(Json(report.into()))
}

/// Explain an uploaded prescription
#[instrument(skip(state, multipart))]
pub async fn prescription(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let upload = read_upload(multipart).await?;
    let report = state.assistant.summarize_prescription(upload).await?;
    Ok(Json(report.into()))
}

/// Diagnose from a symptom record
#[instrument(skip(state, request), fields(age = request.age))]
pub async fn diagnose(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<DiagnoseRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let record = SymptomRecord::new(request.age, &request.gender, request.symptoms)
        .map_err(ApplicationError::from)?;
    let report = state.assistant.diagnose(record).await?;
    Ok(Json(report.into()))
}

/// Take the `file` field of a multipart body
///
/// Other fields are skipped. The declared content type wins over the file
/// extension when it is one we recognize.
async fn read_upload(mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let declared = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?;

        debug!(file = %name, declared = ?declared, size = bytes.len(), "Received upload");
        return UploadedFile::new(&name, bytes.to_vec(), declared.as_deref())
            .map_err(|e| ApplicationError::from(e).into());
    }

    Err(ApiError::BadRequest(format!(
        "Missing multipart field `{UPLOAD_FIELD}`"
    )))
}
