//! Medical assistant service - the three entry points
//!
//! Each request runs end to end: validate, store the upload (if any), build
//! the prompt, call the backend serving the task, format the answer and
//! release the stored file. A stored file is released exactly once, whether
//! the call succeeded, failed or was cancelled.

use std::{fmt, sync::Arc, time::Instant};

use domain::{
    AnalysisReport, ProgressStage, SymptomRecord, Task, TaskKind, TaskPrompt, TransientArtifact,
    UploadedFile,
};
use tracing::{debug, info, instrument, warn};

use super::{BackendRegistry, artifact_guard::ArtifactGuard, PromptBuilder, ResponseFormatter};
use crate::{
    error::ApplicationError,
    ports::{
        ArtifactStorePort, ImageAttachment, InferenceBackend, InferenceResult, NoopProgress,
        ProgressPort,
    },
};

/// Orchestrates prompt building, backend dispatch and formatting
pub struct MedicalAssistantService {
    backends: BackendRegistry,
    store: Arc<dyn ArtifactStorePort>,
    progress: Arc<dyn ProgressPort>,
}

impl fmt::Debug for MedicalAssistantService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MedicalAssistantService")
            .field("backends", &self.backends)
            .finish_non_exhaustive()
    }
}

impl MedicalAssistantService {
    /// Create a new service without progress reporting
    pub fn new(backends: BackendRegistry, store: Arc<dyn ArtifactStorePort>) -> Self {
        Self {
            backends,
            store,
            progress: Arc::new(NoopProgress),
        }
    }

    /// Report diagnosis progress to `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressPort>) -> Self {
        self.progress = progress;
        self
    }

    pub const fn backends(&self) -> &BackendRegistry {
        &self.backends
    }

    /// Summarize a lab report (PDF or image)
    #[instrument(skip(self, upload), fields(file = %upload.file_name(), bytes = upload.len()))]
    pub async fn summarize_lab_report(
        &self,
        upload: UploadedFile,
    ) -> Result<AnalysisReport, ApplicationError> {
        self.analyze_upload(Task::LabReport, upload).await
    }

    /// Explain a doctor's prescription (image)
    #[instrument(skip(self, upload), fields(file = %upload.file_name(), bytes = upload.len()))]
    pub async fn summarize_prescription(
        &self,
        upload: UploadedFile,
    ) -> Result<AnalysisReport, ApplicationError> {
        self.analyze_upload(Task::Prescription, upload).await
    }

    /// Diagnose from a symptom record
    #[instrument(skip(self, record), fields(age = %record.age(), gender = %record.gender()))]
    pub async fn diagnose(
        &self,
        record: SymptomRecord,
    ) -> Result<AnalysisReport, ApplicationError> {
        let task = Task::Diagnosis(record);
        let kind = task.kind();
        let backend = self.backends.for_task(kind)?;

        self.progress.report(ProgressStage::Gathering);
        let prompt = PromptBuilder::build(&task);

        self.progress.report(ProgressStage::Analyzing);
        self.progress.report(ProgressStage::Diagnosing);
        let start = Instant::now();
        let result = backend.run(&prompt, None).await?;

        self.progress.report(ProgressStage::Finalizing);
        let report = Self::finish(kind, result, start)?;

        self.progress.report(ProgressStage::Ready);
        Ok(report)
    }

    async fn analyze_upload(
        &self,
        task: Task,
        upload: UploadedFile,
    ) -> Result<AnalysisReport, ApplicationError> {
        let kind = task.kind();
        upload.ensure_accepted_for(kind)?;
        let backend = self.backends.for_task(kind)?;
        let prompt = PromptBuilder::build(&task);

        let artifact = self.store.store(&upload).await?;
        drop(upload);
        debug!(path = %artifact.path().display(), "Stored upload");
        let guard = ArtifactGuard::new(Arc::clone(&self.store), artifact);

        let outcome = match guard.artifact() {
            Some(artifact) => {
                self.infer_with_artifact(backend.as_ref(), kind, &prompt, artifact)
                    .await
            },
            None => Err(ApplicationError::Internal("artifact released early".to_string())),
        };

        let status = guard.release().await;
        if status.is_failed() {
            warn!(%status, "Temporary file left behind");
        } else {
            debug!(%status, "Released temporary file");
        }

        outcome
    }

    async fn infer_with_artifact(
        &self,
        backend: &dyn InferenceBackend,
        kind: TaskKind,
        prompt: &TaskPrompt,
        artifact: &TransientArtifact,
    ) -> Result<AnalysisReport, ApplicationError> {
        let bytes = self.store.read(artifact).await?;
        let attachment = ImageAttachment::new(artifact.media_type(), bytes);
        Self::infer(backend, kind, prompt, Some(&attachment)).await
    }

    async fn infer(
        backend: &dyn InferenceBackend,
        kind: TaskKind,
        prompt: &TaskPrompt,
        attachment: Option<&ImageAttachment>,
    ) -> Result<AnalysisReport, ApplicationError> {
        let start = Instant::now();
        let result = backend.run(prompt, attachment).await?;
        Self::finish(kind, result, start)
    }

    fn finish(
        kind: TaskKind,
        result: InferenceResult,
        start: Instant,
    ) -> Result<AnalysisReport, ApplicationError> {
        let formatted = ResponseFormatter::format_for(kind.response_layout(), &result.content)
            .inspect_err(|e| warn!(error = %e, task = %kind, "Could not format backend output"))?;

        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            task = %kind,
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms,
            "Analysis completed"
        );

        Ok(AnalysisReport {
            task: kind,
            formatted,
            model: result.model,
            latency_ms,
        })
    }
}
