//! Service wiring shared by the server and the CLI

use std::sync::Arc;

use ai_core::LocalModelHandle;
use application::{
    ApplicationError, BackendRegistry, HealthService, MedicalAssistantService, ports::ProgressPort,
};
use tracing::{info, warn};

use crate::{
    adapters::{FsArtifactStore, LocalModelInferenceAdapter, VisionInferenceAdapter},
    config::AppConfig,
};

/// Services built from one configuration
#[derive(Debug, Clone)]
pub struct Services {
    pub assistant: Arc<MedicalAssistantService>,
    pub health: HealthService,
}

/// Build the backends, the artifact store and the services on top of them
///
/// A missing vision credential is not fatal: the vision backend is left
/// unregistered and lab report or prescription requests fail with a
/// configuration error while diagnosis keeps working. The local model is
/// registered but not loaded.
pub fn build_services(
    config: &AppConfig,
    progress: Arc<dyn ProgressPort>,
) -> Result<Services, ApplicationError> {
    let mut backends = BackendRegistry::new();

    match config.vision_api_key() {
        Ok(api_key) => {
            let vision = VisionInferenceAdapter::new(config.vision.engine_config(), api_key)?;
            backends = backends.with_backend(Arc::new(vision));
        },
        Err(e) => warn!(error = %e, "Vision backend disabled"),
    }

    let handle = LocalModelHandle::new(config.local_model.clone())
        .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
    backends = backends.with_backend(Arc::new(LocalModelInferenceAdapter::new(Arc::new(handle))));

    let work_dir = config.storage.resolve_work_dir()?;
    std::fs::create_dir_all(&work_dir)?;
    info!(work_dir = %work_dir.display(), backends = backends.len(), "Services initialized");

    let store = Arc::new(FsArtifactStore::new(work_dir));
    let assistant = MedicalAssistantService::new(backends.clone(), store).with_progress(progress);
    let health = HealthService::new(backends).with_config(config.health.clone());

    Ok(Services {
        assistant: Arc::new(assistant),
        health,
    })
}

#[cfg(test)]
mod tests {
    use application::NoopProgress;
    use domain::{BackendKind, SymptomRecord, UploadedFile};
    use secrecy::SecretString;

    use super::*;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.work_dir = Some(dir.join("uploads"));
        config
    }

    #[test]
    fn registers_both_backends_with_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.vision.api_key = Some(SecretString::from("key"));

        let services = build_services(&config, Arc::new(NoopProgress)).unwrap();
        let backends = services.assistant.backends();
        assert!(backends.get(BackendKind::RemoteVision).is_some());
        assert!(backends.get(BackendKind::LocalModel).is_some());
        assert!(dir.path().join("uploads").is_dir());
    }

    #[tokio::test]
    async fn unreachable_local_runtime_is_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.vision.api_key = Some(SecretString::from("key"));
        config.local_model.base_url = "http://127.0.0.1:1".to_string();

        let services = build_services(&config, Arc::new(NoopProgress)).unwrap();
        let record = SymptomRecord::new(30, "Male", "headache").unwrap();
        let err = services.assistant.diagnose(record).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Backend(_)));
    }

    #[tokio::test]
    async fn upload_is_rejected_before_backend_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let services = build_services(&config, Arc::new(NoopProgress)).unwrap();

        let upload = UploadedFile::new("rx.pdf", b"%PDF".to_vec(), Some("application/pdf")).unwrap();
        let err = services
            .assistant
            .summarize_prescription(upload)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
