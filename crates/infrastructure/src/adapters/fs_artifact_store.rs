//! Filesystem artifact store - Implements ArtifactStorePort with tokio::fs

use std::{io::ErrorKind, path::PathBuf};

use application::{error::ApplicationError, ports::ArtifactStorePort};
use async_trait::async_trait;
use domain::{ReleaseStatus, TransientArtifact, UploadedFile};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Writes uploads into a working directory under collision-free names
///
/// Each stored file is named `{uuid}-{original name}`, so concurrent
/// uploads of the same file never share a path. Long names are shortened to
/// fit the filesystem's component limit.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    work_dir: PathBuf,
}

impl FsArtifactStore {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &std::path::Path {
        &self.work_dir
    }

    fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.work_dir.join(format!(
            "{}-{}",
            Uuid::new_v4().simple(),
            shorten_file_name(file_name)
        ))
    }
}

/// Longest name kept after the 33-byte `{uuid}-` prefix, within the usual
/// 255-byte component limit
const MAX_STORED_NAME_BYTES: usize = 200;

/// Longest suffix treated as an extension when shortening
const MAX_EXTENSION_BYTES: usize = 16;

/// Truncate long names on a char boundary, keeping the extension
fn shorten_file_name(name: &str) -> String {
    if name.len() <= MAX_STORED_NAME_BYTES {
        return name.to_string();
    }

    let (stem, extension) = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot <= MAX_EXTENSION_BYTES => name.split_at(dot),
        _ => (name, ""),
    };

    let mut end = MAX_STORED_NAME_BYTES - extension.len();
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{extension}", &stem[..end])
}

#[async_trait]
impl ArtifactStorePort for FsArtifactStore {
    #[instrument(skip(self, upload), fields(file = upload.file_name(), size = upload.len()))]
    async fn store(&self, upload: &UploadedFile) -> Result<TransientArtifact, ApplicationError> {
        let path = self.artifact_path(upload.file_name());
        tokio::fs::write(&path, upload.bytes()).await.map_err(|e| {
            ApplicationError::Io(format!("failed to write {}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), "Stored upload");
        Ok(TransientArtifact::new(
            path,
            upload.file_name(),
            upload.media_type(),
            upload.len() as u64,
        ))
    }

    async fn read(&self, artifact: &TransientArtifact) -> Result<Vec<u8>, ApplicationError> {
        tokio::fs::read(artifact.path()).await.map_err(|e| {
            ApplicationError::Io(format!("failed to read {}: {e}", artifact.path().display()))
        })
    }

    #[instrument(skip(self, artifact), fields(path = %artifact.path().display()))]
    async fn release(&self, artifact: TransientArtifact) -> ReleaseStatus {
        match tokio::fs::remove_file(artifact.path()).await {
            Ok(()) => {
                debug!("Released artifact");
                ReleaseStatus::Deleted
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Artifact already removed");
                ReleaseStatus::AlreadyAbsent
            },
            Err(e) => {
                warn!(error = %e, "Failed to remove artifact");
                ReleaseStatus::Failed(e.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::MediaType;

    use super::*;

    fn upload(name: &str) -> UploadedFile {
        UploadedFile::new(name, vec![0x89, b'P', b'N', b'G'], Some("image/png")).unwrap()
    }

    #[tokio::test]
    async fn store_read_release() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());

        let artifact = store.store(&upload("cbc.png")).await.unwrap();
        assert!(artifact.path().starts_with(dir.path()));
        assert!(artifact.path().exists());
        assert_eq!(artifact.source_name(), "cbc.png");
        assert_eq!(artifact.media_type(), MediaType::Png);
        assert_eq!(artifact.size_bytes(), 4);

        let bytes = store.read(&artifact).await.unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);

        let path = artifact.path().to_path_buf();
        assert_eq!(store.release(artifact).await, ReleaseStatus::Deleted);
        assert!(!path.exists());
    }

    #[test]
    fn short_names_are_kept() {
        assert_eq!(shorten_file_name("cbc.png"), "cbc.png");
    }

    #[test]
    fn long_names_keep_their_extension() {
        let name = format!("{}.pdf", "a".repeat(300));
        let short = shorten_file_name(&name);
        assert_eq!(short.len(), MAX_STORED_NAME_BYTES);
        assert!(short.ends_with("a.pdf"));

        let name = format!("{}.png", "é".repeat(150));
        let short = shorten_file_name(&name);
        assert!(short.len() <= MAX_STORED_NAME_BYTES);
        assert!(short.ends_with(".png"));
    }

    #[tokio::test]
    async fn long_upload_name_is_stored() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());
        let name = format!("{}.png", "lab-results-".repeat(20));

        let artifact = store.store(&upload(&name)).await.unwrap();
        assert!(artifact.path().exists());
        assert_eq!(artifact.source_name(), name);
        let stored = artifact.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(stored.len() <= 255);
        assert!(stored.ends_with(".png"));

        assert_eq!(store.release(artifact).await, ReleaseStatus::Deleted);
    }

    #[tokio::test]
    async fn same_name_gets_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());

        let first = store.store(&upload("scan.png")).await.unwrap();
        let second = store.store(&upload("scan.png")).await.unwrap();
        assert_ne!(first.path(), second.path());

        let name = first.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.ends_with("-scan.png"));
    }

    #[tokio::test]
    async fn release_of_missing_file_is_already_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());

        let artifact = store.store(&upload("gone.png")).await.unwrap();
        std::fs::remove_file(artifact.path()).unwrap();
        assert_eq!(store.release(artifact).await, ReleaseStatus::AlreadyAbsent);
    }

    #[tokio::test]
    async fn missing_work_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path().join("does-not-exist"));

        let err = store.store(&upload("cbc.png")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Io(_)));
    }

    #[tokio::test]
    async fn read_after_removal_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());

        let artifact = store.store(&upload("cbc.png")).await.unwrap();
        std::fs::remove_file(artifact.path()).unwrap();
        assert!(matches!(
            store.read(&artifact).await,
            Err(ApplicationError::Io(_))
        ));
    }
}
