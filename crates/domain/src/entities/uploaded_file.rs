//! A file received from the user, before it touches the disk

use std::fmt;

use crate::{
    errors::DomainError,
    value_objects::{MediaType, TaskKind},
};

/// Uploaded file content with a sanitized name and resolved media type
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    file_name: String,
    media_type: MediaType,
    bytes: Vec<u8>,
}

impl UploadedFile {
    /// Validate an upload
    ///
    /// The name is reduced to its final path component. The media type is
    /// taken from `declared_mime` when it is recognized, otherwise from the
    /// file extension.
    pub fn new(
        name: &str,
        bytes: Vec<u8>,
        declared_mime: Option<&str>,
    ) -> Result<Self, DomainError> {
        let file_name = sanitize_file_name(name)?;

        let media_type = declared_mime
            .and_then(MediaType::from_mime)
            .or_else(|| MediaType::from_file_name(&file_name))
            .ok_or_else(|| {
                DomainError::UnrecognizedMediaType(
                    declared_mime.map_or_else(|| file_name.clone(), str::to_string),
                )
            })?;

        if bytes.is_empty() {
            return Err(DomainError::EmptyUpload(file_name));
        }

        Ok(Self {
            file_name,
            media_type,
            bytes,
        })
    }

    /// Reject uploads whose type the task cannot handle
    pub fn ensure_accepted_for(&self, task: TaskKind) -> Result<(), DomainError> {
        if task.accepted_media().contains(&self.media_type) {
            Ok(())
        } else {
            Err(DomainError::unsupported_media(task, self.media_type.mime()))
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub const fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn sanitize_file_name(name: &str) -> Result<String, DomainError> {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "." || base == ".." || base.contains('\0') {
        return Err(DomainError::InvalidFileName(name.to_string()));
    }

    Ok(base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_type_from_declared_mime() {
        let file = UploadedFile::new("scan", vec![1, 2, 3], Some("image/png")).unwrap();
        assert_eq!(file.media_type(), MediaType::Png);
        assert_eq!(file.len(), 3);
    }

    #[test]
    fn falls_back_to_extension() {
        let file =
            UploadedFile::new("report.pdf", vec![1], Some("application/octet-stream")).unwrap();
        assert_eq!(file.media_type(), MediaType::Pdf);
    }

    #[test]
    fn strips_directories_from_name() {
        let file = UploadedFile::new("../../etc/passwd.png", vec![1], None).unwrap();
        assert_eq!(file.file_name(), "passwd.png");
        let file = UploadedFile::new("C:\\Users\\me\\rx.jpg", vec![1], None).unwrap();
        assert_eq!(file.file_name(), "rx.jpg");
    }

    #[test]
    fn rejects_unusable_names() {
        assert!(matches!(
            UploadedFile::new("dir/", vec![1], Some("image/png")),
            Err(DomainError::InvalidFileName(_))
        ));
        assert!(matches!(
            UploadedFile::new("..", vec![1], Some("image/png")),
            Err(DomainError::InvalidFileName(_))
        ));
    }

    #[test]
    fn rejects_unknown_types_and_empty_content() {
        assert!(matches!(
            UploadedFile::new("notes.txt", vec![1], Some("text/plain")),
            Err(DomainError::UnrecognizedMediaType(_))
        ));
        assert!(matches!(
            UploadedFile::new("scan.png", Vec::new(), None),
            Err(DomainError::EmptyUpload(_))
        ));
    }

    #[test]
    fn task_acceptance() {
        let pdf = UploadedFile::new("report.pdf", vec![1], None).unwrap();
        assert!(pdf.ensure_accepted_for(TaskKind::LabReport).is_ok());
        assert!(matches!(
            pdf.ensure_accepted_for(TaskKind::Prescription),
            Err(DomainError::UnsupportedMediaType { .. })
        ));
    }

    #[test]
    fn debug_omits_content() {
        let file = UploadedFile::new("scan.png", vec![0xAB; 64], None).unwrap();
        let debug = format!("{file:?}");
        assert!(debug.contains("scan.png"));
        assert!(debug.contains("len: 64"));
    }
}
