//! Temporary artifact storage settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where uploads are written while a request is in flight
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Working directory for temporary files (default: current directory)
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured directory, or the process working directory
    pub fn resolve_work_dir(&self) -> std::io::Result<PathBuf> {
        match &self.work_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}
