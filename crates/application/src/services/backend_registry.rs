//! Dispatch table from backend kind to backend

use std::{collections::HashMap, fmt, sync::Arc};

use domain::{BackendKind, TaskKind};

use crate::{error::ApplicationError, ports::InferenceBackend};

/// Backends keyed by the kind they implement
#[derive(Clone, Default)]
pub struct BackendRegistry {
    backends: HashMap<BackendKind, Arc<dyn InferenceBackend>>,
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.backends.keys().map(ToString::to_string).collect();
        kinds.sort();
        f.debug_struct("BackendRegistry")
            .field("backends", &kinds)
            .finish()
    }
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend under the kind it reports, replacing any previous one
    #[must_use]
    pub fn with_backend(mut self, backend: Arc<dyn InferenceBackend>) -> Self {
        self.backends.insert(backend.backend_kind(), backend);
        self
    }

    pub fn get(&self, kind: BackendKind) -> Option<&Arc<dyn InferenceBackend>> {
        self.backends.get(&kind)
    }

    /// Backend serving a task
    pub fn for_task(&self, task: TaskKind) -> Result<&Arc<dyn InferenceBackend>, ApplicationError> {
        let kind = task.backend();
        self.get(kind).ok_or_else(|| {
            ApplicationError::Configuration(format!("no {kind} backend registered for {task}"))
        })
    }

    /// Registered backends, in a stable order
    pub fn iter(&self) -> impl Iterator<Item = (BackendKind, &Arc<dyn InferenceBackend>)> {
        [BackendKind::RemoteVision, BackendKind::LocalModel]
            .into_iter()
            .filter_map(|kind| self.backends.get(&kind).map(|backend| (kind, backend)))
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
