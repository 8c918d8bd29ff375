use super::core::PipelineStage;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

/// Handle to an ordered, append-only list of stages
///
/// A list can be held by several pipelines at once. [`share`](Self::share)
/// returns a second handle to the *same* list, so a stage appended through any
/// handle is seen by all of them. [`detach`](Self::detach) is the only way to
/// get an independent copy. The handle is deliberately not `Clone`, so aliasing
/// never happens by accident.
#[derive(Default)]
pub struct StageList {
    inner: Arc<RwLock<Vec<Arc<dyn PipelineStage>>>>,
}

impl StageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Another handle to this same list
    pub fn share(&self) -> StageList {
        StageList {
            inner: Arc::clone(&self.inner),
        }
    }

    /// An independent list holding the current stages
    ///
    /// Stages themselves are stateless and are referenced, not copied.
    pub fn detach(&self) -> StageList {
        StageList {
            inner: Arc::new(RwLock::new(self.read().clone())),
        }
    }

    /// Whether both handles refer to the same list
    pub fn is_shared_with(&self, other: &StageList) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of handles referring to this list
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    pub fn push(&self, stage: Arc<dyn PipelineStage>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(stage);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.read().iter().map(|s| s.name().to_string()).collect()
    }

    /// Current stages in registration order
    ///
    /// The lock is released before the caller runs any stage.
    pub fn snapshot(&self) -> Vec<Arc<dyn PipelineStage>> {
        self.read().clone()
    }

    // Appends never leave the list half-written, so a poisoned lock is still usable
    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<dyn PipelineStage>>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for StageList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageList")
            .field("stages", &self.names())
            .field("holders", &self.holders())
            .finish()
    }
}
