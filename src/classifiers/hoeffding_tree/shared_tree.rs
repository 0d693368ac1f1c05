use crate::classifiers::hoeffding_tree::{StreamingTree, TreeError};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable handle that lets several threads classify while one thread
/// ingests. Readers see a tree either before or after a split, never during.
#[derive(Debug, Clone)]
pub struct SharedTree {
    tree: Arc<RwLock<StreamingTree>>,
}

impl SharedTree {
    pub fn new(tree: StreamingTree) -> Self {
        Self {
            tree: Arc::new(RwLock::new(tree)),
        }
    }

    // A panicking writer cannot leave a half-built node behind, so a
    // poisoned lock still guards a valid tree.
    fn read(&self) -> RwLockReadGuard<'_, StreamingTree> {
        self.tree.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StreamingTree> {
        self.tree.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ingest(&self, values: &[f64], label: usize) -> Result<(), TreeError> {
        self.write().ingest(values, label)
    }

    pub fn classify(&self, values: &[f64]) -> Result<usize, TreeError> {
        self.read().classify(values)
    }

    pub fn class_votes(&self, values: &[f64]) -> Result<Vec<f64>, TreeError> {
        self.read().class_votes(values)
    }

    pub fn node_count(&self) -> usize {
        self.read().node_count()
    }

    /// Runs `f` against a consistent view of the tree.
    pub fn with_tree<T>(&self, f: impl FnOnce(&StreamingTree) -> T) -> T {
        f(&self.read())
    }

    pub fn snapshot(&self) -> StreamingTree {
        self.read().clone()
    }
}
