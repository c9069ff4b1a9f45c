use std::sync::{Arc, RwLock};

use driftwatch_domain::ReferenceDataset;
use tracing::info;

/// Holds the active reference as an immutable snapshot.
///
/// Writers swap the whole `Arc`; readers clone it and keep using the
/// snapshot they got even if a new reference lands mid-cycle.
#[derive(Debug, Default)]
pub struct ReferenceStore {
    current: RwLock<Option<Arc<ReferenceDataset>>>,
}

impl ReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reference(&self, dataset: ReferenceDataset) -> Arc<ReferenceDataset> {
        info!(
            "Reference data set: {} rows x {} columns ({} numeric)",
            dataset.row_count(),
            dataset.column_count(),
            dataset.numeric_columns().len()
        );
        let snapshot = Arc::new(dataset);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub fn get_reference(&self) -> Option<Arc<ReferenceDataset>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
    }

    pub fn is_ready(&self) -> bool {
        self.get_reference().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftwatch_domain::{Column, DataBatch};

    fn reference(mean: f64) -> ReferenceDataset {
        ReferenceDataset::new(DataBatch::new(vec![Column::numeric("amount", [mean])]))
    }

    #[test]
    fn test_unset_store_is_not_ready() {
        let store = ReferenceStore::new();
        assert!(!store.is_ready());
        assert!(store.get_reference().is_none());
    }

    #[test]
    fn test_replacement_leaves_held_snapshot_intact() {
        let store = ReferenceStore::new();
        store.set_reference(reference(100.0));
        let held = store.get_reference().unwrap();

        store.set_reference(reference(500.0));

        assert_eq!(held.stats("amount").map(|s| s.mean), Some(100.0));
        let fresh = store.get_reference().unwrap();
        assert_eq!(fresh.stats("amount").map(|s| s.mean), Some(500.0));
    }

    #[test]
    fn test_clear_removes_reference() {
        let store = ReferenceStore::new();
        store.set_reference(reference(1.0));
        store.clear();
        assert!(!store.is_ready());
    }
}
