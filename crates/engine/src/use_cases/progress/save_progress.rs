//! Save progress use case.

use std::sync::Arc;

use talkbook_domain::SaveGame;

use crate::entities::DataManager;
use crate::infrastructure::ports::ProgressStore;

use super::error::ProgressError;

/// Snapshot the live dataset and write it to the save store.
pub struct SaveProgress {
    store: Arc<dyn ProgressStore>,
}

impl SaveProgress {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    /// Returns the save that was written.
    pub fn execute(&self, manager: &DataManager) -> Result<SaveGame, ProgressError> {
        let save = manager.snapshot()?;
        self.store.write(&save)?;

        tracing::info!(
            characters = save.characters.len(),
            interactables = save.interactables.len(),
            talk_logs = save.talk_logs.len(),
            "Progress saved"
        );
        Ok(save)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockProgressStore, StoreError};
    use crate::use_cases::progress::test_support::{first_message_id, manager};

    #[test]
    fn writes_snapshot_of_live_progress() {
        let mut manager = manager(1);
        let id = first_message_id(&manager);
        manager.mark_message_shown(&id).unwrap();

        let mut store = MockProgressStore::new();
        store
            .expect_write()
            .withf(|save| save.talk_logs.len() == 1 && save.characters.len() == 1)
            .times(1)
            .returning(|_| Ok(()));

        let save = SaveProgress::new(Arc::new(store)).execute(&manager).unwrap();

        assert_eq!(save.talk_logs[0].talkable_name, "Mira");
    }

    #[test]
    fn store_failure_is_reported() {
        let manager = manager(1);
        let mut store = MockProgressStore::new();
        store
            .expect_write()
            .returning(|_| Err(StoreError::serialization("disk full")));

        let result = SaveProgress::new(Arc::new(store)).execute(&manager);

        assert!(matches!(result, Err(ProgressError::Store(_))));
    }
}
