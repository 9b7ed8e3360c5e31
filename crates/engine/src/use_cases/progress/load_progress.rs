//! Load progress use case.

use std::sync::Arc;

use talkbook_domain::ApplyReport;

use crate::entities::DataManager;
use crate::infrastructure::ports::ProgressStore;

use super::error::ProgressError;

/// Restore saved progress onto a freshly loaded dataset.
pub struct LoadProgress {
    store: Arc<dyn ProgressStore>,
}

impl LoadProgress {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    /// Returns `None` when there is no save. Otherwise the live tree is
    /// reloaded from its source before the save is applied, so nothing from
    /// the current session leaks into the restored state.
    pub fn execute(&self, manager: &mut DataManager) -> Result<Option<ApplyReport>, ProgressError> {
        let Some(save) = self.store.read()? else {
            tracing::info!("No saved progress to load");
            return Ok(None);
        };

        manager.dispose_data();
        let report = manager.restore(&save)?;
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockProgressStore, StoreError};
    use crate::use_cases::progress::test_support::{
        first_message_id, manager, manager_serving, mira_data,
    };

    #[test]
    fn restores_onto_fresh_tree() {
        let data = mira_data();
        let mut saved_session = manager_serving(data.clone(), 1);
        let id = first_message_id(&saved_session);
        saved_session.mark_message_shown(&id).unwrap();
        let save = saved_session.snapshot().unwrap();

        let mut store = MockProgressStore::new();
        store.expect_read().times(1).returning(move || Ok(Some(save.clone())));

        // One load for the id lookup below, one after the dispose.
        let mut live = manager_serving(data, 2);
        live.data().unwrap();
        let report = LoadProgress::new(Arc::new(store))
            .execute(&mut live)
            .unwrap()
            .unwrap();

        assert!(report.is_clean());
        assert!(live.get_message_by_id(&id).unwrap().unwrap().already_spoken);
        assert!(live.data().unwrap().find_talk_log("Mira").is_some());
    }

    #[test]
    fn nothing_saved_leaves_data_untouched() {
        let mut store = MockProgressStore::new();
        store.expect_read().returning(|| Ok(None));
        let mut live = manager(1);
        let id = first_message_id(&live);
        live.mark_message_shown(&id).unwrap();

        let result = LoadProgress::new(Arc::new(store)).execute(&mut live).unwrap();

        assert!(result.is_none());
        assert!(live.get_message_by_id(&id).unwrap().unwrap().already_spoken);
    }

    #[test]
    fn version_mismatch_is_an_error() {
        let mut store = MockProgressStore::new();
        store.expect_read().returning(|| {
            Err(StoreError::VersionMismatch {
                expected: talkbook_domain::SAVE_VERSION,
                found: 0,
            })
        });
        let mut live = manager(0);

        let result = LoadProgress::new(Arc::new(store)).execute(&mut live);

        assert!(matches!(
            result,
            Err(ProgressError::Store(StoreError::VersionMismatch { .. }))
        ));
    }
}
