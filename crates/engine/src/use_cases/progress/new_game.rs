//! New game use case.

use std::sync::Arc;

use crate::entities::DataManager;
use crate::infrastructure::ports::ProgressStore;

use super::error::ProgressError;

/// Discard saved and in-memory progress, returning to authored defaults.
pub struct NewGame {
    store: Arc<dyn ProgressStore>,
}

impl NewGame {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    pub fn execute(&self, manager: &mut DataManager) -> Result<(), ProgressError> {
        self.store.clear()?;
        manager.dispose_data();
        tracing::info!("Started a new game");
        Ok(())
    }
}
