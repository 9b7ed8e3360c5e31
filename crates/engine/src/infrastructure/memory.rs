//! In-memory dataset source.

use std::sync::{PoisonError, RwLock};

use talkbook_domain::DialogueData;

use super::ports::{DataSource, SourceError};

/// Serves clones of a tree held in memory.
///
/// Every load hands out a fresh copy, so mutations made through a
/// `DataManager` never leak back into the source until `write_all`.
pub struct InMemorySource {
    data: RwLock<DialogueData>,
}

impl InMemorySource {
    pub fn new(data: DialogueData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// A copy of the stored tree.
    pub fn snapshot(&self) -> DialogueData {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DataSource for InMemorySource {
    fn load_all(&self) -> Result<DialogueData, SourceError> {
        let data = self.snapshot();
        tracing::debug!(characters = data.characters.len(), "Loaded dialogue data from memory");
        Ok(data)
    }

    fn write_all(&self, data: &DialogueData) -> Result<(), SourceError> {
        *self.data.write().unwrap_or_else(PoisonError::into_inner) = data.clone();
        Ok(())
    }
}
