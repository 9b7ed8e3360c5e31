//! Storage port traits for the dialogue dataset and player progress.

use talkbook_domain::{DialogueData, SaveGame};

use super::error::{SourceError, StoreError};

// =============================================================================
// Authored content
// =============================================================================

/// Where the authored dataset lives.
#[cfg_attr(test, mockall::automock)]
pub trait DataSource: Send + Sync {
    /// Load the complete authored tree.
    fn load_all(&self) -> Result<DialogueData, SourceError>;

    /// Replace the stored tree with `data`.
    fn write_all(&self, data: &DialogueData) -> Result<(), SourceError>;
}

// =============================================================================
// Player progress
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ProgressStore: Send + Sync {
    /// Read the current save. `None` when nothing has been saved yet.
    fn read(&self) -> Result<Option<SaveGame>, StoreError>;

    fn write(&self, save: &SaveGame) -> Result<(), StoreError>;

    /// Remove the current save. Succeeds when there is none.
    fn clear(&self) -> Result<(), StoreError>;
}
