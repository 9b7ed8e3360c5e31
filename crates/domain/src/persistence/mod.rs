//! Persisted projections of authored entities
//!
//! A save never stores authored content. Each entity maps to a small document
//! holding its persistence key and the fields that change during play, and
//! nested documents mirror the talkable → context → column → message tree.
//!
//! Loading applies documents onto a freshly authored tree. Documents are
//! matched to live entities by key, never by position, so a save written
//! against an older revision of the content still loads: documents whose
//! entity was removed are skipped, and entities added since keep their
//! authored defaults.

mod documents;
mod mapping;
mod save_game;

use std::ops::AddAssign;

pub use documents::{
    ColumnPersistent, ContextPersistent, FlagPersistent, ItemPersistent, MessagePersistent,
    QuestPersistent, TalkLogPersistent, TalkablePersistent,
};
pub use save_game::{SaveGame, SAVE_VERSION};

/// Counts of documents applied and skipped while loading progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: usize,
    pub skipped: usize,
}

impl ApplyReport {
    pub fn applied() -> Self {
        Self {
            applied: 1,
            skipped: 0,
        }
    }

    pub fn skipped() -> Self {
        Self {
            applied: 0,
            skipped: 1,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.skipped == 0
    }
}

impl AddAssign for ApplyReport {
    fn add_assign(&mut self, other: Self) {
        self.applied += other.applied;
        self.skipped += other.skipped;
    }
}

/// A persisted document that can be matched back to its live entity.
pub trait PersistentDocument {
    /// The key shared with the live entity (a unique id or, for flags and
    /// talk logs, a name).
    fn key(&self) -> &str;
}

/// An authored entity with a persisted projection.
pub trait Persistable {
    type Persistent: PersistentDocument + Clone;

    /// Short entity name used in log output.
    const ENTITY: &'static str;

    /// The key matched against [`PersistentDocument::key`].
    fn persistence_key(&self) -> &str;

    /// Project the save-worthy subset of this entity and its children.
    fn to_persistent(&self) -> Self::Persistent;

    /// Overwrite the mutable fields from `doc`, recursing into children.
    ///
    /// `doc` has already been matched to this entity by key. The report
    /// counts this entity and every nested document.
    fn apply_persistent(&mut self, doc: &Self::Persistent) -> ApplyReport;
}

/// Project a whole collection, one document per entity, in order.
pub fn get_array_data<T: Persistable>(items: &[T]) -> Vec<T::Persistent> {
    items.iter().map(T::to_persistent).collect()
}

/// Apply documents onto a live collection, matching by key.
///
/// Documents with no live counterpart are skipped and logged. Live entities
/// without a document are left untouched.
pub fn set_array_data<T: Persistable>(items: &mut [T], docs: &[T::Persistent]) -> ApplyReport {
    let mut report = ApplyReport::default();
    for doc in docs {
        let key = doc.key();
        match items
            .iter_mut()
            .find(|item| !key.is_empty() && item.persistence_key() == key)
        {
            Some(item) => report += item.apply_persistent(doc),
            None => {
                tracing::warn!(
                    entity = T::ENTITY,
                    key,
                    "Persisted document has no matching entity, skipping"
                );
                report += ApplyReport::skipped();
            }
        }
    }
    report
}
