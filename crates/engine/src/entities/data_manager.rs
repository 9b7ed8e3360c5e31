//! Dialogue data facade.
//!
//! Owns the loaded dataset for one authoring or play session. The tree is
//! loaded from the [`DataSource`] on first access and replaced wholesale by
//! [`DataManager::dispose_data`]; references handed out before a dispose
//! cannot outlive it, so callers re-fetch afterwards.

use std::sync::Arc;

use once_cell::unsync::OnceCell;
use talkbook_domain::persistence::{
    FlagPersistent, ItemPersistent, QuestPersistent, TalkLogPersistent, TalkablePersistent,
};
use talkbook_domain::{
    get_array_data, ApplyReport, Context, DialogueData, Flag, Item, Message, Quest, SaveGame,
    Talkable,
};

use crate::infrastructure::ports::{DataSource, SourceError};
use crate::use_cases::query::{self, EntityRef, FieldValue, ModelKind, QueryError};

/// Facade errors. Lookups that find nothing return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to load dialogue data: {0}")]
    Load(#[from] SourceError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Dialogue data is not available")]
    Unavailable,
}

/// Lazily loaded dialogue dataset plus session state.
pub struct DataManager {
    source: Arc<dyn DataSource>,
    data: OnceCell<DialogueData>,
    talking: bool,
}

impl DataManager {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            data: OnceCell::new(),
            talking: false,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// The dataset, loading it on first access.
    pub fn data(&self) -> Result<&DialogueData, DataError> {
        self.data
            .get_or_try_init(|| self.load())
            .map_err(DataError::from)
    }

    /// Mutable access to the dataset, loading it on first access.
    pub fn data_mut(&mut self) -> Result<&mut DialogueData, DataError> {
        self.data.get_or_try_init(|| self.load())?;
        self.data.get_mut().ok_or(DataError::Unavailable)
    }

    pub fn is_loaded(&self) -> bool {
        self.data.get().is_some()
    }

    /// Drop the loaded tree and session state. The next access reloads from
    /// the source.
    pub fn dispose_data(&mut self) {
        if self.data.take().is_some() {
            tracing::info!("Disposed dialogue data");
        }
        self.talking = false;
    }

    pub fn is_talking(&self) -> bool {
        self.talking
    }

    pub fn set_talking(&mut self, talking: bool) {
        self.talking = talking;
    }

    fn load(&self) -> Result<DialogueData, SourceError> {
        tracing::debug!("Loading dialogue data");
        let mut data = self.source.load_all()?;
        data.validate_kinds()?;
        let healed = data.ensure_ids();
        let duplicates = data.duplicate_ids();
        if !duplicates.is_empty() {
            tracing::warn!(
                count = duplicates.len(),
                first = %duplicates[0],
                "Dialogue data contains duplicate unique ids"
            );
        }
        let summary = data.summary();
        tracing::info!(
            characters = summary.characters,
            interactables = summary.interactables,
            contexts = summary.contexts,
            messages = summary.messages,
            healed,
            "Dialogue data ready"
        );
        Ok(data)
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn get_character(&self, name: &str) -> Result<Option<&Talkable>, DataError> {
        Ok(self.data()?.find_character(name))
    }

    pub fn get_interactable(&self, name: &str) -> Result<Option<&Talkable>, DataError> {
        Ok(self.data()?.find_interactable(name))
    }

    /// Context at `index` under the character named `character`.
    pub fn get_context(&self, character: &str, index: usize) -> Result<Option<&Context>, DataError> {
        Ok(self
            .get_character(character)?
            .and_then(|owner| Context::find(owner, index)))
    }

    /// Context under `character` whose name in `language` is `name`.
    pub fn get_context_by_name(
        &self,
        character: &str,
        name: &str,
        language: &str,
    ) -> Result<Option<&Context>, DataError> {
        Ok(self
            .get_character(character)?
            .and_then(|owner| Context::find_by_name(owner, name, language)))
    }

    /// Message at `row` of the column at `column` inside `context`.
    pub fn get_message<'a>(
        &self,
        context: &'a Context,
        column: usize,
        row: usize,
    ) -> Option<&'a Message> {
        context
            .columns
            .get(column)
            .and_then(|column| Message::find(&column.messages, row))
    }

    /// Message anywhere in the tree.
    pub fn get_message_by_id(&self, unique_id: &str) -> Result<Option<&Message>, DataError> {
        Ok(self.data()?.find_message(unique_id))
    }

    /// Item by name; `None` for `language` means the default language.
    pub fn get_item(&self, name: &str, language: Option<&str>) -> Result<Option<&Item>, DataError> {
        Ok(self.data()?.find_item(name, language))
    }

    pub fn get_item_by_id(&self, id: u32) -> Result<Option<&Item>, DataError> {
        Ok(self.data()?.find_item_by_id(id))
    }

    pub fn get_quest(&self, name: &str) -> Result<Option<&Quest>, DataError> {
        Ok(self.data()?.find_quest(name))
    }

    pub fn get_flag(&self, name: &str) -> Result<Option<&Flag>, DataError> {
        Ok(self.data()?.find_flag(name))
    }

    pub fn find(
        &self,
        kind: ModelKind,
        field: &str,
        value: &FieldValue,
    ) -> Result<Vec<EntityRef<'_>>, DataError> {
        Ok(query::find(self.data()?, kind, field, value)?)
    }

    // =========================================================================
    // Progress
    // =========================================================================

    /// Mark a message spoken and log it. `Ok(false)` when no message has the id.
    pub fn mark_message_shown(&mut self, unique_id: &str) -> Result<bool, DataError> {
        Ok(self.data_mut()?.mark_message_shown(unique_id))
    }

    pub fn persistent_characters(&self) -> Result<Vec<TalkablePersistent>, DataError> {
        Ok(get_array_data(&self.data()?.characters))
    }

    pub fn persistent_interactables(&self) -> Result<Vec<TalkablePersistent>, DataError> {
        Ok(get_array_data(&self.data()?.interactables))
    }

    pub fn persistent_quests(&self) -> Result<Vec<QuestPersistent>, DataError> {
        Ok(get_array_data(&self.data()?.quests))
    }

    pub fn persistent_talk_logs(&self) -> Result<Vec<TalkLogPersistent>, DataError> {
        Ok(get_array_data(&self.data()?.talk_logs))
    }

    pub fn persistent_items(&self) -> Result<Vec<ItemPersistent>, DataError> {
        Ok(get_array_data(&self.data()?.items))
    }

    pub fn persistent_flags(&self) -> Result<Vec<FlagPersistent>, DataError> {
        Ok(get_array_data(&self.data()?.flags))
    }

    /// Everything a save needs, captured from the live tree.
    pub fn snapshot(&self) -> Result<SaveGame, DataError> {
        Ok(SaveGame::capture(self.data()?))
    }

    /// Apply saved progress onto the live tree.
    pub fn restore(&mut self, save: &SaveGame) -> Result<ApplyReport, DataError> {
        let report = save.apply_to(self.data_mut()?);
        if report.is_clean() {
            tracing::info!(applied = report.applied, "Restored saved progress");
        } else {
            tracing::warn!(
                applied = report.applied,
                skipped = report.skipped,
                "Restored saved progress with unmatched documents"
            );
        }
        Ok(report)
    }
}
