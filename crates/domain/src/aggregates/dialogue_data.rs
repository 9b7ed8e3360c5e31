//! DialogueData aggregate - the root of the authored dialogue dataset
//!
//! Holds every top-level collection. Contexts, columns and messages are only
//! reachable through their owning talkable; the lookups here walk the tree
//! for them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::{
    Context, Flag, HasContexts, Item, Message, Options, Quest, TalkLog, Talkable,
};
use crate::error::DomainError;
use crate::ids::{Identified, UniqueId};

/// The whole dialogue dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueData {
    pub options: Options,
    #[serde(default)]
    pub characters: Vec<Talkable>,
    #[serde(default)]
    pub interactables: Vec<Talkable>,
    /// The inventory
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub quests: Vec<Quest>,
    /// Global flags
    #[serde(default)]
    pub flags: Vec<Flag>,
    #[serde(default)]
    pub talk_logs: Vec<TalkLog>,
}

/// Collection sizes, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataSummary {
    pub characters: usize,
    pub interactables: usize,
    pub contexts: usize,
    pub messages: usize,
    pub items: usize,
    pub quests: usize,
    pub flags: usize,
    pub talk_logs: usize,
}

impl DialogueData {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Configured language names, default first.
    pub fn languages(&self) -> Vec<&str> {
        self.options.language_names().collect()
    }

    // =========================================================================
    // Authoring
    // =========================================================================

    /// Create a character with blank localized fields for every language.
    pub fn add_character(&mut self, name: impl Into<String>) -> &mut Talkable {
        let talkable = Talkable::character(name, &self.languages());
        self.characters.push(talkable);
        let last = self.characters.len() - 1;
        &mut self.characters[last]
    }

    /// Create an interactable with blank localized fields for every language.
    pub fn add_interactable(&mut self, name: impl Into<String>) -> &mut Talkable {
        let talkable = Talkable::interactable(name, &self.languages());
        self.interactables.push(talkable);
        let last = self.interactables.len() - 1;
        &mut self.interactables[last]
    }

    /// Create an item with the next free numeric id.
    pub fn add_item(&mut self) -> &mut Item {
        let item = Item::new(Item::next_id(&self.items), &self.languages());
        self.items.push(item);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn remove_character(&mut self, unique_id: &str) -> Option<Talkable> {
        let index = self
            .characters
            .iter()
            .position(|t| t.unique_id == unique_id)?;
        Some(self.characters.remove(index))
    }

    pub fn remove_interactable(&mut self, unique_id: &str) -> Option<Talkable> {
        let index = self
            .interactables
            .iter()
            .position(|t| t.unique_id == unique_id)?;
        Some(self.interactables.remove(index))
    }

    /// Copy a character or interactable next to the original, with fresh ids
    /// throughout the copied subtree.
    pub fn duplicate_talkable(&mut self, unique_id: &str) -> Option<&mut Talkable> {
        let collection = if self.characters.iter().any(|t| t.unique_id == unique_id) {
            &mut self.characters
        } else {
            &mut self.interactables
        };
        let index = collection.iter().position(|t| t.unique_id == unique_id)?;
        let copy = collection[index].duplicate();
        collection.insert(index + 1, copy);
        Some(&mut collection[index + 1])
    }

    // =========================================================================
    // Structural lookups
    // =========================================================================

    pub fn find_character(&self, name: &str) -> Option<&Talkable> {
        Talkable::find(&self.characters, name)
    }

    pub fn find_character_mut(&mut self, name: &str) -> Option<&mut Talkable> {
        Talkable::find_mut(&mut self.characters, name)
    }

    pub fn find_interactable(&self, name: &str) -> Option<&Talkable> {
        Talkable::find(&self.interactables, name)
    }

    pub fn find_interactable_mut(&mut self, name: &str) -> Option<&mut Talkable> {
        Talkable::find_mut(&mut self.interactables, name)
    }

    /// Every talkable that owns contexts: characters first, then interactables.
    pub fn context_owners(&self) -> impl Iterator<Item = &dyn HasContexts> {
        self.talkables().map(|t| t as &dyn HasContexts)
    }

    /// Characters followed by interactables.
    pub fn talkables(&self) -> impl Iterator<Item = &Talkable> {
        self.characters.iter().chain(self.interactables.iter())
    }

    pub fn talkables_mut(&mut self) -> impl Iterator<Item = &mut Talkable> {
        self.characters
            .iter_mut()
            .chain(self.interactables.iter_mut())
    }

    /// Every context, in owner order.
    pub fn contexts(&self) -> impl Iterator<Item = &Context> {
        self.context_owners().flat_map(|owner| owner.contexts().iter())
    }

    /// Every message in the dataset, in tree order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.contexts()
            .flat_map(|context| context.columns.iter())
            .flat_map(|column| column.messages.iter())
    }

    /// Find a message anywhere in the tree by unique id.
    pub fn find_message(&self, unique_id: &str) -> Option<&Message> {
        self.messages().find(|m| m.unique_id == unique_id)
    }

    pub fn find_message_mut(&mut self, unique_id: &str) -> Option<&mut Message> {
        self.talkables_mut()
            .flat_map(|t| t.contexts.iter_mut())
            .flat_map(|c| c.columns.iter_mut())
            .flat_map(|col| col.messages.iter_mut())
            .find(|m| m.unique_id == unique_id)
    }

    /// Find an item by name, defaulting to the first configured language.
    pub fn find_item(&self, name: &str, language: Option<&str>) -> Option<&Item> {
        let language = self.options.resolve_language(language)?;
        Item::find_by_name(&self.items, name, language)
    }

    pub fn find_item_by_id(&self, id: u32) -> Option<&Item> {
        Item::find_by_id(&self.items, id)
    }

    pub fn find_quest(&self, name: &str) -> Option<&Quest> {
        Quest::find(&self.quests, name)
    }

    pub fn find_flag(&self, name: &str) -> Option<&Flag> {
        Flag::find(&self.flags, name)
    }

    pub fn find_talk_log(&self, talkable_name: &str) -> Option<&TalkLog> {
        TalkLog::find(&self.talk_logs, talkable_name)
    }

    // =========================================================================
    // Play progress
    // =========================================================================

    /// Mark a message as spoken and record it in its talkable's talk log.
    ///
    /// Returns `false` when no message has that id.
    pub fn mark_message_shown(&mut self, unique_id: &str) -> bool {
        let mut owner_name = None;
        for talkable in self.talkables_mut() {
            let found = talkable
                .contexts
                .iter_mut()
                .flat_map(|c| c.columns.iter_mut())
                .flat_map(|col| col.messages.iter_mut())
                .find(|m| m.unique_id == unique_id);
            if let Some(message) = found {
                message.already_spoken = true;
                owner_name = Some(talkable.name.clone());
                break;
            }
        }

        let Some(owner_name) = owner_name else {
            return false;
        };

        let position = self
            .talk_logs
            .iter()
            .position(|log| log.talkable_name == owner_name);
        let log = match position {
            Some(index) => &mut self.talk_logs[index],
            None => {
                self.talk_logs.push(TalkLog::new(owner_name));
                let last = self.talk_logs.len() - 1;
                &mut self.talk_logs[last]
            }
        };
        log.record(UniqueId::from(unique_id));
        true
    }

    // =========================================================================
    // Identity maintenance
    // =========================================================================

    /// Assign ids wherever they are missing. Returns how many were assigned.
    pub fn ensure_ids(&mut self) -> usize {
        let talkables: usize = self.talkables_mut().map(Talkable::ensure_tree_ids).sum();
        let items: usize = self
            .items
            .iter_mut()
            .map(|item| usize::from(item.ensure_id()))
            .sum();
        let quests: usize = self.quests.iter_mut().map(Quest::ensure_tree_ids).sum();

        let assigned = talkables + items + quests;
        if assigned > 0 {
            tracing::debug!(assigned, "Healed missing unique ids");
        }
        assigned
    }

    /// Check that `characters` only holds characters and `interactables`
    /// only holds interactables.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first misplaced talkable.
    pub fn validate_kinds(&self) -> Result<(), DomainError> {
        let misplaced = self
            .characters
            .iter()
            .filter(|t| !t.is_character())
            .map(|t| (t, "characters"))
            .chain(
                self.interactables
                    .iter()
                    .filter(|t| !t.is_interactable())
                    .map(|t| (t, "interactables")),
            )
            .next();

        match misplaced {
            Some((talkable, collection)) => Err(DomainError::validation(format!(
                "{} '{}' does not belong in {collection}",
                talkable.kind.label(),
                talkable.name
            ))),
            None => Ok(()),
        }
    }

    /// Every non-empty id that occurs more than once, sorted.
    pub fn duplicate_ids(&self) -> Vec<UniqueId> {
        let mut counts: HashMap<&UniqueId, usize> = HashMap::new();
        for id in self.all_ids() {
            if !id.is_empty() {
                *counts.entry(id).or_default() += 1;
            }
        }

        let mut duplicates: Vec<UniqueId> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id.clone())
            .collect();
        duplicates.sort();
        duplicates
    }

    fn all_ids(&self) -> Vec<&UniqueId> {
        let mut ids = Vec::new();
        for talkable in self.talkables() {
            ids.push(talkable.unique_id());
            for context in &talkable.contexts {
                ids.push(context.unique_id());
                for column in &context.columns {
                    ids.push(column.unique_id());
                    ids.extend(column.messages.iter().map(|entity| entity.unique_id()));
                }
            }
        }
        ids.extend(self.items.iter().map(|entity| entity.unique_id()));
        for quest in &self.quests {
            ids.push(quest.unique_id());
            ids.extend(quest.states.iter().map(|entity| entity.unique_id()));
        }
        ids
    }

    pub fn summary(&self) -> DataSummary {
        DataSummary {
            characters: self.characters.len(),
            interactables: self.interactables.len(),
            contexts: self.contexts().count(),
            messages: self.messages().count(),
            items: self.items.len(),
            quests: self.quests.len(),
            flags: self.flags.len(),
            talk_logs: self.talk_logs.len(),
        }
    }
}
