//! Column entity - a branch of dialogue inside a context

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Message;
use crate::ids::{impl_identified, Identified, UniqueId};

/// An ordered run of [`Message`]s owned by exactly one [`Context`](super::Context).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub unique_id: UniqueId,
    /// Column label inside the owning context
    pub id: u32,
    /// Default speaker for new messages
    #[serde(default)]
    pub emitter: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl_identified!(Column);

impl Column {
    pub fn new(id: u32, emitter: impl Into<String>) -> Self {
        Self {
            unique_id: UniqueId::generate(),
            id,
            emitter: emitter.into(),
            messages: Vec::new(),
        }
    }

    /// Append a message, assigning its row label.
    ///
    /// Returns the index of the new message.
    pub fn add_message(&mut self, mut message: Message) -> usize {
        message.id = next_label(self.messages.iter().map(|m| m.id));
        self.messages.push(message);
        self.messages.len() - 1
    }

    /// Remove a message by unique id, returning it when present.
    pub fn remove_message(&mut self, unique_id: &str) -> Option<Message> {
        let index = self.messages.iter().position(|m| m.unique_id == unique_id)?;
        Some(self.messages.remove(index))
    }

    /// Assign missing ids to the column and its messages. Returns how many were assigned.
    pub fn ensure_tree_ids(&mut self) -> usize {
        let own = usize::from(self.ensure_id());
        own + self
            .messages
            .iter_mut()
            .map(|m| usize::from(m.ensure_id()))
            .sum::<usize>()
    }

    /// Clear every id in the subtree.
    pub(crate) fn clear_tree_ids(&mut self) {
        self.unique_id.clear();
        for message in &mut self.messages {
            message.unique_id.clear();
        }
    }

    /// Find a column by its position in a context.
    pub fn find(columns: &[Column], index: usize) -> Option<&Column> {
        columns.get(index)
    }

    pub fn find_mut(columns: &mut [Column], index: usize) -> Option<&mut Column> {
        columns.get_mut(index)
    }
}

/// Next free label after the highest existing one.
///
/// When the highest label is `u32::MAX` the lowest unused label is returned
/// instead, so a new label never collides with an existing one.
pub(crate) fn next_label(labels: impl Iterator<Item = u32>) -> u32 {
    let used: BTreeSet<u32> = labels.collect();
    let Some(&max) = used.last() else {
        return 0;
    };
    max.checked_add(1)
        .or_else(|| (0..=u32::MAX).find(|label| !used.contains(label)))
        .unwrap_or(max)
}
