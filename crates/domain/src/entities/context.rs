//! Context entity - a conversation scope owned by a talkable

use serde::{Deserialize, Serialize};

use super::column::next_label;
use super::{Column, HasContexts};
use crate::ids::{impl_identified, Identified, UniqueId};
use crate::value_objects::LocalizedText;

/// A conversation scope owned by exactly one talkable.
///
/// `happened` flips once the conversation has been played through and is the
/// only part of a context that is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub unique_id: UniqueId,
    /// Context label inside the owning talkable
    pub id: u32,
    #[serde(default)]
    pub name: Vec<LocalizedText>,
    #[serde(default)]
    pub description: Vec<LocalizedText>,
    #[serde(default)]
    pub happened: bool,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl_identified!(Context);

impl Context {
    pub fn new(id: u32, languages: &[&str]) -> Self {
        Self {
            unique_id: UniqueId::generate(),
            id,
            name: LocalizedText::blank_for(languages),
            description: LocalizedText::blank_for(languages),
            happened: false,
            columns: Vec::new(),
        }
    }

    pub fn with_name(mut self, language: &str, name: impl Into<String>) -> Self {
        LocalizedText::set(&mut self.name, language, name);
        self
    }

    /// The name in `language`, if translated.
    pub fn name_in(&self, language: &str) -> Option<&str> {
        LocalizedText::text(&self.name, language)
    }

    /// Append a column, assigning its label. Returns the column index.
    pub fn add_column(&mut self, mut column: Column) -> usize {
        column.id = next_label(self.columns.iter().map(|c| c.id));
        self.columns.push(column);
        self.columns.len() - 1
    }

    pub fn remove_column(&mut self, unique_id: &str) -> Option<Column> {
        let index = self.columns.iter().position(|c| c.unique_id == unique_id)?;
        Some(self.columns.remove(index))
    }

    /// Number of messages across all columns.
    pub fn message_count(&self) -> usize {
        self.columns.iter().map(|c| c.messages.len()).sum()
    }

    /// Assign missing ids in the subtree. Returns how many were assigned.
    pub fn ensure_tree_ids(&mut self) -> usize {
        let own = usize::from(self.ensure_id());
        own + self
            .columns
            .iter_mut()
            .map(Column::ensure_tree_ids)
            .sum::<usize>()
    }

    pub(crate) fn clear_tree_ids(&mut self) {
        self.unique_id.clear();
        for column in &mut self.columns {
            column.clear_tree_ids();
        }
    }

    /// Copy this context with fresh ids throughout the subtree.
    ///
    /// The copy shares no id with the original, so both can live in one
    /// dataset.
    pub fn duplicate(&self) -> Context {
        let mut copy = self.clone();
        copy.clear_tree_ids();
        copy.ensure_tree_ids();
        copy
    }

    /// Find a context by its position under `owner`.
    pub fn find<O: HasContexts + ?Sized>(owner: &O, index: usize) -> Option<&Context> {
        owner.contexts().get(index)
    }

    /// Find the first context under `owner` whose name in `language` is `name`.
    pub fn find_by_name<'a, O: HasContexts + ?Sized>(
        owner: &'a O,
        name: &str,
        language: &str,
    ) -> Option<&'a Context> {
        owner
            .contexts()
            .iter()
            .find(|context| LocalizedText::matches(&context.name, name, language))
    }

    pub fn find_mut<O: HasContexts + ?Sized>(owner: &mut O, index: usize) -> Option<&mut Context> {
        owner.contexts_mut().get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Talkable;

    fn owner() -> Talkable {
        let langs = ["English", "Português"];
        let mut mira = Talkable::character("Mira", &langs);
        mira.add_context(
            Context::new(0, &langs)
                .with_name("English", "Intro")
                .with_name("Português", "Introdução"),
        );
        mira.add_context(Context::new(0, &langs).with_name("English", "Farewell"));
        mira
    }

    #[test]
    fn find_by_index() {
        let mira = owner();
        assert_eq!(Context::find(&mira, 1).and_then(|c| c.name_in("English")), Some("Farewell"));
        assert!(Context::find(&mira, 2).is_none());
    }

    #[test]
    fn find_by_name_matches_language() {
        let mira = owner();
        assert!(Context::find_by_name(&mira, "Intro", "English").is_some());
        assert!(Context::find_by_name(&mira, "Introdução", "Português").is_some());
        assert!(Context::find_by_name(&mira, "Intro", "Português").is_none());
        assert!(Context::find_by_name(&mira, "Farewell", "Português").is_none());
    }

    #[test]
    fn duplicate_assigns_fresh_ids() {
        let mut context = Context::new(0, &["English"]);
        let mut column = Column::new(0, "Mira");
        column.add_message(crate::entities::Message::new(0, "Mira", &["English"]));
        context.add_column(column);

        let copy = context.duplicate();
        assert_ne!(copy.unique_id, context.unique_id);
        assert_ne!(copy.columns[0].unique_id, context.columns[0].unique_id);
        assert_ne!(
            copy.columns[0].messages[0].unique_id,
            context.columns[0].messages[0].unique_id
        );
        assert!(!copy.columns[0].messages[0].unique_id.is_empty());
    }

    #[test]
    fn add_column_after_maximum_label() {
        let mut context = Context::new(0, &["English"]);
        context.columns.push(Column::new(u32::MAX, "Mira"));

        assert_eq!(context.add_column(Column::new(0, "Player")), 1);
        assert_eq!(context.columns[1].id, 0);
    }

    #[test]
    fn message_count_spans_columns() {
        let mut context = Context::new(0, &["English"]);
        let mut first = Column::new(0, "Mira");
        first.add_message(crate::entities::Message::new(0, "Mira", &["English"]));
        let mut second = Column::new(0, "Player");
        second.add_message(crate::entities::Message::new(0, "Player", &["English"]));
        second.add_message(crate::entities::Message::new(0, "Player", &["English"]));
        context.add_column(first);
        context.add_column(second);

        assert_eq!(context.message_count(), 3);
        assert_eq!(context.columns[1].id, 1);
    }
}
