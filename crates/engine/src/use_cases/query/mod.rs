//! Field queries over the dialogue dataset.
//!
//! `find(data, kind, field, value)` returns every entity of `kind` whose
//! `field` equals `value`. Flat kinds filter their top-level collection.
//! Contexts, columns and messages only exist under talkables, so for those
//! kinds every character subtree is searched first, then every interactable
//! subtree, parents before children.
//!
//! A field name the kind does not register is an error even when there is
//! nothing to search, so a typo never looks like an empty result.

mod error;
mod fields;
mod kind;

use serde::Serialize;
use talkbook_domain::{
    Column, Context, DialogueData, Flag, Item, Message, Options, Quest, TalkLog, Talkable,
};

pub use error::QueryError;
pub use fields::{field_type, fields, Accessor, FieldRegistry, FieldType, FieldValue};
pub use kind::ModelKind;

use fields::{
    CHARACTER_FIELDS, COLUMN_FIELDS, CONTEXT_FIELDS, FLAG_FIELDS, INTERACTABLE_FIELDS,
    ITEM_FIELDS, MESSAGE_FIELDS, OPTIONS_FIELDS, QUEST_FIELDS, TALK_LOG_FIELDS,
};

/// A borrowed query match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "entity", rename_all = "snake_case")]
pub enum EntityRef<'a> {
    Options(&'a Options),
    Character(&'a Talkable),
    Context(&'a Context),
    Column(&'a Column),
    Message(&'a Message),
    Interactable(&'a Talkable),
    Item(&'a Item),
    Flag(&'a Flag),
    Quest(&'a Quest),
    TalkLog(&'a TalkLog),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Options(_) => ModelKind::Options,
            Self::Character(_) => ModelKind::Character,
            Self::Context(_) => ModelKind::Context,
            Self::Column(_) => ModelKind::Column,
            Self::Message(_) => ModelKind::Message,
            Self::Interactable(_) => ModelKind::Interactable,
            Self::Item(_) => ModelKind::Item,
            Self::Flag(_) => ModelKind::Flag,
            Self::Quest(_) => ModelKind::Quest,
            Self::TalkLog(_) => ModelKind::TalkLog,
        }
    }
}

/// Every entity of `kind` whose `field` equals `value`, in tree order.
pub fn find<'a>(
    data: &'a DialogueData,
    kind: ModelKind,
    field: &str,
    value: &FieldValue,
) -> Result<Vec<EntityRef<'a>>, QueryError> {
    let matches = match kind {
        ModelKind::Options => wrap(find_options(data, field, value)?, EntityRef::Options),
        ModelKind::Character => wrap(find_characters(data, field, value)?, EntityRef::Character),
        ModelKind::Context => wrap(find_contexts(data, field, value)?, EntityRef::Context),
        ModelKind::Column => wrap(find_columns(data, field, value)?, EntityRef::Column),
        ModelKind::Message => wrap(find_messages(data, field, value)?, EntityRef::Message),
        ModelKind::Interactable => wrap(
            find_interactables(data, field, value)?,
            EntityRef::Interactable,
        ),
        ModelKind::Item => wrap(find_items(data, field, value)?, EntityRef::Item),
        ModelKind::Flag => wrap(find_flags(data, field, value)?, EntityRef::Flag),
        ModelKind::Quest => wrap(find_quests(data, field, value)?, EntityRef::Quest),
        ModelKind::TalkLog => wrap(find_talk_logs(data, field, value)?, EntityRef::TalkLog),
    };

    tracing::debug!(%kind, field, %value, matches = matches.len(), "Ran field query");
    Ok(matches)
}

// =============================================================================
// Typed queries
// =============================================================================

pub fn find_options<'a>(
    data: &'a DialogueData,
    field: &str,
    value: &FieldValue,
) -> Result<Vec<&'a Options>, QueryError> {
    select(&OPTIONS_FIELDS, std::iter::once(&data.options), field, value)
}

pub fn find_characters<'a>(
    data: &'a DialogueData,
    field: &str,
    value: &FieldValue,
) -> Result<Vec<&'a Talkable>, QueryError> {
    select(&CHARACTER_FIELDS, data.characters.iter(), field, value)
}

pub fn find_interactables<'a>(
    data: &'a DialogueData,
    field: &str,
    value: &FieldValue,
) -> Result<Vec<&'a Talkable>, QueryError> {
    select(&INTERACTABLE_FIELDS, data.interactables.iter(), field, value)
}

pub fn find_contexts<'a>(
    data: &'a DialogueData,
    field: &str,
    value: &FieldValue,
) -> Result<Vec<&'a Context>, QueryError> {
    select(&CONTEXT_FIELDS, data.contexts(), field, value)
}

pub fn find_columns<'a>(
    data: &'a DialogueData,
    field: &str,
    value: &FieldValue,
) -> Result<Vec<&'a Column>, QueryError> {
    let columns = data.contexts().flat_map(|context| context.columns.iter());
    select(&COLUMN_FIELDS, columns, field, value)
}

pub fn find_messages<'a>(
    data: &'a DialogueData,
    field: &str,
    value: &FieldValue,
) -> Result<Vec<&'a Message>, QueryError> {
    select(&MESSAGE_FIELDS, data.messages(), field, value)
}

pub fn find_items<'a>(
    data: &'a DialogueData,
    field: &str,
    value: &FieldValue,
) -> Result<Vec<&'a Item>, QueryError> {
    select(&ITEM_FIELDS, data.items.iter(), field, value)
}

pub fn find_flags<'a>(
    data: &'a DialogueData,
    field: &str,
    value: &FieldValue,
) -> Result<Vec<&'a Flag>, QueryError> {
    select(&FLAG_FIELDS, data.flags.iter(), field, value)
}

pub fn find_quests<'a>(
    data: &'a DialogueData,
    field: &str,
    value: &FieldValue,
) -> Result<Vec<&'a Quest>, QueryError> {
    select(&QUEST_FIELDS, data.quests.iter(), field, value)
}

pub fn find_talk_logs<'a>(
    data: &'a DialogueData,
    field: &str,
    value: &FieldValue,
) -> Result<Vec<&'a TalkLog>, QueryError> {
    select(&TALK_LOG_FIELDS, data.talk_logs.iter(), field, value)
}

/// Resolve the accessor before touching `entities` so an unknown field fails
/// on empty collections too.
fn select<'a, T: 'a>(
    registry: &FieldRegistry<T>,
    entities: impl Iterator<Item = &'a T>,
    field: &str,
    value: &FieldValue,
) -> Result<Vec<&'a T>, QueryError> {
    let read = registry.accessor(field)?;
    Ok(entities.filter(|entity| read(entity) == *value).collect())
}

fn wrap<'a, T>(matches: Vec<&'a T>, variant: fn(&'a T) -> EntityRef<'a>) -> Vec<EntityRef<'a>> {
    matches.into_iter().map(variant).collect()
}
