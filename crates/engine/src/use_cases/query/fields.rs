//! Per-kind field registries.
//!
//! Each queryable kind registers the fields that can be matched on, mapping a
//! field name to a typed accessor. Registries are built once, on first use.

use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;
use talkbook_domain::{Column, Context, Flag, Item, Message, Options, Quest, TalkLog, Talkable};

use super::{ModelKind, QueryError};

/// A field value read off an entity, or the value a query compares against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

/// The variant of [`FieldValue`] a field produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text(_) => FieldType::Text,
            Self::Integer(_) => FieldType::Integer,
            Self::Boolean(_) => FieldType::Boolean,
        }
    }

    /// Parse a raw string as a value of `field_type`.
    pub fn parse(field: &str, field_type: FieldType, raw: &str) -> Result<Self, QueryError> {
        let invalid = || QueryError::InvalidValue {
            field: field.to_string(),
            value: raw.to_string(),
            expected: field_type.as_str(),
        };
        match field_type {
            FieldType::Text => Ok(Self::Text(raw.to_string())),
            FieldType::Integer => raw.trim().parse().map(Self::Integer).map_err(|_| invalid()),
            FieldType::Boolean => raw.trim().parse().map(Self::Boolean).map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        Self::Integer(i64::from(value))
    }
}

/// Reads one field off an entity.
pub type Accessor<T> = fn(&T) -> FieldValue;

struct Field<T> {
    name: &'static str,
    field_type: FieldType,
    read: Accessor<T>,
}

/// Named accessors for one model kind, in registration order.
pub struct FieldRegistry<T> {
    kind: ModelKind,
    fields: Vec<Field<T>>,
}

impl<T> FieldRegistry<T> {
    fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
        }
    }

    fn field(mut self, name: &'static str, field_type: FieldType, read: Accessor<T>) -> Self {
        self.fields.push(Field {
            name,
            field_type,
            read,
        });
        self
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// The accessor for `name`, or `FieldNotFound`.
    pub fn accessor(&self, name: &str) -> Result<Accessor<T>, QueryError> {
        self.lookup(name).map(|field| field.read)
    }

    pub fn field_type(&self, name: &str) -> Result<FieldType, QueryError> {
        self.lookup(name).map(|field| field.field_type)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.name).collect()
    }

    fn lookup(&self, name: &str) -> Result<&Field<T>, QueryError> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .ok_or_else(|| QueryError::field_not_found(self.kind, name))
    }
}

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

// =============================================================================
// Registries
// =============================================================================

pub(crate) static OPTIONS_FIELDS: Lazy<FieldRegistry<Options>> = Lazy::new(|| {
    FieldRegistry::<Options>::new(ModelKind::Options)
        .field("current_language", FieldType::Text, |o| text(&o.current_language))
        .field("language_count", FieldType::Integer, |o| {
            FieldValue::Integer(i64::try_from(o.languages.len()).unwrap_or(i64::MAX))
        })
});

pub(crate) static CHARACTER_FIELDS: Lazy<FieldRegistry<Talkable>> = Lazy::new(|| {
    FieldRegistry::<Talkable>::new(ModelKind::Character)
        .field("unique_id", FieldType::Text, |t| text(t.unique_id.as_str()))
        .field("name", FieldType::Text, |t| text(&t.name))
        // Loaded data only holds characters here; see `DialogueData::validate_kinds`.
        .field("influence", FieldType::Integer, |t| {
            FieldValue::from(t.influence().unwrap_or_default())
        })
        .field("on_scene", FieldType::Boolean, |t| t.on_scene.into())
});

pub(crate) static INTERACTABLE_FIELDS: Lazy<FieldRegistry<Talkable>> = Lazy::new(|| {
    FieldRegistry::<Talkable>::new(ModelKind::Interactable)
        .field("unique_id", FieldType::Text, |t| text(t.unique_id.as_str()))
        .field("name", FieldType::Text, |t| text(&t.name))
        .field("on_scene", FieldType::Boolean, |t| t.on_scene.into())
});

pub(crate) static CONTEXT_FIELDS: Lazy<FieldRegistry<Context>> = Lazy::new(|| {
    FieldRegistry::<Context>::new(ModelKind::Context)
        .field("unique_id", FieldType::Text, |c| text(c.unique_id.as_str()))
        .field("id", FieldType::Integer, |c| c.id.into())
        .field("happened", FieldType::Boolean, |c| c.happened.into())
});

pub(crate) static COLUMN_FIELDS: Lazy<FieldRegistry<Column>> = Lazy::new(|| {
    FieldRegistry::<Column>::new(ModelKind::Column)
        .field("unique_id", FieldType::Text, |c| text(c.unique_id.as_str()))
        .field("id", FieldType::Integer, |c| c.id.into())
        .field("emitter", FieldType::Text, |c| text(&c.emitter))
});

pub(crate) static MESSAGE_FIELDS: Lazy<FieldRegistry<Message>> = Lazy::new(|| {
    FieldRegistry::<Message>::new(ModelKind::Message)
        .field("unique_id", FieldType::Text, |m| text(m.unique_id.as_str()))
        .field("id", FieldType::Integer, |m| m.id.into())
        .field("emitter", FieldType::Text, |m| text(&m.emitter))
        .field("is_a_question", FieldType::Boolean, |m| m.is_a_question.into())
        .field("disposable", FieldType::Boolean, |m| m.disposable.into())
        .field("already_spoken", FieldType::Boolean, |m| m.already_spoken.into())
});

pub(crate) static ITEM_FIELDS: Lazy<FieldRegistry<Item>> = Lazy::new(|| {
    FieldRegistry::<Item>::new(ModelKind::Item)
        .field("unique_id", FieldType::Text, |i| text(i.unique_id.as_str()))
        .field("id", FieldType::Integer, |i| i.id.into())
        .field("have", FieldType::Boolean, |i| i.have.into())
        .field("discarded", FieldType::Boolean, |i| i.discarded.into())
        .field("equipped", FieldType::Boolean, |i| i.equipped.into())
});

pub(crate) static FLAG_FIELDS: Lazy<FieldRegistry<Flag>> = Lazy::new(|| {
    FieldRegistry::<Flag>::new(ModelKind::Flag)
        .field("name", FieldType::Text, |f| text(&f.name))
        .field("value", FieldType::Boolean, |f| f.value.into())
});

pub(crate) static QUEST_FIELDS: Lazy<FieldRegistry<Quest>> = Lazy::new(|| {
    FieldRegistry::<Quest>::new(ModelKind::Quest)
        .field("unique_id", FieldType::Text, |q| text(q.unique_id.as_str()))
        .field("name", FieldType::Text, |q| text(&q.name))
        .field("initialized", FieldType::Boolean, |q| q.initialized.into())
        .field("finished", FieldType::Boolean, |q| q.finished.into())
});

pub(crate) static TALK_LOG_FIELDS: Lazy<FieldRegistry<TalkLog>> = Lazy::new(|| {
    FieldRegistry::<TalkLog>::new(ModelKind::TalkLog)
        .field("talkable_name", FieldType::Text, |l| text(&l.talkable_name))
        .field("message_count", FieldType::Integer, |l| {
            FieldValue::Integer(i64::try_from(l.message_ids.len()).unwrap_or(i64::MAX))
        })
});

/// Field names registered for `kind`, in registration order.
pub fn fields(kind: ModelKind) -> Vec<&'static str> {
    match kind {
        ModelKind::Options => OPTIONS_FIELDS.names(),
        ModelKind::Character => CHARACTER_FIELDS.names(),
        ModelKind::Context => CONTEXT_FIELDS.names(),
        ModelKind::Column => COLUMN_FIELDS.names(),
        ModelKind::Message => MESSAGE_FIELDS.names(),
        ModelKind::Interactable => INTERACTABLE_FIELDS.names(),
        ModelKind::Item => ITEM_FIELDS.names(),
        ModelKind::Flag => FLAG_FIELDS.names(),
        ModelKind::Quest => QUEST_FIELDS.names(),
        ModelKind::TalkLog => TALK_LOG_FIELDS.names(),
    }
}

/// The value type of `field` on `kind`.
pub fn field_type(kind: ModelKind, field: &str) -> Result<FieldType, QueryError> {
    match kind {
        ModelKind::Options => OPTIONS_FIELDS.field_type(field),
        ModelKind::Character => CHARACTER_FIELDS.field_type(field),
        ModelKind::Context => CONTEXT_FIELDS.field_type(field),
        ModelKind::Column => COLUMN_FIELDS.field_type(field),
        ModelKind::Message => MESSAGE_FIELDS.field_type(field),
        ModelKind::Interactable => INTERACTABLE_FIELDS.field_type(field),
        ModelKind::Item => ITEM_FIELDS.field_type(field),
        ModelKind::Flag => FLAG_FIELDS.field_type(field),
        ModelKind::Quest => QUEST_FIELDS.field_type(field),
        ModelKind::TalkLog => TALK_LOG_FIELDS.field_type(field),
    }
}
