//! Persisted document shapes.
//!
//! These are dedicated serde structs: authored types can change freely without
//! breaking existing saves.

use serde::{Deserialize, Serialize};

use super::PersistentDocument;
use crate::ids::UniqueId;

/// Persisted talkable, tagged by variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TalkablePersistent {
    Character {
        id: UniqueId,
        influence: u8,
        #[serde(default)]
        contexts: Vec<ContextPersistent>,
    },
    Interactable {
        id: UniqueId,
        #[serde(default)]
        contexts: Vec<ContextPersistent>,
    },
    Talkable {
        id: UniqueId,
        #[serde(default)]
        contexts: Vec<ContextPersistent>,
    },
}

impl TalkablePersistent {
    pub fn id(&self) -> &UniqueId {
        match self {
            Self::Character { id, .. } | Self::Interactable { id, .. } | Self::Talkable { id, .. } => {
                id
            }
        }
    }

    pub fn contexts(&self) -> &[ContextPersistent] {
        match self {
            Self::Character { contexts, .. }
            | Self::Interactable { contexts, .. }
            | Self::Talkable { contexts, .. } => contexts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextPersistent {
    pub id: UniqueId,
    #[serde(default)]
    pub happened: bool,
    #[serde(default)]
    pub columns: Vec<ColumnPersistent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPersistent {
    pub id: UniqueId,
    #[serde(default)]
    pub messages: Vec<MessagePersistent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePersistent {
    pub id: UniqueId,
    #[serde(default)]
    pub already_spoken: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPersistent {
    pub id: UniqueId,
    #[serde(default)]
    pub have: bool,
    #[serde(default)]
    pub discarded: bool,
    #[serde(default)]
    pub equipped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestPersistent {
    pub id: UniqueId,
    #[serde(default)]
    pub current_state_id: Option<UniqueId>,
    #[serde(default)]
    pub initialized: bool,
    #[serde(default)]
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagPersistent {
    pub name: String,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkLogPersistent {
    pub talkable_name: String,
    #[serde(default)]
    pub message_ids: Vec<UniqueId>,
}

impl PersistentDocument for TalkablePersistent {
    fn key(&self) -> &str {
        self.id().as_str()
    }
}

macro_rules! keyed_by {
    ($doc:ty, $field:ident) => {
        impl PersistentDocument for $doc {
            fn key(&self) -> &str {
                self.$field.as_str()
            }
        }
    };
}

keyed_by!(ContextPersistent, id);
keyed_by!(ColumnPersistent, id);
keyed_by!(MessagePersistent, id);
keyed_by!(ItemPersistent, id);
keyed_by!(QuestPersistent, id);
keyed_by!(FlagPersistent, name);
keyed_by!(TalkLogPersistent, talkable_name);
