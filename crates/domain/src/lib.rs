//! Talkbook domain - the authored dialogue dataset and its persisted projections
//!
//! Entities are plain data owned by [`DialogueData`]. Nothing here performs
//! I/O: loading and saving live behind ports in the engine crate.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod persistence;
pub mod value_objects;

pub use aggregates::{DataSummary, DialogueData};
pub use entities::{
    Column, Context, Flag, HasContexts, Item, Language, Message, Options, Quest, QuestState,
    TalkLog, Talkable, TalkableKind, DEFAULT_INFLUENCE,
};
pub use error::DomainError;
pub use ids::{Identified, UniqueId};
pub use persistence::{
    get_array_data, set_array_data, ApplyReport, Persistable, PersistentDocument, SaveGame,
    SAVE_VERSION,
};
pub use value_objects::LocalizedText;
