//! Dialogue dataset entities.
//!
//! Containment is a strict tree: talkable → context → column → message.
//! Items, quests, flags and talk logs are flat top-level collections.

mod column;
mod context;
mod flag;
mod item;
mod message;
mod options;
mod quest;
mod talk_log;
mod talkable;

pub use column::Column;
pub use context::Context;
pub use flag::Flag;
pub use item::Item;
pub use message::Message;
pub use options::{Language, Options};
pub use quest::{Quest, QuestState};
pub use talk_log::TalkLog;
pub use talkable::{HasContexts, Talkable, TalkableKind, DEFAULT_INFLUENCE};
