//! Talk log - which messages have been shown to the player this session

use serde::{Deserialize, Serialize};

use crate::ids::UniqueId;

/// Shown messages for one talkable, in the order they were shown.
///
/// Talk logs are session records, not authored content: they are created
/// during play and restored wholesale from a save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkLog {
    pub talkable_name: String,
    #[serde(default)]
    pub message_ids: Vec<UniqueId>,
}

impl TalkLog {
    pub fn new(talkable_name: impl Into<String>) -> Self {
        Self {
            talkable_name: talkable_name.into(),
            message_ids: Vec::new(),
        }
    }

    /// Record a shown message. Returns `false` if it was already logged.
    pub fn record(&mut self, message_id: UniqueId) -> bool {
        if self.contains(message_id.as_str()) {
            return false;
        }
        self.message_ids.push(message_id);
        true
    }

    pub fn contains(&self, message_id: &str) -> bool {
        self.message_ids.iter().any(|id| id == message_id)
    }

    pub fn find<'a>(logs: &'a [TalkLog], talkable_name: &str) -> Option<&'a TalkLog> {
        logs.iter().find(|log| log.talkable_name == talkable_name)
    }

    /// The log recording `message_id`, if the message was shown.
    pub fn find_by_message<'a>(logs: &'a [TalkLog], message_id: &str) -> Option<&'a TalkLog> {
        logs.iter().find(|log| log.contains(message_id))
    }
}
