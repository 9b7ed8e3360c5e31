//! Whole-dataset save document.

use serde::{Deserialize, Serialize};

use super::documents::{
    FlagPersistent, ItemPersistent, QuestPersistent, TalkLogPersistent, TalkablePersistent,
};
use super::{get_array_data, set_array_data, ApplyReport};
use crate::aggregates::DialogueData;
use crate::entities::TalkLog;

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

/// Player progress for one dataset, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame {
    /// Save format version for compatibility checking.
    pub version: u32,
    #[serde(default)]
    pub characters: Vec<TalkablePersistent>,
    #[serde(default)]
    pub interactables: Vec<TalkablePersistent>,
    #[serde(default)]
    pub quests: Vec<QuestPersistent>,
    #[serde(default)]
    pub talk_logs: Vec<TalkLogPersistent>,
    #[serde(default)]
    pub items: Vec<ItemPersistent>,
    #[serde(default)]
    pub flags: Vec<FlagPersistent>,
}

impl SaveGame {
    /// Snapshot the progress of `data`.
    pub fn capture(data: &DialogueData) -> Self {
        Self {
            version: SAVE_VERSION,
            characters: get_array_data(&data.characters),
            interactables: get_array_data(&data.interactables),
            quests: get_array_data(&data.quests),
            talk_logs: get_array_data(&data.talk_logs),
            items: get_array_data(&data.items),
            flags: get_array_data(&data.flags),
        }
    }

    pub fn is_current(&self) -> bool {
        self.version == SAVE_VERSION
    }

    /// Apply this save onto freshly loaded content.
    ///
    /// Talk logs are history rather than authored content, so they replace
    /// whatever `data` holds instead of being matched.
    pub fn apply_to(&self, data: &mut DialogueData) -> ApplyReport {
        let mut report = ApplyReport::default();
        report += set_array_data(&mut data.characters, &self.characters);
        report += set_array_data(&mut data.interactables, &self.interactables);
        report += set_array_data(&mut data.quests, &self.quests);
        report += set_array_data(&mut data.items, &self.items);
        report += set_array_data(&mut data.flags, &self.flags);

        data.talk_logs = self.talk_logs.iter().map(TalkLog::from).collect();
        report.applied += self.talk_logs.len();

        tracing::debug!(
            applied = report.applied,
            skipped = report.skipped,
            "Applied saved progress"
        );
        report
    }
}
