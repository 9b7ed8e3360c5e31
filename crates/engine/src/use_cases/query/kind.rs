//! Queryable model kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::QueryError;

/// Every collection the query engine can search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Options,
    Character,
    Context,
    Column,
    Message,
    Interactable,
    Item,
    Flag,
    Quest,
    TalkLog,
}

impl ModelKind {
    pub const ALL: [ModelKind; 10] = [
        ModelKind::Options,
        ModelKind::Character,
        ModelKind::Context,
        ModelKind::Column,
        ModelKind::Message,
        ModelKind::Interactable,
        ModelKind::Item,
        ModelKind::Flag,
        ModelKind::Quest,
        ModelKind::TalkLog,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Options => "options",
            Self::Character => "character",
            Self::Context => "context",
            Self::Column => "column",
            Self::Message => "message",
            Self::Interactable => "interactable",
            Self::Item => "item",
            Self::Flag => "flag",
            Self::Quest => "quest",
            Self::TalkLog => "talk_log",
        }
    }

    /// Kinds that only exist nested under characters and interactables.
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Context | Self::Column | Self::Message)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = QueryError;

    /// Parses snake_case names case-insensitively; `talklog` is accepted for
    /// `talk_log`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized == "talklog" {
            return Ok(Self::TalkLog);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| QueryError::UnknownModel(s.to_string()))
    }
}
