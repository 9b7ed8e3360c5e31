//! Talkable entity - anything the player can hold a conversation with
//!
//! Characters, interactables and plain talkables share one struct. The
//! variant-specific data lives in [`TalkableKind`] so that every piece of code
//! that depends on the variant has to match on it exhaustively.

use serde::{Deserialize, Serialize};

use super::column::next_label;
use super::Context;
use crate::ids::{impl_identified, Identified, UniqueId};
use crate::value_objects::LocalizedText;

/// Influence a new character starts with.
pub const DEFAULT_INFLUENCE: u8 = 50;

/// The closed set of talkable variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TalkableKind {
    /// A person; tracks how much the player has swayed them
    Character { influence: u8 },
    /// An object in the scene that can be talked to or examined
    Interactable,
    /// A talkable with no variant data
    Plain,
}

impl TalkableKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Character { .. } => "Character",
            Self::Interactable => "Interactable",
            Self::Plain => "Talkable",
        }
    }
}

/// Owners of a context sequence.
///
/// Contexts, columns and messages only exist under such owners, so queries
/// over them walk every owner instead of a global list.
pub trait HasContexts {
    fn contexts(&self) -> &[Context];

    fn contexts_mut(&mut self) -> &mut Vec<Context>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talkable {
    #[serde(default)]
    pub unique_id: UniqueId,
    pub name: String,
    #[serde(default)]
    pub description: Vec<LocalizedText>,
    #[serde(default)]
    pub contexts: Vec<Context>,
    pub kind: TalkableKind,
    /// Whether the talkable is present in the running scene
    #[serde(skip)]
    pub on_scene: bool,
}

impl_identified!(Talkable);

impl Talkable {
    pub fn new(name: impl Into<String>, kind: TalkableKind, languages: &[&str]) -> Self {
        Self {
            unique_id: UniqueId::generate(),
            name: name.into(),
            description: LocalizedText::blank_for(languages),
            contexts: Vec::new(),
            kind,
            on_scene: false,
        }
    }

    pub fn character(name: impl Into<String>, languages: &[&str]) -> Self {
        Self::new(
            name,
            TalkableKind::Character {
                influence: DEFAULT_INFLUENCE,
            },
            languages,
        )
    }

    pub fn interactable(name: impl Into<String>, languages: &[&str]) -> Self {
        Self::new(name, TalkableKind::Interactable, languages)
    }

    pub fn plain(name: impl Into<String>, languages: &[&str]) -> Self {
        Self::new(name, TalkableKind::Plain, languages)
    }

    pub fn is_character(&self) -> bool {
        matches!(self.kind, TalkableKind::Character { .. })
    }

    pub fn is_interactable(&self) -> bool {
        matches!(self.kind, TalkableKind::Interactable)
    }

    /// Influence for characters, `None` for other variants.
    pub fn influence(&self) -> Option<u8> {
        match self.kind {
            TalkableKind::Character { influence } => Some(influence),
            TalkableKind::Interactable | TalkableKind::Plain => None,
        }
    }

    /// Set the influence of a character, clamped to 0..=100.
    ///
    /// Returns `false` without change for other variants.
    pub fn set_influence(&mut self, value: u8) -> bool {
        match &mut self.kind {
            TalkableKind::Character { influence } => {
                *influence = value.min(100);
                true
            }
            TalkableKind::Interactable | TalkableKind::Plain => false,
        }
    }

    /// Append a context, assigning its label. Returns the context index.
    pub fn add_context(&mut self, mut context: Context) -> usize {
        context.id = next_label(self.contexts.iter().map(|c| c.id));
        self.contexts.push(context);
        self.contexts.len() - 1
    }

    pub fn remove_context(&mut self, unique_id: &str) -> Option<Context> {
        let index = self.contexts.iter().position(|c| c.unique_id == unique_id)?;
        Some(self.contexts.remove(index))
    }

    /// Assign missing ids in the subtree. Returns how many were assigned.
    pub fn ensure_tree_ids(&mut self) -> usize {
        let own = usize::from(self.ensure_id());
        own + self
            .contexts
            .iter_mut()
            .map(Context::ensure_tree_ids)
            .sum::<usize>()
    }

    /// Copy this talkable with fresh ids throughout the subtree.
    pub fn duplicate(&self) -> Talkable {
        let mut copy = self.clone();
        copy.unique_id.clear();
        for context in &mut copy.contexts {
            context.clear_tree_ids();
        }
        copy.ensure_tree_ids();
        copy
    }

    /// First talkable named exactly `name`.
    pub fn find<'a>(talkables: &'a [Talkable], name: &str) -> Option<&'a Talkable> {
        talkables.iter().find(|t| t.name == name)
    }

    pub fn find_mut<'a>(talkables: &'a mut [Talkable], name: &str) -> Option<&'a mut Talkable> {
        talkables.iter_mut().find(|t| t.name == name)
    }
}

impl HasContexts for Talkable {
    fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    fn contexts_mut(&mut self) -> &mut Vec<Context> {
        &mut self.contexts
    }
}
