//! Message entity - a single line of dialogue inside a column

use serde::{Deserialize, Serialize};

use crate::ids::{impl_identified, UniqueId};
use crate::value_objects::LocalizedText;

/// Leaf dialogue content owned by exactly one [`Column`](super::Column).
///
/// `unique_id` identifies the message globally, independent of its position.
/// `already_spoken` is the only field that changes during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub unique_id: UniqueId,
    /// Row label inside the owning column
    pub id: u32,
    /// Who speaks the line ("Player" or a talkable name)
    #[serde(default)]
    pub emitter: String,
    #[serde(default)]
    pub content: Vec<LocalizedText>,
    #[serde(default)]
    pub screenplay_notes: Vec<LocalizedText>,
    #[serde(default)]
    pub is_a_question: bool,
    /// Shown at most once per playthrough
    #[serde(default)]
    pub disposable: bool,
    #[serde(default)]
    pub already_spoken: bool,
}

impl_identified!(Message);

impl Message {
    pub fn new(id: u32, emitter: impl Into<String>, languages: &[&str]) -> Self {
        Self {
            unique_id: UniqueId::generate(),
            id,
            emitter: emitter.into(),
            content: LocalizedText::blank_for(languages),
            screenplay_notes: LocalizedText::blank_for(languages),
            is_a_question: false,
            disposable: false,
            already_spoken: false,
        }
    }

    pub fn with_content(mut self, language: &str, text: impl Into<String>) -> Self {
        LocalizedText::set(&mut self.content, language, text);
        self
    }

    pub fn as_question(mut self) -> Self {
        self.is_a_question = true;
        self
    }

    pub fn as_disposable(mut self) -> Self {
        self.disposable = true;
        self
    }

    /// The content in `language`, if translated.
    pub fn text(&self, language: &str) -> Option<&str> {
        LocalizedText::text(&self.content, language)
    }

    /// Whether the message may still be shown.
    pub fn is_available(&self) -> bool {
        !(self.disposable && self.already_spoken)
    }

    /// Find a message by its position in a column.
    pub fn find(messages: &[Message], index: usize) -> Option<&Message> {
        messages.get(index)
    }

    /// Find a message by unique id within one column.
    pub fn find_by_unique_id<'a>(messages: &'a [Message], unique_id: &str) -> Option<&'a Message> {
        messages.iter().find(|m| m.unique_id == unique_id)
    }
}
