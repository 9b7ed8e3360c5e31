//! Localized text entries
//!
//! A localized field is an ordered list with one entry per configured
//! language. Entries are matched on the exact language tag.

use serde::{Deserialize, Serialize};

/// One translation of an authored string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub language: String,
    pub value: String,
}

impl LocalizedText {
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }

    /// One empty entry per language, in the given order.
    pub fn blank_for(languages: &[&str]) -> Vec<LocalizedText> {
        languages
            .iter()
            .map(|language| LocalizedText::new(*language, ""))
            .collect()
    }

    /// The entry recorded for `language`, if any.
    pub fn find<'a>(entries: &'a [LocalizedText], language: &str) -> Option<&'a LocalizedText> {
        entries.iter().find(|entry| entry.language == language)
    }

    /// The text recorded for `language`, if any.
    pub fn text<'a>(entries: &'a [LocalizedText], language: &str) -> Option<&'a str> {
        Self::find(entries, language).map(|entry| entry.value.as_str())
    }

    /// Whether `entries` holds exactly `value` for `language`.
    pub fn matches(entries: &[LocalizedText], value: &str, language: &str) -> bool {
        entries
            .iter()
            .any(|entry| entry.language == language && entry.value == value)
    }

    /// Set the text for `language`, appending an entry when missing.
    pub fn set(entries: &mut Vec<LocalizedText>, language: &str, value: impl Into<String>) {
        let value = value.into();
        match entries.iter_mut().find(|entry| entry.language == language) {
            Some(entry) => entry.value = value,
            None => entries.push(LocalizedText::new(language, value)),
        }
    }
}
