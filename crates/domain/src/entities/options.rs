//! Options entity - global dataset configuration

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A language the dataset is authored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
}

impl Language {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Dataset-wide configuration. Exactly one instance exists per dataset.
///
/// The first entry of `languages` is the default language used whenever a
/// lookup does not name one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub languages: Vec<Language>,
    /// Language selected for playback
    #[serde(default)]
    pub current_language: String,
}

impl Options {
    /// Create options for the given languages, selecting the first one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `languages` is empty.
    pub fn new<I, S>(languages: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let languages: Vec<Language> = languages.into_iter().map(Language::new).collect();
        let first = languages
            .first()
            .ok_or_else(|| DomainError::validation("At least one language is required"))?;
        Ok(Self {
            current_language: first.name.clone(),
            languages,
        })
    }

    /// The first configured language.
    pub fn default_language(&self) -> Option<&str> {
        self.languages.first().map(|l| l.name.as_str())
    }

    /// Resolve an optional language argument to a concrete language name.
    pub fn resolve_language<'a>(&'a self, language: Option<&'a str>) -> Option<&'a str> {
        match language {
            Some(lang) if !lang.is_empty() => Some(lang),
            _ => self.default_language(),
        }
    }

    pub fn language_names(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|l| l.name.as_str())
    }

    pub fn has_language(&self, name: &str) -> bool {
        self.languages.iter().any(|l| l.name == name)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            languages: vec![Language::new("English")],
            current_language: "English".to_string(),
        }
    }
}
