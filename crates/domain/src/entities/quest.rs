//! Quest entity - a sequence of states the player advances through

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{impl_identified, Identified, UniqueId};

/// One step of a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestState {
    #[serde(default)]
    pub unique_id: UniqueId,
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
}

impl_identified!(QuestState);

impl QuestState {
    pub fn new(short_description: impl Into<String>) -> Self {
        Self {
            unique_id: UniqueId::generate(),
            short_description: short_description.into(),
            long_description: String::new(),
        }
    }
}

/// A quest and the player's progress through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    #[serde(default)]
    pub unique_id: UniqueId,
    pub name: String,
    #[serde(default)]
    pub states: Vec<QuestState>,
    #[serde(default)]
    pub current_state_id: Option<UniqueId>,
    #[serde(default)]
    pub initialized: bool,
    #[serde(default)]
    pub finished: bool,
}

impl_identified!(Quest);

impl Quest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            unique_id: UniqueId::generate(),
            name: name.into(),
            states: Vec::new(),
            current_state_id: None,
            initialized: false,
            finished: false,
        }
    }

    pub fn with_state(mut self, short_description: impl Into<String>) -> Self {
        self.states.push(QuestState::new(short_description));
        self
    }

    /// Start the quest at its first state. Does nothing if already started.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.current_state_id = self.states.first().map(|s| s.unique_id.clone());
    }

    /// Move to the state with `state_id`, starting the quest if needed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` when the quest has no such state.
    pub fn set_state(&mut self, state_id: &str) -> Result<(), DomainError> {
        let state = self
            .states
            .iter()
            .find(|s| s.unique_id == state_id)
            .ok_or_else(|| DomainError::not_found("QuestState", state_id))?;
        self.current_state_id = Some(state.unique_id.clone());
        self.initialized = true;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.initialized = true;
        self.finished = true;
    }

    /// The state the quest is currently in.
    pub fn current_state(&self) -> Option<&QuestState> {
        let current = self.current_state_id.as_ref()?;
        self.states.iter().find(|s| &s.unique_id == current)
    }

    /// Assign missing ids to the quest and its states. Returns how many were assigned.
    pub fn ensure_tree_ids(&mut self) -> usize {
        let own = usize::from(self.ensure_id());
        own + self
            .states
            .iter_mut()
            .map(|s| usize::from(s.ensure_id()))
            .sum::<usize>()
    }

    pub fn is_active(&self) -> bool {
        self.initialized && !self.finished
    }

    /// First quest named exactly `name`.
    pub fn find<'a>(quests: &'a [Quest], name: &str) -> Option<&'a Quest> {
        quests.iter().find(|q| q.name == name)
    }

    pub fn find_mut<'a>(quests: &'a mut [Quest], name: &str) -> Option<&'a mut Quest> {
        quests.iter_mut().find(|q| q.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quest() -> Quest {
        Quest::new("Lost Ring")
            .with_state("Ask around town")
            .with_state("Search the well")
    }

    #[test]
    fn initialize_enters_first_state() {
        let mut q = quest();
        assert!(q.current_state().is_none());
        q.initialize();
        assert!(q.is_active());
        assert_eq!(
            q.current_state().map(|s| s.short_description.as_str()),
            Some("Ask around town")
        );
    }

    #[test]
    fn set_state_moves_and_rejects_unknown() {
        let mut q = quest();
        let second = q.states[1].unique_id.clone();
        q.set_state(second.as_str()).unwrap();
        assert_eq!(q.current_state_id.as_ref(), Some(&second));
        assert!(q.initialized);

        let err = q.set_state("missing").unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(q.current_state_id.as_ref(), Some(&second));
    }

    #[test]
    fn finish_deactivates() {
        let mut q = quest();
        q.initialize();
        q.finish();
        assert!(!q.is_active());
    }

    #[test]
    fn find_by_name() {
        let quests = vec![quest(), Quest::new("Other")];
        assert_eq!(Quest::find(&quests, "Other").map(|q| q.name.as_str()), Some("Other"));
        assert!(Quest::find(&quests, "lost ring").is_none());
    }
}
