//! Flag entity - named boolean switches for story progress
//!
//! Flags are global: one flat list per dataset, keyed by name.

use serde::{Deserialize, Serialize};

/// A global flag with its current value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// The flag name (unique within the dataset)
    pub name: String,
    /// The flag value (true = set, false = unset)
    #[serde(default)]
    pub value: bool,
}

impl Flag {
    /// Create a new flag
    pub fn new(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Create an unset flag
    pub fn unset(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn find<'a>(flags: &'a [Flag], name: &str) -> Option<&'a Flag> {
        flags.iter().find(|f| f.name == name)
    }

    pub fn find_mut<'a>(flags: &'a mut [Flag], name: &str) -> Option<&'a mut Flag> {
        flags.iter_mut().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_flag_by_name() {
        let mut flags = vec![Flag::unset("met_mira"), Flag::new("door_open", true)];
        assert_eq!(Flag::find(&flags, "door_open").map(|f| f.value), Some(true));
        assert!(Flag::find(&flags, "unknown").is_none());

        if let Some(flag) = Flag::find_mut(&mut flags, "met_mira") {
            flag.value = true;
        }
        assert!(flags[0].value);
    }
}
