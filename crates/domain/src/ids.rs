use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Stable identifier shared by an authored entity and its persisted projection.
///
/// Ids are stored as text so that hand-edited documents survive a round trip.
/// An empty id means "not yet assigned"; see [`Identified::ensure_id`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueId(String);

impl UniqueId {
    /// Generate a fresh random (UUID v4) id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The unassigned id.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Clear the id so the next [`Identified::ensure_id`] assigns a new one.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Interpret the id as a UUID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidId` when the id is empty or not UUID text.
    pub fn parse_uuid(&self) -> Result<Uuid, DomainError> {
        if self.is_empty() {
            return Err(DomainError::invalid_id("unique id is empty"));
        }
        Uuid::parse_str(&self.0)
            .map_err(|e| DomainError::invalid_id(format!("'{}': {}", self.0, e)))
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UniqueId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UniqueId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UniqueId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<UniqueId> for String {
    fn from(value: UniqueId) -> Self {
        value.0
    }
}

impl PartialEq<str> for UniqueId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for UniqueId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An entity carrying a [`UniqueId`].
pub trait Identified {
    fn unique_id(&self) -> &UniqueId;

    fn unique_id_mut(&mut self) -> &mut UniqueId;

    /// Assign a fresh id if the current one is empty.
    ///
    /// Returns `true` when an id was assigned. An existing id is never
    /// overwritten.
    fn ensure_id(&mut self) -> bool {
        let id = self.unique_id_mut();
        if id.is_empty() {
            *id = UniqueId::generate();
            tracing::debug!(unique_id = %id, "Assigned missing unique id");
            true
        } else {
            false
        }
    }
}

/// Implements [`Identified`] for a struct with a `unique_id: UniqueId` field.
macro_rules! impl_identified {
    ($($name:ty),+ $(,)?) => {
        $(
            impl $crate::ids::Identified for $name {
                fn unique_id(&self) -> &$crate::ids::UniqueId {
                    &self.unique_id
                }

                fn unique_id_mut(&mut self) -> &mut $crate::ids::UniqueId {
                    &mut self.unique_id
                }
            }
        )+
    };
}

pub(crate) use impl_identified;
