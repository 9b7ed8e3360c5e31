//! Query errors.

use super::ModelKind;

/// A query the engine cannot run.
///
/// A well-formed query with no matches is not an error; it returns an
/// empty result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("{kind} has no field named '{field}'")]
    FieldNotFound { kind: ModelKind, field: String },

    #[error("Unknown model kind: {0}")]
    UnknownModel(String),

    #[error("'{value}' is not a valid {expected} for field '{field}'")]
    InvalidValue {
        field: String,
        value: String,
        expected: &'static str,
    },
}

impl QueryError {
    pub fn field_not_found(kind: ModelKind, field: impl ToString) -> Self {
        Self::FieldNotFound {
            kind,
            field: field.to_string(),
        }
    }

    /// True when the query named a field or kind that does not exist.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::FieldNotFound { .. } | Self::UnknownModel(_))
    }
}
