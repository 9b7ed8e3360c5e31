//! Progress operation errors.

use crate::entities::DataError;
use crate::infrastructure::ports::StoreError;

/// Errors that can occur while saving or loading progress.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("Save store error: {0}")]
    Store(#[from] StoreError),
    #[error("Dialogue data error: {0}")]
    Data(#[from] DataError),
}
