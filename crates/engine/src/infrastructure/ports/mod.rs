//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Authored content (JSON directory, in-memory)
//! - Player progress (save file)

mod error;
mod repos;

pub use error::{SourceError, StoreError};
pub use repos::{DataSource, ProgressStore};

#[cfg(test)]
pub use repos::{MockDataSource, MockProgressStore};
