//! Aggregate roots - domain objects that own their related data
//!
//! The dialogue dataset has a single root. It owns every entity through plain
//! Rust ownership, so an entity can never be shared between two parents.

pub mod dialogue_data;

pub use dialogue_data::{DataSummary, DialogueData};
