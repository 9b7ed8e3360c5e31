//! Talkbook Engine library.
//!
//! Loads, queries and saves progress for a dialogue dataset.
//!
//! ## Structure
//!
//! - `entities/` - The dialogue data facade wrapping the content source
//! - `use_cases/` - Field queries and save/load orchestration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use entities::{DataError, DataManager};
