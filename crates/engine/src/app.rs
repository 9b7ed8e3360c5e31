//! Application state and composition.

use std::sync::Arc;

use crate::entities::DataManager;
use crate::infrastructure::{
    config::AppConfig,
    json_store::{JsonDirectorySource, JsonProgressStore},
    ports::{DataSource, ProgressStore},
};
use crate::use_cases::ProgressUseCases;

/// Main application state.
///
/// Holds the dialogue data facade and the use cases that act on it.
pub struct App {
    pub data: DataManager,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub progress: ProgressUseCases,
}

impl App {
    pub fn new(source: Arc<dyn DataSource>, store: Arc<dyn ProgressStore>) -> Self {
        Self {
            data: DataManager::new(source),
            use_cases: UseCases {
                progress: ProgressUseCases::new(store),
            },
        }
    }

    /// Wire the JSON adapters at the configured paths.
    pub fn from_config(config: &AppConfig) -> Self {
        tracing::info!(
            data_dir = %config.data_dir.display(),
            save_path = %config.save_path.display(),
            "Using JSON storage"
        );
        Self::new(
            Arc::new(JsonDirectorySource::new(&config.data_dir)),
            Arc::new(JsonProgressStore::new(&config.save_path)),
        )
    }
}
