//! Progress use cases.
//!
//! Moves player progress between the live dataset and the save store.

mod error;
mod load_progress;
mod new_game;
mod save_progress;

use std::sync::Arc;

use crate::infrastructure::ports::ProgressStore;

pub use error::ProgressError;
pub use load_progress::LoadProgress;
pub use new_game::NewGame;
pub use save_progress::SaveProgress;

/// Container for progress use cases.
pub struct ProgressUseCases {
    pub save: SaveProgress,
    pub load: LoadProgress,
    pub new_game: NewGame,
}

impl ProgressUseCases {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self {
            save: SaveProgress::new(store.clone()),
            load: LoadProgress::new(store.clone()),
            new_game: NewGame::new(store),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use talkbook_domain::{Column, Context, DialogueData, Message, Options};

    use crate::entities::DataManager;
    use crate::infrastructure::ports::MockDataSource;

    const LANGS: [&str; 1] = ["English"];

    pub(crate) fn mira_data() -> DialogueData {
        let mut data = DialogueData::new(Options::default());
        let mut column = Column::new(0, "Mira");
        column.add_message(Message::new(0, "Mira", &LANGS).with_content("English", "Hello"));
        let mut context = Context::new(0, &LANGS);
        context.add_column(column);
        data.add_character("Mira").add_context(context);
        data
    }

    /// A manager whose source serves `mira_data` exactly `loads` times.
    pub(crate) fn manager(loads: usize) -> DataManager {
        manager_serving(mira_data(), loads)
    }

    pub(crate) fn manager_serving(data: DialogueData, loads: usize) -> DataManager {
        let mut source = MockDataSource::new();
        source
            .expect_load_all()
            .times(loads)
            .returning(move || Ok(data.clone()));
        DataManager::new(Arc::new(source))
    }

    pub(crate) fn first_message_id(manager: &DataManager) -> String {
        manager.data().unwrap().characters[0].contexts[0].columns[0].messages[0]
            .unique_id
            .to_string()
    }
}
