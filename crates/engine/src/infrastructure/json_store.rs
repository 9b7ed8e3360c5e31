//! JSON file adapters for the dataset and the save file.
//!
//! Dataset layout under the data directory:
//!
//! ```text
//! options.json          required
//! inventory.json        items
//! quests.json
//! globalFlags.json
//! characters/*.json     one character per file
//! interactables/*.json  one interactable per file
//! ```
//!
//! Talkable files load in file-name order. [`JsonDirectorySource::write_all`]
//! prefixes each file name with its index so a written tree loads back in the
//! same order.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use talkbook_domain::{DialogueData, Flag, Item, Options, Quest, SaveGame, Talkable, SAVE_VERSION};

use super::ports::{DataSource, ProgressStore, SourceError, StoreError};

const OPTIONS_FILE: &str = "options.json";
const INVENTORY_FILE: &str = "inventory.json";
const QUESTS_FILE: &str = "quests.json";
const FLAGS_FILE: &str = "globalFlags.json";
const CHARACTERS_DIR: &str = "characters";
const INTERACTABLES_DIR: &str = "interactables";

// =============================================================================
// Dataset directory
// =============================================================================

/// Authored dataset stored as a directory of JSON files.
pub struct JsonDirectorySource {
    root: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_talkables(
        &self,
        dir_name: &str,
        accepts: fn(&Talkable) -> bool,
    ) -> Result<Vec<Talkable>, SourceError> {
        let mut talkables = Vec::new();
        for path in list_json(&self.root.join(dir_name))? {
            let talkable: Talkable = read_json(&path)?;
            if !accepts(&talkable) {
                return Err(SourceError::parse(
                    &path,
                    format!("{} does not belong in {dir_name}/", talkable.kind.label()),
                ));
            }
            talkables.push(talkable);
        }
        Ok(talkables)
    }

    fn write_talkables(&self, dir_name: &str, talkables: &[Talkable]) -> Result<(), SourceError> {
        let dir = self.root.join(dir_name);
        std::fs::create_dir_all(&dir).map_err(|e| SourceError::io(&dir, e))?;
        for stale in list_json(&dir)? {
            std::fs::remove_file(&stale).map_err(|e| SourceError::io(&stale, e))?;
        }
        for (index, talkable) in talkables.iter().enumerate() {
            let path = dir.join(format!("{index:04}-{}.json", file_stem(&talkable.name)));
            write_json(&path, talkable)?;
        }
        Ok(())
    }
}

impl DataSource for JsonDirectorySource {
    fn load_all(&self) -> Result<DialogueData, SourceError> {
        let options_path = self.root.join(OPTIONS_FILE);
        if !options_path.is_file() {
            return Err(SourceError::MissingRequired {
                file: OPTIONS_FILE,
                dir: self.root.clone(),
            });
        }
        let options: Options = read_json(&options_path)?;
        if options.languages.is_empty() {
            return Err(SourceError::parse(
                &options_path,
                "at least one language is required",
            ));
        }

        let data = DialogueData {
            options,
            characters: self.load_talkables(CHARACTERS_DIR, Talkable::is_character)?,
            interactables: self.load_talkables(INTERACTABLES_DIR, Talkable::is_interactable)?,
            items: read_optional::<Vec<Item>>(&self.root.join(INVENTORY_FILE))?,
            quests: read_optional::<Vec<Quest>>(&self.root.join(QUESTS_FILE))?,
            flags: read_optional::<Vec<Flag>>(&self.root.join(FLAGS_FILE))?,
            talk_logs: Vec::new(),
        };

        let summary = data.summary();
        tracing::info!(
            root = %self.root.display(),
            characters = summary.characters,
            interactables = summary.interactables,
            messages = summary.messages,
            items = summary.items,
            quests = summary.quests,
            flags = summary.flags,
            "Loaded dialogue data"
        );
        Ok(data)
    }

    fn write_all(&self, data: &DialogueData) -> Result<(), SourceError> {
        std::fs::create_dir_all(&self.root).map_err(|e| SourceError::io(&self.root, e))?;
        write_json(&self.root.join(OPTIONS_FILE), &data.options)?;
        write_json(&self.root.join(INVENTORY_FILE), &data.items)?;
        write_json(&self.root.join(QUESTS_FILE), &data.quests)?;
        write_json(&self.root.join(FLAGS_FILE), &data.flags)?;
        self.write_talkables(CHARACTERS_DIR, &data.characters)?;
        self.write_talkables(INTERACTABLES_DIR, &data.interactables)?;

        tracing::info!(root = %self.root.display(), "Wrote dialogue data");
        Ok(())
    }
}

// =============================================================================
// Save file
// =============================================================================

/// Player progress stored as a single JSON document.
pub struct JsonProgressStore {
    path: PathBuf,
}

impl JsonProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonProgressStore {
    fn read(&self) -> Result<Option<SaveGame>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let save: SaveGame = serde_json::from_str(&content).map_err(StoreError::serialization)?;
        if !save.is_current() {
            return Err(StoreError::VersionMismatch {
                expected: SAVE_VERSION,
                found: save.version,
            });
        }
        Ok(Some(save))
    }

    fn write(&self, save: &SaveGame) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let content = serde_json::to_string_pretty(save).map_err(StoreError::serialization)?;

        // Write next to the target then rename so a crash never leaves half a save.
        let staging = self.path.with_extension("json.tmp");
        std::fs::write(&staging, content).map_err(|e| StoreError::io(&staging, e))?;
        std::fs::rename(&staging, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        tracing::info!(path = %self.path.display(), "Saved progress");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Cleared saved progress");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

// =============================================================================
// File helpers
// =============================================================================

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| SourceError::parse(path, e))
}

/// Read a file that may be absent; absence yields the default value.
fn read_optional<T: DeserializeOwned + Default>(path: &Path) -> Result<T, SourceError> {
    if path.is_file() {
        read_json(path)
    } else {
        tracing::debug!(path = %path.display(), "Optional data file absent");
        Ok(T::default())
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SourceError> {
    let content = serde_json::to_string_pretty(value).map_err(|e| SourceError::parse(path, e))?;
    std::fs::write(path, content).map_err(|e| SourceError::io(path, e))
}

/// `*.json` files directly under `dir`, sorted by file name. A missing
/// directory has no files.
fn list_json(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(SourceError::io(dir, e)),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| SourceError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// A file-system friendly version of a talkable name.
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "talkable".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talkbook_domain::{Column, Context, Message};
    use tempfile::TempDir;

    fn sample_data() -> DialogueData {
        let mut data = DialogueData::new(Options::new(["English", "Português"]).unwrap());
        let langs = ["English", "Português"];

        let mut column = Column::new(0, "Mira");
        column.add_message(Message::new(0, "Mira", &langs).with_content("English", "Hello"));
        let mut context = Context::new(0, &langs).with_name("English", "Intro");
        context.add_column(column);
        data.add_character("Mira").add_context(context);
        data.add_character("Ze Ana");
        data.add_interactable("Old Door");
        data.add_item();
        data.quests.push(Quest::new("Lost Ring").with_state("Ask around"));
        data.flags.push(Flag::unset("met_mira"));
        data
    }

    #[test]
    fn written_tree_loads_back_equal() {
        let dir = TempDir::new().unwrap();
        let source = JsonDirectorySource::new(dir.path());
        let data = sample_data();

        source.write_all(&data).unwrap();
        let loaded = source.load_all().unwrap();

        assert_eq!(loaded, data);
        assert!(dir.path().join("characters/0000-Mira.json").is_file());
        assert!(dir.path().join("characters/0001-Ze_Ana.json").is_file());
    }

    #[test]
    fn rewriting_removes_stale_talkable_files() {
        let dir = TempDir::new().unwrap();
        let source = JsonDirectorySource::new(dir.path());
        let mut data = sample_data();
        source.write_all(&data).unwrap();

        data.characters.truncate(1);
        source.write_all(&data).unwrap();

        assert_eq!(source.load_all().unwrap().characters.len(), 1);
    }

    #[test]
    fn missing_options_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = JsonDirectorySource::new(dir.path()).load_all();

        assert!(matches!(result, Err(ref e) if e.is_missing()));
    }

    #[test]
    fn optional_files_default_to_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(OPTIONS_FILE),
            r#"{ "languages": [{ "name": "English" }] }"#,
        )
        .unwrap();

        let data = JsonDirectorySource::new(dir.path()).load_all().unwrap();

        assert_eq!(data.languages(), vec!["English"]);
        assert!(data.characters.is_empty());
        assert!(data.items.is_empty());
        assert!(data.flags.is_empty());
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(OPTIONS_FILE), "{ not json").unwrap();

        let err = JsonDirectorySource::new(dir.path()).load_all().unwrap_err();

        match err {
            SourceError::Parse { file, .. } => assert!(file.ends_with(OPTIONS_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn interactable_in_characters_dir_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut data = sample_data();
        let door = data.interactables.remove(0);
        let source = JsonDirectorySource::new(dir.path());
        source.write_all(&data).unwrap();
        write_json(&dir.path().join("characters/9999-Door.json"), &door).unwrap();

        assert!(matches!(source.load_all(), Err(SourceError::Parse { .. })));
    }

    #[test]
    fn save_round_trips_and_clears() {
        let dir = TempDir::new().unwrap();
        let store = JsonProgressStore::new(dir.path().join("saves/slot1.json"));
        assert!(store.read().unwrap().is_none());

        let mut data = sample_data();
        data.characters[0].set_influence(75);
        let save = SaveGame::capture(&data);
        store.write(&save).unwrap();

        assert_eq!(store.read().unwrap(), Some(save));

        store.clear().unwrap();
        assert!(store.read().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn save_with_other_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        std::fs::write(&path, r#"{ "version": 99 }"#).unwrap();

        let result = JsonProgressStore::new(&path).read();

        assert!(matches!(
            result,
            Err(StoreError::VersionMismatch {
                expected: SAVE_VERSION,
                found: 99
            })
        ));
    }
}
