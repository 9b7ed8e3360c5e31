//! Saves written against one revision of the content load onto the next.

use std::sync::Arc;

use talkbook_domain::{Column, Context, DialogueData, Message, Options, Quest};
use talkbook_engine::infrastructure::json_store::{JsonDirectorySource, JsonProgressStore};
use talkbook_engine::infrastructure::ports::DataSource;
use talkbook_engine::use_cases::query::{FieldValue, ModelKind};
use talkbook_engine::App;
use tempfile::TempDir;

const LANGS: [&str; 1] = ["English"];

fn first_revision() -> DialogueData {
    let mut data = DialogueData::new(Options::default());

    let mut column = Column::new(0, "Mira");
    for text in ["Hello", "Have you seen my ring?", "Bye"] {
        column.add_message(Message::new(0, "Mira", &LANGS).with_content("English", text));
    }
    let mut intro = Context::new(0, &LANGS).with_name("English", "Intro");
    intro.add_column(column);
    let mira = data.add_character("Mira");
    mira.add_context(intro);
    mira.add_context(Context::new(0, &LANGS).with_name("English", "Later"));

    data.add_interactable("Door");
    data.quests
        .push(Quest::new("Lost Ring").with_state("Ask around").with_state("Return it"));
    data
}

fn app(content: &TempDir, save: &TempDir) -> App {
    App::new(
        Arc::new(JsonDirectorySource::new(content.path())),
        Arc::new(JsonProgressStore::new(save.path().join("save.json"))),
    )
}

#[test]
fn progress_survives_a_content_revision() {
    let content = TempDir::new().unwrap();
    let saves = TempDir::new().unwrap();
    let source = JsonDirectorySource::new(content.path());
    let original = first_revision();
    source.write_all(&original).unwrap();

    // Play the first revision and save.
    let mut session = app(&content, &saves);
    let messages = &original.characters[0].contexts[0].columns[0].messages;
    let (hello, ring, bye) = (
        messages[0].unique_id.clone(),
        messages[1].unique_id.clone(),
        messages[2].unique_id.clone(),
    );
    for id in [&hello, &ring, &bye] {
        assert!(session.data.mark_message_shown(id.as_str()).unwrap());
    }
    {
        let data = session.data.data_mut().unwrap();
        data.characters[0].set_influence(80);
        data.quests[0].initialize();
    }
    session.use_cases.progress.save.execute(&session.data).unwrap();

    // Next revision: "Bye" is cut, a new line is added, contexts swap places.
    let mut revised = original.clone();
    let mira = &mut revised.characters[0];
    mira.contexts[0].columns[0].remove_message(bye.as_str());
    mira.contexts[0].columns[0]
        .add_message(Message::new(0, "Mira", &LANGS).with_content("English", "Good luck"));
    mira.contexts.swap(0, 1);
    source.write_all(&revised).unwrap();

    let mut resumed = app(&content, &saves);
    let report = resumed
        .use_cases
        .progress
        .load
        .execute(&mut resumed.data)
        .unwrap()
        .unwrap();

    assert_eq!(report.skipped, 1);
    let data = resumed.data.data().unwrap();
    assert_eq!(data.characters[0].influence(), Some(80));
    assert!(data.find_message(hello.as_str()).unwrap().already_spoken);
    assert!(data.find_message(ring.as_str()).unwrap().already_spoken);
    assert!(data.find_message(bye.as_str()).is_none());

    let intro = &data.characters[0].contexts[1];
    assert!(!intro.columns[0].messages[2].already_spoken);
    assert_eq!(intro.columns[0].messages[2].text("English"), Some("Good luck"));

    assert_eq!(
        data.quests[0].current_state().map(|s| s.short_description.as_str()),
        Some("Ask around")
    );

    let spoken = resumed
        .data
        .find(ModelKind::Message, "already_spoken", &FieldValue::Boolean(true))
        .unwrap();
    assert_eq!(spoken.len(), 2);
}

#[test]
fn new_game_discards_the_save() {
    let content = TempDir::new().unwrap();
    let saves = TempDir::new().unwrap();
    JsonDirectorySource::new(content.path())
        .write_all(&first_revision())
        .unwrap();

    let mut session = app(&content, &saves);
    session.data.data_mut().unwrap().characters[0].set_influence(5);
    session.use_cases.progress.save.execute(&session.data).unwrap();
    assert!(saves.path().join("save.json").is_file());

    session
        .use_cases
        .progress
        .new_game
        .execute(&mut session.data)
        .unwrap();

    assert!(!saves.path().join("save.json").exists());
    assert_eq!(
        session.data.get_character("Mira").unwrap().unwrap().influence(),
        Some(talkbook_domain::DEFAULT_INFLUENCE)
    );
    let resumed = session
        .use_cases
        .progress
        .load
        .execute(&mut session.data)
        .unwrap();
    assert!(resumed.is_none());
}
