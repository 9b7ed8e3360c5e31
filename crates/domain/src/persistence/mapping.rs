//! Entity ↔ persisted document mappings.

use super::documents::{
    ColumnPersistent, ContextPersistent, FlagPersistent, ItemPersistent, MessagePersistent,
    QuestPersistent, TalkLogPersistent, TalkablePersistent,
};
use super::{get_array_data, set_array_data, ApplyReport, Persistable};
use crate::entities::{Column, Context, Flag, Item, Message, Quest, TalkLog, Talkable, TalkableKind};

impl Persistable for Talkable {
    type Persistent = TalkablePersistent;

    const ENTITY: &'static str = "Talkable";

    fn persistence_key(&self) -> &str {
        self.unique_id.as_str()
    }

    fn to_persistent(&self) -> TalkablePersistent {
        let id = self.unique_id.clone();
        let contexts = get_array_data(&self.contexts);
        match self.kind {
            TalkableKind::Character { influence } => TalkablePersistent::Character {
                id,
                influence,
                contexts,
            },
            TalkableKind::Interactable => TalkablePersistent::Interactable { id, contexts },
            TalkableKind::Plain => TalkablePersistent::Talkable { id, contexts },
        }
    }

    fn apply_persistent(&mut self, doc: &TalkablePersistent) -> ApplyReport {
        let expected = self.kind.label();
        let contexts = match (&mut self.kind, doc) {
            (
                TalkableKind::Character { influence },
                TalkablePersistent::Character {
                    influence: saved,
                    contexts,
                    ..
                },
            ) => {
                *influence = *saved;
                contexts
            }
            (TalkableKind::Interactable, TalkablePersistent::Interactable { contexts, .. }) => {
                contexts
            }
            (TalkableKind::Plain, TalkablePersistent::Talkable { contexts, .. }) => contexts,
            (
                TalkableKind::Character { .. } | TalkableKind::Interactable | TalkableKind::Plain,
                _,
            ) => {
                tracing::warn!(
                    name = %self.name,
                    unique_id = %self.unique_id,
                    expected,
                    "Persisted talkable has a different kind, skipping"
                );
                return ApplyReport::skipped();
            }
        };

        let mut report = ApplyReport::applied();
        report += set_array_data(&mut self.contexts, contexts);
        report
    }
}

impl Persistable for Context {
    type Persistent = ContextPersistent;

    const ENTITY: &'static str = "Context";

    fn persistence_key(&self) -> &str {
        self.unique_id.as_str()
    }

    fn to_persistent(&self) -> ContextPersistent {
        ContextPersistent {
            id: self.unique_id.clone(),
            happened: self.happened,
            columns: get_array_data(&self.columns),
        }
    }

    fn apply_persistent(&mut self, doc: &ContextPersistent) -> ApplyReport {
        self.happened = doc.happened;
        let mut report = ApplyReport::applied();
        report += set_array_data(&mut self.columns, &doc.columns);
        report
    }
}

impl Persistable for Column {
    type Persistent = ColumnPersistent;

    const ENTITY: &'static str = "Column";

    fn persistence_key(&self) -> &str {
        self.unique_id.as_str()
    }

    fn to_persistent(&self) -> ColumnPersistent {
        ColumnPersistent {
            id: self.unique_id.clone(),
            messages: get_array_data(&self.messages),
        }
    }

    fn apply_persistent(&mut self, doc: &ColumnPersistent) -> ApplyReport {
        let mut report = ApplyReport::applied();
        report += set_array_data(&mut self.messages, &doc.messages);
        report
    }
}

impl Persistable for Message {
    type Persistent = MessagePersistent;

    const ENTITY: &'static str = "Message";

    fn persistence_key(&self) -> &str {
        self.unique_id.as_str()
    }

    fn to_persistent(&self) -> MessagePersistent {
        MessagePersistent {
            id: self.unique_id.clone(),
            already_spoken: self.already_spoken,
        }
    }

    fn apply_persistent(&mut self, doc: &MessagePersistent) -> ApplyReport {
        self.already_spoken = doc.already_spoken;
        ApplyReport::applied()
    }
}

impl Persistable for Item {
    type Persistent = ItemPersistent;

    const ENTITY: &'static str = "Item";

    fn persistence_key(&self) -> &str {
        self.unique_id.as_str()
    }

    fn to_persistent(&self) -> ItemPersistent {
        ItemPersistent {
            id: self.unique_id.clone(),
            have: self.have,
            discarded: self.discarded,
            equipped: self.equipped,
        }
    }

    fn apply_persistent(&mut self, doc: &ItemPersistent) -> ApplyReport {
        self.have = doc.have;
        self.discarded = doc.discarded;
        self.equipped = doc.equipped;
        ApplyReport::applied()
    }
}

impl Persistable for Quest {
    type Persistent = QuestPersistent;

    const ENTITY: &'static str = "Quest";

    fn persistence_key(&self) -> &str {
        self.unique_id.as_str()
    }

    fn to_persistent(&self) -> QuestPersistent {
        QuestPersistent {
            id: self.unique_id.clone(),
            current_state_id: self.current_state_id.clone(),
            initialized: self.initialized,
            finished: self.finished,
        }
    }

    fn apply_persistent(&mut self, doc: &QuestPersistent) -> ApplyReport {
        self.initialized = doc.initialized;
        self.finished = doc.finished;
        self.current_state_id = match &doc.current_state_id {
            Some(state_id) if self.states.iter().any(|s| &s.unique_id == state_id) => {
                Some(state_id.clone())
            }
            Some(state_id) => {
                tracing::warn!(
                    quest = %self.name,
                    state_id = %state_id,
                    "Persisted quest state no longer exists, clearing"
                );
                None
            }
            None => None,
        };
        ApplyReport::applied()
    }
}

impl Persistable for Flag {
    type Persistent = FlagPersistent;

    const ENTITY: &'static str = "Flag";

    fn persistence_key(&self) -> &str {
        &self.name
    }

    fn to_persistent(&self) -> FlagPersistent {
        FlagPersistent {
            name: self.name.clone(),
            value: self.value,
        }
    }

    fn apply_persistent(&mut self, doc: &FlagPersistent) -> ApplyReport {
        self.value = doc.value;
        ApplyReport::applied()
    }
}

impl Persistable for TalkLog {
    type Persistent = TalkLogPersistent;

    const ENTITY: &'static str = "TalkLog";

    fn persistence_key(&self) -> &str {
        &self.talkable_name
    }

    fn to_persistent(&self) -> TalkLogPersistent {
        TalkLogPersistent {
            talkable_name: self.talkable_name.clone(),
            message_ids: self.message_ids.clone(),
        }
    }

    fn apply_persistent(&mut self, doc: &TalkLogPersistent) -> ApplyReport {
        self.message_ids = doc.message_ids.clone();
        ApplyReport::applied()
    }
}

impl From<&TalkLogPersistent> for TalkLog {
    fn from(doc: &TalkLogPersistent) -> Self {
        Self {
            talkable_name: doc.talkable_name.clone(),
            message_ids: doc.message_ids.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::UniqueId;

    const LANGS: [&str; 1] = ["English"];

    /// Character with one context holding one column of `messages` messages.
    fn character(messages: usize) -> Talkable {
        let mut column = Column::new(0, "Mira");
        for _ in 0..messages {
            column.add_message(Message::new(0, "Mira", &LANGS));
        }
        let mut context = Context::new(0, &LANGS);
        context.add_column(column);
        let mut mira = Talkable::character("Mira", &LANGS);
        mira.add_context(context);
        mira
    }

    fn messages(t: &mut Talkable) -> &mut Vec<Message> {
        &mut t.contexts[0].columns[0].messages
    }

    #[test]
    fn character_projection_carries_only_progress() {
        let mut mira = character(2);
        mira.set_influence(80);
        messages(&mut mira)[1].already_spoken = true;

        let doc = mira.to_persistent();
        let TalkablePersistent::Character {
            id,
            influence,
            contexts,
        } = &doc
        else {
            panic!("expected a character document");
        };
        assert_eq!(id, &mira.unique_id);
        assert_eq!(*influence, 80);
        assert_eq!(contexts[0].columns[0].messages.len(), 2);
        assert!(contexts[0].columns[0].messages[1].already_spoken);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["kind"], "character");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn applying_own_projection_changes_nothing() {
        let mut mira = character(3);
        mira.set_influence(12);
        mira.contexts[0].happened = true;
        messages(&mut mira)[0].already_spoken = true;
        let before = mira.clone();

        let doc = mira.to_persistent();
        let report = mira.apply_persistent(&doc);

        assert_eq!(mira, before);
        // talkable + context + column + 3 messages
        assert_eq!(report, ApplyReport { applied: 6, skipped: 0 });
    }

    #[test]
    fn children_are_matched_by_id_not_position() {
        let mut saved = character(2);
        messages(&mut saved)[0].already_spoken = true;
        let doc = saved.to_persistent();

        // A later revision reorders the messages.
        let mut live = saved.clone();
        messages(&mut live)[0].already_spoken = false;
        messages(&mut live).reverse();

        live.apply_persistent(&doc);
        let spoken_id = saved.contexts[0].columns[0].messages[0].unique_id.clone();
        let live_messages = &live.contexts[0].columns[0].messages;
        assert!(live_messages[1].already_spoken);
        assert_eq!(live_messages[1].unique_id, spoken_id);
        assert!(!live_messages[0].already_spoken);
    }

    #[test]
    fn removed_child_is_skipped_and_new_child_keeps_defaults() {
        let mut saved = character(2);
        for message in messages(&mut saved).iter_mut() {
            message.already_spoken = true;
        }
        let doc = saved.to_persistent();

        let mut live = saved.clone();
        for message in messages(&mut live).iter_mut() {
            message.already_spoken = false;
        }
        let removed = messages(&mut live).remove(0);
        live.contexts[0].columns[0].add_message(Message::new(0, "Mira", &LANGS));

        let report = live.apply_persistent(&doc);

        assert_eq!(report.skipped, 1);
        let live_messages = &live.contexts[0].columns[0].messages;
        assert!(live_messages[0].already_spoken);
        assert!(!live_messages[1].already_spoken);
        assert!(live_messages.iter().all(|m| m.unique_id != removed.unique_id));
    }

    #[test]
    fn kind_mismatch_is_skipped() {
        let mut door = Talkable::interactable("Door", &LANGS);
        let doc = TalkablePersistent::Character {
            id: door.unique_id.clone(),
            influence: 99,
            contexts: Vec::new(),
        };
        let before = door.clone();

        assert_eq!(door.apply_persistent(&doc), ApplyReport::skipped());
        assert_eq!(door, before);
    }

    #[test]
    fn plain_talkable_uses_talkable_document() {
        let plain = Talkable::plain("Narrator", &LANGS);
        let doc = plain.to_persistent();
        assert!(matches!(doc, TalkablePersistent::Talkable { .. }));
        assert_eq!(doc.id(), &plain.unique_id);
        assert!(doc.contexts().is_empty());
    }

    #[test]
    fn batch_forms_are_ordered_and_keyed() {
        let mut live = vec![character(1), character(1)];
        live[1].set_influence(5);
        let docs = get_array_data(&live);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].id(), &live[1].unique_id);

        live[1].set_influence(50);
        let mut stale = docs.clone();
        stale.push(TalkablePersistent::Character {
            id: UniqueId::generate(),
            influence: 1,
            contexts: Vec::new(),
        });

        let report = set_array_data(&mut live, &stale);
        assert_eq!(live[1].influence(), Some(5));
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn quest_state_missing_from_content_is_cleared() {
        let mut quest = Quest::new("Lost Ring").with_state("Ask around");
        let doc = QuestPersistent {
            id: quest.unique_id.clone(),
            current_state_id: Some(UniqueId::generate()),
            initialized: true,
            finished: false,
        };
        quest.apply_persistent(&doc);
        assert!(quest.initialized);
        assert!(quest.current_state_id.is_none());
    }

    #[test]
    fn flags_are_keyed_by_name() {
        let mut flags = vec![Flag::unset("met_mira"), Flag::unset("door_open")];
        let docs = vec![FlagPersistent {
            name: "door_open".to_string(),
            value: true,
        }];
        let report = set_array_data(&mut flags, &docs);
        assert_eq!(report, ApplyReport::applied());
        assert!(!flags[0].value);
        assert!(flags[1].value);
    }

    #[test]
    fn empty_keys_never_match() {
        let mut item = Item::new(0, &LANGS);
        item.unique_id.clear();
        let doc = ItemPersistent {
            id: UniqueId::empty(),
            have: true,
            discarded: false,
            equipped: false,
        };
        let mut items = vec![item];
        let report = set_array_data(&mut items, &[doc]);
        assert_eq!(report.skipped, 1);
        assert!(!items[0].have);
    }

    #[test]
    fn whitespace_id_survives_healing_and_still_matches() {
        let mut live = vec![character(1)];
        live[0].unique_id = UniqueId::from(" ");
        let mut saved = live[0].clone();
        saved.set_influence(70);
        let docs = get_array_data(std::slice::from_ref(&saved));

        assert_eq!(live[0].ensure_tree_ids(), 0);
        let report = set_array_data(&mut live, &docs);

        assert!(report.is_clean());
        assert_eq!(live[0].unique_id, " ");
        assert_eq!(live[0].influence(), Some(70));
    }
}
