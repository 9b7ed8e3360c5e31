//! Item entity - inventory objects referenced by dialogue

use serde::{Deserialize, Serialize};

use super::column::next_label;
use crate::ids::{impl_identified, UniqueId};
use crate::value_objects::LocalizedText;

/// An inventory object.
///
/// `id` is the numeric id authors use in dialogue conditions; `unique_id`
/// is the stable persistence key. `have`, `discarded` and `equipped` change
/// during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    #[serde(default)]
    pub unique_id: UniqueId,
    #[serde(default)]
    pub name: Vec<LocalizedText>,
    #[serde(default)]
    pub description: Vec<LocalizedText>,
    /// Path of the item image resource
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub have: bool,
    #[serde(default)]
    pub discarded: bool,
    #[serde(default)]
    pub equipped: bool,
}

impl_identified!(Item);

impl Item {
    pub fn new(id: u32, languages: &[&str]) -> Self {
        Self {
            id,
            unique_id: UniqueId::generate(),
            name: LocalizedText::blank_for(languages),
            description: LocalizedText::blank_for(languages),
            image: String::new(),
            have: false,
            discarded: false,
            equipped: false,
        }
    }

    pub fn with_name(mut self, language: &str, name: impl Into<String>) -> Self {
        LocalizedText::set(&mut self.name, language, name);
        self
    }

    pub fn name_in(&self, language: &str) -> Option<&str> {
        LocalizedText::text(&self.name, language)
    }

    /// Mark the item as owned.
    pub fn acquire(&mut self) {
        self.have = true;
        self.discarded = false;
    }

    /// Discard an owned item; it is unequipped as well.
    pub fn discard(&mut self) {
        if self.have {
            self.have = false;
            self.discarded = true;
            self.equipped = false;
        }
    }

    /// Find an item by its name in `language`.
    pub fn find_by_name<'a>(items: &'a [Item], name: &str, language: &str) -> Option<&'a Item> {
        items
            .iter()
            .find(|item| LocalizedText::matches(&item.name, name, language))
    }

    /// Find an item by numeric id.
    pub fn find_by_id(items: &[Item], id: u32) -> Option<&Item> {
        items.iter().find(|item| item.id == id)
    }

    pub fn find_by_id_mut(items: &mut [Item], id: u32) -> Option<&mut Item> {
        items.iter_mut().find(|item| item.id == id)
    }

    /// Next free numeric id in `items`.
    pub fn next_id(items: &[Item]) -> u32 {
        next_label(items.iter().map(|i| i.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Item {
        Item::new(3, &["English", "Português"]).with_name("English", "Sword")
    }

    #[test]
    fn find_by_name_respects_language() {
        let items = vec![sword()];
        assert!(Item::find_by_name(&items, "Sword", "English").is_some());
        // The Portuguese entry exists but is blank.
        assert!(Item::find_by_name(&items, "Sword", "Português").is_none());
    }

    #[test]
    fn find_by_numeric_id() {
        let items = vec![Item::new(1, &["English"]), sword()];
        assert_eq!(Item::find_by_id(&items, 3).and_then(|i| i.name_in("English")), Some("Sword"));
        assert!(Item::find_by_id(&items, 9).is_none());
        assert_eq!(Item::next_id(&items), 4);
        assert_eq!(Item::next_id(&[]), 0);
    }

    #[test]
    fn next_id_reuses_a_free_id_after_the_maximum() {
        let items = vec![Item::new(0, &["English"]), Item::new(u32::MAX, &["English"])];
        assert_eq!(Item::next_id(&items), 1);
    }

    #[test]
    fn discard_clears_ownership() {
        let mut item = sword();
        item.acquire();
        item.equipped = true;
        item.discard();
        assert!(!item.have);
        assert!(item.discarded);
        assert!(!item.equipped);
    }

    #[test]
    fn discard_without_owning_is_noop() {
        let mut item = sword();
        item.discard();
        assert!(!item.discarded);
    }
}
