//! Ordered item containers.
//!
//! A [`Holder`] stores item ids, never the items themselves; the world owns
//! every `Item`. Insertion order is significant: it is the display order and
//! it breaks ties when two items share an alias.

use std::collections::HashMap;

use crate::{Id, Item};

/// An insertion-ordered collection of item ids with no capacity limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Holder {
    items: Vec<Id>,
}

impl Holder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Duplicates are not filtered.
    pub fn add(&mut self, item_id: Id) {
        self.items.push(item_id);
    }

    /// Remove the first occurrence of `item_id`.
    ///
    /// Returns `false` and leaves the holder untouched if the item is absent.
    pub fn remove(&mut self, item_id: Id) -> bool {
        match self.items.iter().position(|id| *id == item_id) {
            Some(index) => {
                self.items.remove(index);
                true
            },
            None => false,
        }
    }

    pub fn contains(&self, item_id: Id) -> bool {
        self.items.contains(&item_id)
    }

    /// True if every id in `required` is held. An empty requirement is always met.
    pub fn contains_all(&self, required: &[Id]) -> bool {
        required.iter().all(|id| self.contains(*id))
    }

    /// Position of the first held item answering to `alias`.
    pub fn position_by_alias(&self, items: &HashMap<Id, Item>, alias: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|id| items.get(id).is_some_and(|item| item.answers_to(alias)))
    }

    /// First held item answering to `alias`, in insertion order.
    pub fn find_by_alias<'a>(&self, items: &'a HashMap<Id, Item>, alias: &str) -> Option<&'a Item> {
        self.position_by_alias(items, alias)
            .and_then(|index| items.get(&self.items[index]))
    }

    /// Names of held items that are not hidden, in insertion order.
    pub fn visible_names<'a>(&self, items: &'a HashMap<Id, Item>) -> Vec<&'a str> {
        self.items
            .iter()
            .filter_map(|id| items.get(id))
            .filter(|item| !item.hidden)
            .map(|item| item.name.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
