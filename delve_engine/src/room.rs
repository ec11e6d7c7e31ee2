//! Room definitions.
//!
//! Any location the player can stand in is a "Room", whether it's a closet
//! or a canyon. Rooms hold items and carry a directed exit map that effects
//! may rewrite while the game is running.

use std::collections::HashMap;

use crate::{Holder, Id, Item, idgen};

/// A location in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: Id,
    pub symbol: String,
    pub name: String,
    pub description: String,
    /// Prepended to the description the first time the room is described.
    pub first_enter_msg: String,
    pub visited: bool,
    /// Direction word -> destination room. Exits are one-way.
    pub exits: HashMap<String, Id>,
    pub contents: Holder,
}

impl Room {
    pub fn new(symbol: &str, name: &str) -> Self {
        Self {
            id: idgen::room_id(symbol),
            symbol: symbol.to_string(),
            name: name.to_string(),
            description: String::new(),
            first_enter_msg: String::new(),
            visited: false,
            exits: HashMap::new(),
            contents: Holder::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    #[must_use]
    pub fn with_first_enter_msg(mut self, msg: &str) -> Self {
        self.first_enter_msg = msg.to_string();
        self
    }

    /// Add (or overwrite) the exit leading `direction`.
    pub fn add_exit(&mut self, direction: &str, to: Id) {
        self.exits.insert(direction.to_string(), to);
    }

    /// Remove the exit leading `direction`, returning where it went.
    pub fn remove_exit(&mut self, direction: &str) -> Option<Id> {
        self.exits.remove(direction)
    }

    /// Destination of the exit leading `direction`, if there is one.
    pub fn exit(&self, direction: &str) -> Option<Id> {
        self.exits.get(direction).copied()
    }

    /// Full room text: description, first-visit message and visible contents.
    ///
    /// Marks the room visited; the first-enter message is only ever shown once.
    pub fn describe(&mut self, items: &HashMap<Id, Item>) -> String {
        let mut msg = if self.visited {
            self.description.clone()
        } else {
            self.visited = true;
            format!("{}{}", self.first_enter_msg, self.description)
        };

        let names = self.contents.visible_names(items);
        if !names.is_empty() {
            msg.push_str("\nYou can also see:\n");
            msg.push_str(&names.join("\n"));
        }
        msg
    }
}
