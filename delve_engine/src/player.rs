//! Player -- the single participant in a game.
use crate::{Holder, Id, Item};

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    /// Room the player is standing in. Set when the engine starts.
    pub location: Option<Id>,
    pub inventory: Holder,
}

impl Default for Player {
    fn default() -> Player {
        Self {
            name: "stranger".into(),
            location: None,
            inventory: Holder::default(),
        }
    }
}

impl Player {
    /// Text listing what the player is carrying.
    pub fn list_inventory(&self, items: &HashMap<Id, Item>) -> String {
        let names = self.inventory.visible_names(items);
        if names.is_empty() {
            "You are not holding anything.".to_string()
        } else {
            format!("You are carrying:\n{}", names.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inventory_message() {
        let player = Player::default();
        assert_eq!(player.list_inventory(&HashMap::new()), "You are not holding anything.");
    }

    #[test]
    fn inventory_lists_carried_items_in_order() {
        let ruby = Item::new("ruby", "a ruby");
        let lamp = Item::new("lamp", "a lamp");
        let mut player = Player::default();
        player.inventory.add(ruby.id);
        player.inventory.add(lamp.id);
        let items: HashMap<Id, Item> = [(ruby.id, ruby), (lamp.id, lamp)].into_iter().collect();
        assert_eq!(player.list_inventory(&items), "You are carrying:\na ruby\na lamp");
    }
}
