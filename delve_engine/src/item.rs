//! Item types.
//!
//! Items are anything the player can refer to: portable things, fixed
//! scenery, and characters alike. What an item *does* when used is carried
//! in its list of [`Behavior`]s, which effects may rewrite during play.

use crate::{Behavior, Id, idgen};

/// A named thing in the world.
///
/// `symbol` is the scenario-assigned key the `id` is derived from. Two items
/// are the same item only if their ids match; identical field values do not
/// make two items interchangeable.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Stable id, derived from `symbol`.
    pub id: Id,
    /// The symbol used to refer to this item in scenario data.
    pub symbol: String,
    /// The display name shown in room and inventory listings.
    pub name: String,
    /// Long-form text shown when the item is examined.
    pub description: String,
    /// Words the player may use to refer to this item. Matched exactly.
    pub aliases: Vec<String>,
    /// Fixed items cannot be transferred between holders.
    pub portable: bool,
    /// Hidden items are left out of "you can also see" and inventory listings.
    pub hidden: bool,
    /// Behaviors, tried in attachment order.
    pub behaviors: Vec<Behavior>,
}

impl Item {
    /// A portable, visible item with no aliases or behaviors.
    pub fn new(symbol: &str, name: &str) -> Self {
        Self {
            id: idgen::item_id(symbol),
            symbol: symbol.to_string(),
            name: name.to_string(),
            description: String::new(),
            aliases: Vec::new(),
            portable: true,
            hidden: false,
            behaviors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        aliases.iter().for_each(|alias| self.add_alias(alias));
        self
    }

    /// Mark the item as fixed in place.
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.portable = false;
        self
    }

    /// Mark the item as background scenery.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    pub fn add_alias(&mut self, alias: &str) {
        self.aliases.push(alias.to_string());
    }

    pub fn add_behavior(&mut self, behavior: Behavior) {
        self.behaviors.push(behavior);
    }

    /// Drop every behavior; the item no longer reacts to any verb.
    pub fn clear_behaviors(&mut self) {
        self.behaviors.clear();
    }

    /// Make `behavior` the only live behavior on this item.
    pub fn replace_behaviors(&mut self, behavior: Behavior) {
        self.behaviors = vec![behavior];
    }

    pub fn answers_to(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }
}
