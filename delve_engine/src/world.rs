//! Data structures representing the game world.
//!
//! [`World`] owns every room and item plus the player. Scenario code builds a
//! `World` through the setup methods here and hands it to the
//! [`Engine`](crate::Engine); from then on only effects mutate it.
//!
//! Behaviors and effects never hold references into the world. They name
//! what they touch with ids and the [`HolderRef`] / [`RoomRef`] handles,
//! which are resolved against the world each time an effect runs.

use std::collections::HashMap;
use std::fmt::Display;

use log::info;
use variantly::Variantly;

use crate::error::WorldError;
use crate::{Holder, Id, Item, Player, Room};

/// Names a holder of items without borrowing it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Variantly)]
pub enum HolderRef {
    /// The player's inventory.
    Player,
    /// A specific room's contents.
    Room(Id),
    /// Whichever room the player is in when the handle is resolved.
    CurrentRoom,
    /// The player's inventory, then the current room. Membership checks look
    /// in both; removal takes from the first that holds the item; adding puts
    /// the item in the player's inventory.
    Reachable,
}

impl Display for HolderRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HolderRef::Player => write!(f, "player"),
            HolderRef::Room(id) => write!(f, "room {id}"),
            HolderRef::CurrentRoom => write!(f, "current room"),
            HolderRef::Reachable => write!(f, "reachable"),
        }
    }
}

/// Names a room without borrowing it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoomRef {
    Current,
    Room(Id),
}

/// Complete state of a running game.
#[derive(Debug, Clone)]
pub struct World {
    pub name: String,
    /// Text the presentation layer shows before the first room.
    pub opening: String,
    pub rooms: HashMap<Id, Room>,
    /// Room ids in registration order; the start index points into this.
    pub room_order: Vec<Id>,
    pub items: HashMap<Id, Item>,
    pub player: Player,
    /// Number of commands resolved so far.
    pub turn_count: usize,
    /// False once the game has ended.
    pub active: bool,
    pub game_over_message: String,
}

impl World {
    /// Create a new empty world.
    pub fn new(name: &str) -> World {
        info!("new, empty world \"{name}\" created");
        Self {
            name: name.to_string(),
            opening: String::new(),
            rooms: HashMap::new(),
            room_order: Vec::new(),
            items: HashMap::new(),
            player: Player::default(),
            turn_count: 0,
            active: true,
            game_over_message: "Game over.".to_string(),
        }
    }

    /// Register a room and return its id.
    ///
    /// # Errors
    /// - if a room with the same symbol is already registered
    pub fn add_room(&mut self, room: Room) -> Result<Id, WorldError> {
        if self.rooms.contains_key(&room.id) {
            return Err(WorldError::DuplicateSymbol(room.symbol));
        }
        let id = room.id;
        self.room_order.push(id);
        self.rooms.insert(id, room);
        Ok(id)
    }

    /// Register an item without placing it anywhere, and return its id.
    ///
    /// Unplaced items are how "next state" objects are staged: an effect can
    /// add them to a holder later in the game.
    ///
    /// # Errors
    /// - if an item with the same symbol is already registered
    pub fn add_item(&mut self, item: Item) -> Result<Id, WorldError> {
        if self.items.contains_key(&item.id) {
            return Err(WorldError::DuplicateSymbol(item.symbol));
        }
        let id = item.id;
        self.items.insert(id, item);
        Ok(id)
    }

    /// Put a registered item into a holder.
    ///
    /// # Errors
    /// - if the item is unknown or the holder can't be resolved
    pub fn place_item(&mut self, item_id: Id, holder: HolderRef) -> Result<(), WorldError> {
        self.item(item_id)?;
        self.holder_mut(holder)?.add(item_id);
        Ok(())
    }

    /// Add a one-way exit from `from` leading `direction` to `to`.
    ///
    /// # Errors
    /// - if either room is unknown
    pub fn connect(&mut self, from: Id, direction: &str, to: Id) -> Result<(), WorldError> {
        self.room(to)?;
        self.room_mut(from)?.add_exit(direction, to);
        Ok(())
    }

    /// # Errors
    /// - if the room is unknown
    pub fn room(&self, id: Id) -> Result<&Room, WorldError> {
        self.rooms.get(&id).ok_or(WorldError::UnknownRoom(id))
    }

    /// # Errors
    /// - if the room is unknown
    pub fn room_mut(&mut self, id: Id) -> Result<&mut Room, WorldError> {
        self.rooms.get_mut(&id).ok_or(WorldError::UnknownRoom(id))
    }

    /// # Errors
    /// - if the item is unknown
    pub fn item(&self, id: Id) -> Result<&Item, WorldError> {
        self.items.get(&id).ok_or(WorldError::UnknownItem(id))
    }

    /// # Errors
    /// - if the item is unknown
    pub fn item_mut(&mut self, id: Id) -> Result<&mut Item, WorldError> {
        self.items.get_mut(&id).ok_or(WorldError::UnknownItem(id))
    }

    /// Id of the room the player occupies.
    ///
    /// # Errors
    /// - if the player has not been placed yet
    pub fn current_room_id(&self) -> Result<Id, WorldError> {
        self.player
            .location
            .ok_or_else(|| WorldError::InvalidHolder(HolderRef::CurrentRoom.to_string()))
    }

    /// # Errors
    /// - if the player is not in a known room
    pub fn current_room(&self) -> Result<&Room, WorldError> {
        self.room(self.current_room_id()?)
    }

    /// # Errors
    /// - if the room reference can't be resolved
    pub fn resolve_room(&self, room: RoomRef) -> Result<Id, WorldError> {
        match room {
            RoomRef::Current => self.current_room_id(),
            RoomRef::Room(id) => self.room(id).map(|r| r.id),
        }
    }

    /// Borrow the holder a handle names.
    ///
    /// # Errors
    /// - for `Reachable`, which spans two holders
    /// - if a named room is unknown or the player has no room yet
    pub fn holder(&self, holder: HolderRef) -> Result<&Holder, WorldError> {
        match holder {
            HolderRef::Player => Ok(&self.player.inventory),
            HolderRef::Room(id) => Ok(&self.room(id)?.contents),
            HolderRef::CurrentRoom => Ok(&self.current_room()?.contents),
            HolderRef::Reachable => Err(WorldError::InvalidHolder(holder.to_string())),
        }
    }

    /// Mutably borrow the holder a handle names. `Reachable` resolves to the player.
    ///
    /// # Errors
    /// - if a named room is unknown or the player has no room yet
    pub fn holder_mut(&mut self, holder: HolderRef) -> Result<&mut Holder, WorldError> {
        match holder {
            HolderRef::Player | HolderRef::Reachable => Ok(&mut self.player.inventory),
            HolderRef::Room(id) => Ok(&mut self.room_mut(id)?.contents),
            HolderRef::CurrentRoom => {
                let id = self.current_room_id()?;
                Ok(&mut self.room_mut(id)?.contents)
            },
        }
    }

    /// True if the holder currently possesses every item in `required`.
    ///
    /// # Errors
    /// - if the holder can't be resolved
    pub fn holds_all(&self, holder: HolderRef, required: &[Id]) -> Result<bool, WorldError> {
        if holder.is_reachable() {
            let room = &self.current_room()?.contents;
            let inventory = &self.player.inventory;
            Ok(required.iter().all(|id| inventory.contains(*id) || room.contains(*id)))
        } else {
            Ok(self.holder(holder)?.contains_all(required))
        }
    }

    /// Find an item by alias in the player's inventory, then the current room.
    pub fn find_reachable(&self, alias: &str) -> Option<&Item> {
        self.player
            .inventory
            .find_by_alias(&self.items, alias)
            .or_else(|| {
                self.current_room()
                    .ok()
                    .and_then(|room| room.contents.find_by_alias(&self.items, alias))
            })
    }

    /// Describe a room, marking it visited.
    ///
    /// # Errors
    /// - if the room is unknown
    pub fn describe_room(&mut self, id: Id) -> Result<String, WorldError> {
        let room = self.rooms.get_mut(&id).ok_or(WorldError::UnknownRoom(id))?;
        Ok(room.describe(&self.items))
    }
}
