//! Effects -- the atomic world mutations that behaviors are built from.
//!
//! Every [`Effect`] changes at most a small, named piece of the world and
//! returns the narration the player should see. Effects are run in order by
//! [`run_effects`] and their narration concatenated; there is no rollback, so
//! the preconditions for a sequence belong in the behavior that runs it.
//!
//! # Rewriting behaviors
//!
//! The [`AddBehavior`](Effect::AddBehavior), [`ClearBehaviors`](Effect::ClearBehaviors)
//! and [`ReplaceBehaviors`](Effect::ReplaceBehaviors) effects edit another
//! item's behavior list. Chained puzzles are built this way: the live step
//! replaces the next item's behaviors when it fires, so the next move only
//! exists after the previous one has been made.
//!
//! # Logging
//!
//! State changes are logged at `info`, anomalies that are tolerated (removing
//! an item that isn't there, removing a missing exit) at `warn`.

use anyhow::Result;
use log::{info, warn};

use crate::world::{HolderRef, RoomRef, World};
use crate::{Behavior, Id};

/// Reply when a transfer succeeds.
pub const TRANSFER_OK: &str = "Okay.";
/// Reply when the item to transfer is missing or fixed in place.
pub const CANNOT_TRANSFER: &str = "You can't do that.";
/// Reply when the item to examine can't be found.
pub const CANNOT_EXAMINE: &str = "You can't do that.";
/// Reply when an examined item has no description.
pub const NOTHING_SPECIAL: &str = "You see nothing special.";
/// Default reply when there is no exit in the requested direction.
pub const DEFAULT_MOVE_ERROR: &str = "You cannot go that way.";
/// Default reply when the player quits.
pub const QUIT_MSG: &str = "You have quit the game.";

/// A single change to the world, plus the text that narrates it.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Narrate a fixed message and change nothing.
    Say(String),
    /// Move the player through the current room's exit `direction`.
    MovePlayer { direction: String, failure: String },
    /// Put the player in a room directly, regardless of exits.
    SetPlayerRoom(Id),
    /// Move the first item answering to `alias` from one holder to another.
    TransferItem { alias: String, from: HolderRef, to: HolderRef },
    AddItem { item: Id, to: HolderRef },
    /// Remove an item; does nothing if the holder doesn't have it.
    RemoveItem { item: Id, from: HolderRef },
    AddExit { room: RoomRef, direction: String, to: Id },
    RemoveExit { room: RoomRef, direction: String },
    SetDescription { room: RoomRef, text: String, narration: String },
    AppendDescription { room: RoomRef, text: String, narration: String },
    AddBehavior { item: Id, behavior: Box<Behavior>, narration: String },
    ClearBehaviors { item: Id },
    /// Make `behavior` the item's only behavior.
    ReplaceBehaviors { item: Id, behavior: Box<Behavior>, narration: String },
    DescribeRoom,
    ListInventory,
    Examine { alias: String },
    /// Stop the game, narrating `message`.
    EndGame { message: String },
}

impl Effect {
    pub fn say(text: &str) -> Self {
        Effect::Say(text.to_string())
    }

    pub fn move_player(direction: &str, failure: &str) -> Self {
        Effect::MovePlayer {
            direction: direction.to_string(),
            failure: failure.to_string(),
        }
    }

    pub fn transfer(alias: &str, from: HolderRef, to: HolderRef) -> Self {
        Effect::TransferItem {
            alias: alias.to_string(),
            from,
            to,
        }
    }

    pub fn add_exit(room: RoomRef, direction: &str, to: Id) -> Self {
        Effect::AddExit {
            room,
            direction: direction.to_string(),
            to,
        }
    }

    pub fn remove_exit(room: RoomRef, direction: &str) -> Self {
        Effect::RemoveExit {
            room,
            direction: direction.to_string(),
        }
    }

    pub fn set_description(room: RoomRef, text: &str, narration: &str) -> Self {
        Effect::SetDescription {
            room,
            text: text.to_string(),
            narration: narration.to_string(),
        }
    }

    pub fn append_description(room: RoomRef, text: &str, narration: &str) -> Self {
        Effect::AppendDescription {
            room,
            text: text.to_string(),
            narration: narration.to_string(),
        }
    }

    pub fn add_behavior(item: Id, behavior: Behavior, narration: &str) -> Self {
        Effect::AddBehavior {
            item,
            behavior: Box::new(behavior),
            narration: narration.to_string(),
        }
    }

    pub fn replace_behaviors(item: Id, behavior: Behavior, narration: &str) -> Self {
        Effect::ReplaceBehaviors {
            item,
            behavior: Box::new(behavior),
            narration: narration.to_string(),
        }
    }

    pub fn end_game(message: &str) -> Self {
        Effect::EndGame {
            message: message.to_string(),
        }
    }
}

/// Run a sequence of effects in order, concatenating their narration.
///
/// # Errors
/// - if an effect refers to a room or item that doesn't exist
pub fn run_effects(world: &mut World, effects: &[Effect]) -> Result<String> {
    let mut msg = String::new();
    for effect in effects {
        msg.push_str(&dispatch_effect(world, effect)?);
    }
    Ok(msg)
}

/// Apply one effect to the world and return its narration.
///
/// # Errors
/// - if the effect refers to a room or item that doesn't exist
pub fn dispatch_effect(world: &mut World, effect: &Effect) -> Result<String> {
    match effect {
        Effect::Say(text) => Ok(text.clone()),
        Effect::MovePlayer { direction, failure } => move_player(world, direction, failure),
        Effect::SetPlayerRoom(room_id) => set_player_room(world, *room_id),
        Effect::TransferItem { alias, from, to } => transfer_item(world, alias, *from, *to),
        Effect::AddItem { item, to } => {
            world.item(*item)?;
            world.holder_mut(*to)?.add(*item);
            info!("└─ effect: AddItem({}, {to})", symbol_of(world, *item));
            Ok(String::new())
        },
        Effect::RemoveItem { item, from } => remove_item(world, *item, *from),
        Effect::AddExit { room, direction, to } => {
            let from = world.resolve_room(*room)?;
            world.room(*to)?;
            world.room_mut(from)?.add_exit(direction, *to);
            info!("└─ effect: AddExit({from} --{direction}--> {to})");
            Ok(String::new())
        },
        Effect::RemoveExit { room, direction } => {
            let from = world.resolve_room(*room)?;
            if world.room_mut(from)?.remove_exit(direction).is_some() {
                info!("└─ effect: RemoveExit({from} --{direction}-->)");
            } else {
                warn!("RemoveExit: room {from} has no exit '{direction}'");
            }
            Ok(String::new())
        },
        Effect::SetDescription { room, text, narration } => {
            let id = world.resolve_room(*room)?;
            world.room_mut(id)?.description.clone_from(text);
            info!("└─ effect: SetDescription({id})");
            Ok(narration.clone())
        },
        Effect::AppendDescription { room, text, narration } => {
            let id = world.resolve_room(*room)?;
            world.room_mut(id)?.description.push_str(text);
            info!("└─ effect: AppendDescription({id})");
            Ok(narration.clone())
        },
        Effect::AddBehavior { item, behavior, narration } => {
            world.item_mut(*item)?.add_behavior((**behavior).clone());
            info!(
                "└─ effect: AddBehavior({}, '{}')",
                symbol_of(world, *item),
                behavior.trigger()
            );
            Ok(narration.clone())
        },
        Effect::ClearBehaviors { item } => {
            world.item_mut(*item)?.clear_behaviors();
            info!("└─ effect: ClearBehaviors({})", symbol_of(world, *item));
            Ok(String::new())
        },
        Effect::ReplaceBehaviors { item, behavior, narration } => {
            world.item_mut(*item)?.replace_behaviors((**behavior).clone());
            info!(
                "└─ effect: ReplaceBehaviors({}, '{}')",
                symbol_of(world, *item),
                behavior.trigger()
            );
            Ok(narration.clone())
        },
        Effect::DescribeRoom => {
            let id = world.current_room_id()?;
            Ok(world.describe_room(id)?)
        },
        Effect::ListInventory => Ok(world.player.list_inventory(&world.items)),
        Effect::Examine { alias } => Ok(match world.find_reachable(alias) {
            Some(item) if item.description.is_empty() => NOTHING_SPECIAL.to_string(),
            Some(item) => item.description.clone(),
            None => CANNOT_EXAMINE.to_string(),
        }),
        Effect::EndGame { message } => {
            world.active = false;
            info!("└─ effect: EndGame after {} turns", world.turn_count);
            Ok(message.clone())
        },
    }
}

fn symbol_of(world: &World, item_id: Id) -> &str {
    world.items.get(&item_id).map_or("<unknown>", |item| item.symbol.as_str())
}

fn move_player(world: &mut World, direction: &str, failure: &str) -> Result<String> {
    let current = world.current_room()?;
    let Some(destination) = current.exit(direction) else {
        info!("no exit '{direction}' from {}", current.symbol);
        return Ok(failure.to_string());
    };
    world.room(destination)?;
    world.player.location = Some(destination);
    info!("{} moved {direction} to {}", world.player.name, world.room(destination)?.symbol);
    Ok(world.describe_room(destination)?)
}

fn set_player_room(world: &mut World, room_id: Id) -> Result<String> {
    world.room(room_id)?;
    world.player.location = Some(room_id);
    info!("└─ effect: SetPlayerRoom({})", world.room(room_id)?.symbol);
    Ok(world.describe_room(room_id)?)
}

fn transfer_item(world: &mut World, alias: &str, from: HolderRef, to: HolderRef) -> Result<String> {
    let (item_id, portable) = match world.holder(from)?.find_by_alias(&world.items, alias) {
        Some(item) => (item.id, item.portable),
        None => return Ok(CANNOT_TRANSFER.to_string()),
    };
    if !portable {
        info!("refused transfer of fixed item {}", symbol_of(world, item_id));
        return Ok(CANNOT_TRANSFER.to_string());
    }
    // resolve the destination before touching the source
    world.holder_mut(to)?;
    world.holder_mut(from)?.remove(item_id);
    world.holder_mut(to)?.add(item_id);
    info!("└─ effect: TransferItem({}, {from} -> {to})", symbol_of(world, item_id));
    Ok(TRANSFER_OK.to_string())
}

/// A miss on `Reachable` means the player asked about something not at hand,
/// so it gets the transfer refusal; a miss on a named holder stays silent.
fn remove_item(world: &mut World, item_id: Id, from: HolderRef) -> Result<String> {
    let removed = if from.is_reachable() {
        world.player.inventory.remove(item_id) || world.holder_mut(HolderRef::CurrentRoom)?.remove(item_id)
    } else {
        world.holder_mut(from)?.remove(item_id)
    };
    if removed {
        info!("└─ effect: RemoveItem({}, {from})", symbol_of(world, item_id));
        return Ok(String::new());
    }
    warn!("RemoveItem: {} not found in {from}", symbol_of(world, item_id));
    if from.is_reachable() {
        Ok(CANNOT_TRANSFER.to_string())
    } else {
        Ok(String::new())
    }
}
