//! Load-time reference checks for a built [`World`].
//!
//! Behaviors and effects name rooms and items by id. Nothing stops scenario
//! code from naming an id it never registered, so every reference reachable
//! from the world is checked once here, before the first command is resolved.

use log::error;

use crate::error::WorldError;
use crate::world::{HolderRef, RoomRef, World};
use crate::{Behavior, Effect, Id};

/// Check every room and item reference in the world.
///
/// Returns all problems found, each wrapped in [`WorldError::Dangling`] with
/// a description of where the bad reference lives. An empty list means the
/// world is safe to play.
pub fn validate_world(world: &World) -> Vec<WorldError> {
    let mut errors = Vec::new();

    for room_id in &world.room_order {
        let Some(room) = world.rooms.get(room_id) else {
            errors.push(dangling(format!("room order entry {room_id}"), WorldError::UnknownRoom(*room_id)));
            continue;
        };
        let mut exits: Vec<_> = room.exits.iter().collect();
        exits.sort_by(|a, b| a.0.cmp(b.0));
        for (direction, to) in exits {
            check_room(world, *to, || format!("room '{}' exit '{direction}'", room.symbol), &mut errors);
        }
        for item_id in room.contents.iter() {
            check_item(world, *item_id, || format!("room '{}' contents", room.symbol), &mut errors);
        }
    }

    for item_id in world.player.inventory.iter() {
        check_item(world, *item_id, || "player inventory".to_string(), &mut errors);
    }

    let mut items: Vec<_> = world.items.values().collect();
    items.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    for item in items {
        for (index, behavior) in item.behaviors.iter().enumerate() {
            let context = format!("item '{}' behavior {index} ('{}')", item.symbol, behavior.trigger());
            validate_behavior(world, behavior, &context, &mut errors);
        }
    }

    for err in &errors {
        error!("world '{}': {err}", world.name);
    }
    errors
}

fn validate_behavior(world: &World, behavior: &Behavior, context: &str, errors: &mut Vec<WorldError>) {
    match behavior {
        Behavior::Unconditional { effects, .. } => {
            for effect in effects {
                validate_effect(world, effect, context, errors);
            }
        },
        Behavior::Restricted {
            effects, holder, requires, ..
        } => {
            check_holder(world, *holder, context, errors);
            for id in requires {
                check_item(world, *id, || format!("{context} requirement"), errors);
            }
            for effect in effects {
                validate_effect(world, effect, context, errors);
            }
        },
        Behavior::Choice { choices, .. } => {
            for (answer, sub) in choices {
                validate_behavior(world, sub, &format!("{context} choice '{answer}'"), errors);
            }
        },
        Behavior::Conditional {
            on_correct, on_incorrect, ..
        } => {
            validate_behavior(world, on_correct, &format!("{context} correct branch"), errors);
            validate_behavior(world, on_incorrect, &format!("{context} incorrect branch"), errors);
        },
        Behavior::LocationRestricted { room, inner } => {
            check_room(world, *room, || format!("{context} location"), errors);
            validate_behavior(world, inner, context, errors);
        },
    }
}

fn validate_effect(world: &World, effect: &Effect, context: &str, errors: &mut Vec<WorldError>) {
    let ctx = || format!("{context} effect {effect:?}");
    match effect {
        Effect::Say(_)
        | Effect::MovePlayer { .. }
        | Effect::DescribeRoom
        | Effect::ListInventory
        | Effect::Examine { .. }
        | Effect::EndGame { .. } => {},
        Effect::SetPlayerRoom(room) => check_room(world, *room, ctx, errors),
        Effect::TransferItem { from, to, .. } => {
            check_holder(world, *from, context, errors);
            check_holder(world, *to, context, errors);
        },
        Effect::AddItem { item, to: holder } | Effect::RemoveItem { item, from: holder } => {
            check_item(world, *item, ctx, errors);
            check_holder(world, *holder, context, errors);
        },
        Effect::AddExit { room, to, .. } => {
            check_room_ref(world, *room, context, errors);
            check_room(world, *to, ctx, errors);
        },
        Effect::RemoveExit { room, .. }
        | Effect::SetDescription { room, .. }
        | Effect::AppendDescription { room, .. } => check_room_ref(world, *room, context, errors),
        Effect::AddBehavior { item, behavior, .. } | Effect::ReplaceBehaviors { item, behavior, .. } => {
            check_item(world, *item, ctx, errors);
            validate_behavior(world, behavior, &format!("{context} staged behavior"), errors);
        },
        Effect::ClearBehaviors { item } => check_item(world, *item, ctx, errors),
    }
}

fn check_holder(world: &World, holder: HolderRef, context: &str, errors: &mut Vec<WorldError>) {
    if let HolderRef::Room(id) = holder {
        check_room(world, id, || format!("{context} holder"), errors);
    }
}

fn check_room_ref(world: &World, room: RoomRef, context: &str, errors: &mut Vec<WorldError>) {
    if let RoomRef::Room(id) = room {
        check_room(world, id, || format!("{context} target room"), errors);
    }
}

fn check_room(world: &World, id: Id, context: impl FnOnce() -> String, errors: &mut Vec<WorldError>) {
    if !world.rooms.contains_key(&id) {
        errors.push(dangling(context(), WorldError::UnknownRoom(id)));
    }
}

fn check_item(world: &World, id: Id, context: impl FnOnce() -> String, errors: &mut Vec<WorldError>) {
    if !world.items.contains_key(&id) {
        errors.push(dangling(context(), WorldError::UnknownItem(id)));
    }
}

fn dangling(context: String, source: WorldError) -> WorldError {
    WorldError::Dangling {
        context,
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Item, Room, idgen};

    fn base_world() -> (World, Id, Id) {
        let mut world = World::new("validate");
        let hall = world.add_room(Room::new("hall", "Hall")).expect("hall");
        let key = world.add_item(Item::new("key", "a key")).expect("key");
        world.place_item(key, HolderRef::Room(hall)).expect("place");
        (world, hall, key)
    }

    #[test]
    fn clean_world_has_no_errors() {
        let (mut world, hall, key) = base_world();
        world
            .item_mut(key)
            .expect("key")
            .add_behavior(Behavior::location_restricted(
                hall,
                Behavior::unconditional("turn", vec![Effect::add_exit(RoomRef::Current, "n", hall)]),
            ));
        assert!(validate_world(&world).is_empty());
    }

    #[test]
    fn missing_exit_target_is_reported() {
        let (mut world, hall, _) = base_world();
        world.room_mut(hall).expect("hall").add_exit("n", idgen::room_id("nowhere"));
        let errors = validate_world(&world);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("room 'hall' exit 'n'"));
    }

    #[test]
    fn errors_are_reported_in_a_stable_order() {
        let (mut world, hall, _) = base_world();
        let nowhere = idgen::room_id("nowhere");
        for direction in ["w", "e", "s", "n"] {
            world.room_mut(hall).expect("hall").add_exit(direction, nowhere);
        }
        for symbol in ["zither", "anvil", "mallet"] {
            let item = Item::new(symbol, symbol)
                .with_behavior(Behavior::unconditional("go", vec![Effect::SetPlayerRoom(nowhere)]));
            world.add_item(item).expect("item");
        }

        let messages: Vec<String> = validate_world(&world).iter().map(ToString::to_string).collect();
        assert_eq!(messages.len(), 7);
        assert!(messages[0].contains("exit 'e'"));
        assert!(messages[1].contains("exit 'n'"));
        assert!(messages[2].contains("exit 's'"));
        assert!(messages[3].contains("exit 'w'"));
        assert!(messages[4].contains("item 'anvil'"));
        assert!(messages[5].contains("item 'mallet'"));
        assert!(messages[6].contains("item 'zither'"));
    }

    #[test]
    fn dangling_ids_inside_nested_behaviors_are_found() {
        let (mut world, _, key) = base_world();
        let ghost = idgen::item_id("ghost");
        let staged = Behavior::restricted("open", vec![], HolderRef::Player, vec![ghost], "No.");
        let riddle = Behavior::conditional(
            "answer",
            "stone",
            Behavior::unconditional("answer", vec![Effect::add_behavior(key, staged, "")]),
            Behavior::unconditional("answer", vec![Effect::SetPlayerRoom(idgen::room_id("void"))]),
        );
        world.item_mut(key).expect("key").add_behavior(riddle);

        let errors = validate_world(&world);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| matches!(
            e,
            WorldError::Dangling { source, .. } if matches!(**source, WorldError::UnknownItem(id) if id == ghost)
        )));
        assert!(errors.iter().any(|e| matches!(
            e,
            WorldError::Dangling { source, .. } if matches!(**source, WorldError::UnknownRoom(_))
        )));
    }

    #[test]
    fn unregistered_item_in_inventory_is_reported() {
        let (mut world, _, _) = base_world();
        world.player.inventory.add(idgen::item_id("stray"));
        let errors = validate_world(&world);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("player inventory"));
    }
}
