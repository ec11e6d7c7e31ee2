use delve_engine as de;
use de::command::{BuiltinVerb, Command, Vocabulary};
use de::*;

#[test]
fn test_lib_version() {
    assert!(!de::DELVE_VERSION.is_empty());
}

#[test]
fn test_idgen_uuid_deterministic() {
    let u1 = idgen::uuid_from_token(&idgen::NAMESPACE_ROOM, "test");
    let u2 = idgen::uuid_from_token(&idgen::NAMESPACE_ROOM, "test");
    assert_eq!(u1, u2);
    assert_eq!(idgen::room_id("test"), u1);
}

#[test]
fn test_command_parse() {
    let vocab = Vocabulary::from_config(&EngineConfig::default()).expect("vocabulary");
    assert!(matches!(
        vocab.parse("look"),
        Command::Builtin {
            verb: BuiltinVerb::Look,
            object: None
        }
    ));
    assert!(vocab.parse("e").is_move_to());
    assert!(vocab.parse("open gate").is_use_item());
}

#[test]
fn test_alias_lookup_prefers_earlier_item() {
    let mut world = World::new("aliases");
    let hall = world.add_room(Room::new("hall", "Hall")).expect("hall");
    let brass = world
        .add_item(Item::new("brass_key", "a brass key").with_aliases(&["key", "brass"]))
        .expect("brass");
    let iron = world
        .add_item(Item::new("iron_key", "an iron key").with_aliases(&["key", "iron"]))
        .expect("iron");
    world.place_item(brass, HolderRef::Room(hall)).expect("place");
    world.place_item(iron, HolderRef::Room(hall)).expect("place");

    let contents = &world.room(hall).expect("hall").contents;
    assert_eq!(contents.find_by_alias(&world.items, "key").map(|i| i.id), Some(brass));
    assert_eq!(contents.find_by_alias(&world.items, "iron").map(|i| i.id), Some(iron));
    assert!(contents.find_by_alias(&world.items, "copper").is_none());
}

#[test]
fn test_item_leaves_lookup_once_moved() {
    let mut world = World::new("moves");
    let hall = world.add_room(Room::new("hall", "Hall")).expect("hall");
    let cup = world
        .add_item(Item::new("cup", "a cup").with_aliases(&["cup"]))
        .expect("cup");
    world.place_item(cup, HolderRef::Room(hall)).expect("place");
    let mut engine = Engine::new(world, EngineConfig::default()).expect("engine");

    assert_eq!(engine.resolve("get cup"), "Okay.");
    let world = engine.world();
    assert!(world.room(hall).expect("hall").contents.find_by_alias(&world.items, "cup").is_none());
    assert!(world.player.inventory.find_by_alias(&world.items, "cup").is_some());
    assert_eq!(engine.resolve("get cup"), "You can't do that.");
}

#[test]
fn test_exits_are_one_way() {
    let mut world = World::new("one way");
    let top = world.add_room(Room::new("top", "Top").with_description("Top.")).expect("top");
    let bottom = world
        .add_room(Room::new("bottom", "Bottom").with_description("Bottom."))
        .expect("bottom");
    world.connect(top, "d", bottom).expect("connect");
    let mut engine = Engine::new(world, EngineConfig::default()).expect("engine");

    assert_eq!(engine.resolve("d"), "Bottom.");
    assert_eq!(engine.resolve("u"), "You cannot go that way.");
    assert_eq!(engine.world().player.location, Some(bottom));
}

#[test]
fn test_custom_config_from_toml() {
    let config = EngineConfig::from_toml_str(
        r#"
        legal_moves = ["north", "south"]
        verbs = ["l"]

        [messages]
        cannot_go = "No path leads there."
        unknown_verb = "Huh? You can't"
        "#,
    )
    .expect("config");
    let mut world = World::new("toml");
    world.add_room(Room::new("field", "Field").with_description("A field.")).expect("field");
    let mut engine = Engine::new(world, config).expect("engine");

    assert_eq!(engine.resolve("north"), "No path leads there.");
    assert_eq!(engine.resolve("n"), "Huh? You can't n.");
    assert_eq!(engine.resolve("l"), "A field.");
    assert_eq!(engine.resolve("look"), "Huh? You can't look.");
}
