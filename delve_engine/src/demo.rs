//! A small built-in scenario, "The Sealed Delve".
//!
//! Pure data: everything here is built through the public world API, the same
//! way an external scenario would do it. It exists so the binary has something
//! to play and so every behavior type gets exercised end to end.
//!
//! Walkthrough: `touch o`, `touch p`, `touch e`, `touch n`, `get ruby`, `n`,
//! `give hermit ruby`, `answer door stone`, `e`, `get scroll`, `wear helmet`,
//! `enter portal`, `read scroll`.

use crate::config::{CLASSIC_USE_ALIASES, EngineConfig, UseAliases};
use crate::error::WorldError;
use crate::idgen::item_id;
use crate::world::{HolderRef, RoomRef, World};
use crate::{Behavior, Effect, Id, Item, Room};

/// Verbs the demo needs on top of the classic "use" set.
pub const DEMO_USE_ALIASES: [&str; 5] = ["touch", "give", "answer", "wear", "enter"];

const NOTHING_HAPPENS: &str = "Nothing happens.";

const CAVERN_SEALED: &str = "You stand in a low cavern. Four glyphs are carved into the north wall: O, P, E and N.";
const CAVERN_OPEN: &str = "You stand in a low cavern. The north wall has slid away, revealing a passage.";

/// Config with the classic "use" words plus [`DEMO_USE_ALIASES`].
pub fn demo_config() -> EngineConfig {
    let words = CLASSIC_USE_ALIASES
        .iter()
        .chain(DEMO_USE_ALIASES.iter())
        .map(|w| (*w).to_string())
        .collect();
    EngineConfig::default().with_use_aliases(UseAliases::Custom(words))
}

/// Build the demo world. The first room added is the starting room.
///
/// # Errors
/// - only if the scenario data itself is inconsistent
pub fn build_demo() -> Result<World, WorldError> {
    let mut world = World::new("The Sealed Delve");
    world.opening = "You come to in the dark, the taste of dust in your mouth. \
                     Somewhere far above, wind moans across a shaft you no longer remember falling down."
        .to_string();
    world.game_over_message = "Thanks for playing The Sealed Delve.".to_string();

    let cavern = world.add_room(
        Room::new("cavern", "Cavern")
            .with_description(CAVERN_SEALED)
            .with_first_enter_msg("Your eyes slowly adjust to the gloom.\n"),
    )?;
    let vault = world.add_room(Room::new("vault", "Vault").with_description(
        "A vaulted chamber. A hermit squats by a guttering fire. \
         An iron door in the east wall bears a riddle: \"Mountains are made of me, and the more you quarry, the more of me lies about. What am I?\"",
    ))?;
    let shrine = world.add_room(
        Room::new("shrine", "Shrine")
            .with_description("A cramped shrine. A ring of dark stone stands against the far wall.")
            .with_first_enter_msg("The air hums faintly here.\n"),
    )?;
    let sanctum = world.add_room(
        Room::new("sanctum", "Sanctum")
            .with_description("A round chamber open to a sky full of unfamiliar stars."),
    )?;
    world.connect(vault, "s", cavern)?;
    world.connect(shrine, "w", vault)?;

    build_glyphs(&mut world, cavern, vault)?;
    build_hermit(&mut world, vault)?;
    build_riddle_door(&mut world, vault, shrine)?;
    build_portal(&mut world, shrine, sanctum)?;
    build_scroll(&mut world, shrine, sanctum)?;

    let ruby = world.add_item(
        Item::new("ruby", "a ruby")
            .with_aliases(&["ruby", "gem"])
            .with_description("A ruby the size of a thumbnail, warm to the touch."),
    )?;
    world.place_item(ruby, HolderRef::Room(cavern))?;

    let lamp = world.add_item(
        Item::new("lamp", "an oil lamp")
            .with_aliases(&["lamp"])
            .with_description("A battered oil lamp, nearly dry."),
    )?;
    world.place_item(lamp, HolderRef::Player)?;

    let mushroom = world.add_item(
        Item::new("mushroom", "a pale mushroom")
            .with_aliases(&["mushroom"])
            .with_description("It smells faintly of almonds.")
            .with_behavior(Behavior::unconditional(
                "eat",
                vec![Effect::end_game(
                    "You eat the mushroom. Your throat tightens and the cavern spins away.\nYou have died.",
                )],
            )),
    )?;
    world.place_item(mushroom, HolderRef::Room(vault))?;

    Ok(world)
}

/// The O-P-E-N wall. Only the next glyph in sequence is live at any time;
/// every other glyph just says nothing happens.
fn build_glyphs(world: &mut World, cavern: Id, vault: Id) -> Result<(), WorldError> {
    let [o, p, e, n] = ["o", "p", "e", "n"].map(|letter| item_id(&format!("glyph_{letter}")));
    let spent = |glyph: Id| Effect::replace_behaviors(glyph, nothing_happens(), "");

    let touch_n = Behavior::unconditional(
        "touch",
        vec![
            Effect::say("The N flares white. With a grinding roar the north wall slides away!"),
            spent(n),
            Effect::add_exit(RoomRef::Room(cavern), "n", vault),
            Effect::set_description(RoomRef::Room(cavern), CAVERN_OPEN, ""),
        ],
    );
    let touch_e = Behavior::unconditional(
        "touch",
        vec![
            Effect::say("The E begins to glow."),
            spent(e),
            Effect::replace_behaviors(n, touch_n, ""),
        ],
    );
    let touch_p = Behavior::unconditional(
        "touch",
        vec![
            Effect::say("The P begins to glow."),
            spent(p),
            Effect::replace_behaviors(e, touch_e, ""),
        ],
    );
    let touch_o = Behavior::unconditional(
        "touch",
        vec![
            Effect::say("The O begins to glow."),
            spent(o),
            Effect::replace_behaviors(p, touch_p, ""),
        ],
    );

    for (letter, first) in [("o", Some(touch_o)), ("p", None), ("e", None), ("n", None)] {
        let glyph = Item::new(&format!("glyph_{letter}"), &format!("a glyph shaped like {}", letter.to_uppercase()))
            .with_aliases(&[letter])
            .with_description("The carving is worn smooth by many hands.")
            .fixed()
            .hidden()
            .with_behavior(first.unwrap_or_else(nothing_happens));
        let id = world.add_item(glyph)?;
        world.place_item(id, HolderRef::Room(cavern))?;
    }
    Ok(())
}

fn nothing_happens() -> Behavior {
    Behavior::unconditional("touch", vec![Effect::say(NOTHING_HAPPENS)])
}

/// A hermit who trades a helmet for the ruby and has no use for the lamp.
fn build_hermit(world: &mut World, vault: Id) -> Result<(), WorldError> {
    let hermit_id = item_id("hermit");
    let ruby = item_id("ruby");
    let lamp = item_id("lamp");

    let helmet = world.add_item(
        Item::new("helmet", "a dented helmet")
            .with_aliases(&["helmet"])
            .with_description("A dented bronze helmet. Strange sigils ring the brim."),
    )?;

    let give_ruby = Behavior::restricted(
        "give",
        vec![
            Effect::RemoveItem {
                item: ruby,
                from: HolderRef::Player,
            },
            Effect::AddItem {
                item: helmet,
                to: HolderRef::Player,
            },
            Effect::say("The hermit's eyes glitter. The ruby vanishes into the sacking and a dented helmet is pressed into your hands."),
            Effect::replace_behaviors(
                hermit_id,
                Behavior::unconditional("give", vec![Effect::say("The hermit ignores you, too busy admiring the ruby.")]),
                "",
            ),
        ],
        HolderRef::Player,
        vec![ruby],
        "You don't have that.",
    );
    let give_lamp = Behavior::restricted(
        "give",
        vec![Effect::say("The hermit squints at the lamp. \"Fire enough here.\"")],
        HolderRef::Player,
        vec![lamp],
        "You don't have that.",
    );

    let hermit = world.add_item(
        Item::new("hermit", "a hermit")
            .with_aliases(&["hermit"])
            .with_description("A wiry old figure wrapped in sacking, forever glancing at your pockets.")
            .fixed()
            .hidden()
            .with_behavior(Behavior::choice(
                "give",
                [("ruby", give_ruby), ("lamp", give_lamp)],
                "The hermit isn't interested in that.",
            ))
            .with_behavior(Behavior::unconditional_with_msg(
                "talk",
                vec![Effect::say("\"Shiny things,\" the hermit mutters. \"Bring me something shiny.\"")],
                "The hermit pretends not to notice.",
            )),
    )?;
    world.place_item(hermit, HolderRef::Room(vault))?;
    Ok(())
}

/// An iron door that opens the way east when the riddle is answered.
fn build_riddle_door(world: &mut World, vault: Id, shrine: Id) -> Result<(), WorldError> {
    let door_id = item_id("iron_door");
    let solved = Behavior::unconditional(
        "answer",
        vec![
            Effect::say("The riddle's letters glow and the iron door swings open to the east."),
            Effect::add_exit(RoomRef::Room(vault), "e", shrine),
            Effect::append_description(RoomRef::Room(vault), " The iron door stands open.", ""),
            Effect::replace_behaviors(
                door_id,
                Behavior::unconditional("answer", vec![Effect::say("The door is already open.")]),
                "",
            ),
        ],
    );
    let wrong = Behavior::unconditional("answer", vec![Effect::say("Nothing happens. The door stays shut.")]);

    let door = world.add_item(
        Item::new("iron_door", "an iron door")
            .with_aliases(&["door"])
            .with_description("Heavy iron, riveted. The riddle is scratched deep into its face.")
            .fixed()
            .hidden()
            .with_behavior(Behavior::conditional("answer", "stone", solved, wrong)),
    )?;
    world.place_item(door, HolderRef::Room(vault))?;
    Ok(())
}

/// The dark portal. Wearing the helmet swaps it for a lit one that leads on.
fn build_portal(world: &mut World, shrine: Id, sanctum: Id) -> Result<(), WorldError> {
    let closed_id = item_id("portal_closed");
    let helmet = item_id("helmet");

    let open = world.add_item(
        Item::new("portal_open", "a blazing portal")
            .with_aliases(&["portal", "ring"])
            .with_description("The stone ring is filled with rippling light.")
            .fixed()
            .with_behavior(Behavior::unconditional(
                "enter",
                vec![
                    Effect::say("You step into the light.\n"),
                    Effect::SetPlayerRoom(sanctum),
                ],
            )),
    )?;

    let closed = world.add_item(
        Item::new("portal_closed", "a ring of dark stone")
            .with_aliases(&["portal", "ring"])
            .with_description("Sigils run around the ring, matching those on the helmet's brim.")
            .fixed()
            .hidden()
            .with_behavior(Behavior::unconditional(
                "enter",
                vec![Effect::say("You press against cold stone. It is only a ring of rock, for now.")],
            )),
    )?;
    world.place_item(closed, HolderRef::Room(shrine))?;

    world.item_mut(helmet)?.add_behavior(Behavior::location_restricted(
        shrine,
        Behavior::restricted(
            "wear",
            vec![
                Effect::say("You put on the helmet. The sigils on its brim flare, and the stone ring blazes into life!"),
                Effect::RemoveItem {
                    item: closed_id,
                    from: HolderRef::Room(shrine),
                },
                Effect::AddItem {
                    item: open,
                    to: HolderRef::Room(shrine),
                },
                Effect::ClearBehaviors { item: helmet },
            ],
            HolderRef::Player,
            vec![helmet],
            "You need to be holding it first.",
        ),
    ));
    world.item_mut(helmet)?.add_behavior(Behavior::unconditional(
        "wear",
        vec![Effect::say("You try the helmet on. It pinches. You take it off again.")],
    ));
    Ok(())
}

/// A scroll whose spell only works under the open sky of the sanctum.
fn build_scroll(world: &mut World, shrine: Id, sanctum: Id) -> Result<(), WorldError> {
    let scroll = world.add_item(
        Item::new("scroll", "a brittle scroll")
            .with_aliases(&["scroll"])
            .with_description("Runes crawl across it. They seem to want starlight.")
            .with_behavior(Behavior::location_restricted(
                sanctum,
                Behavior::unconditional(
                    "read",
                    vec![
                        Effect::say("You read the runes aloud beneath the stars. "),
                        Effect::end_game("The sky folds around you and you are lifted out of the delve. You have escaped!"),
                    ],
                ),
            ))
            .with_behavior(Behavior::unconditional(
                "read",
                vec![Effect::say("The runes swim before your eyes. It's too dark down here.")],
            )),
    )?;
    world.place_item(scroll, HolderRef::Room(shrine))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_world;
    use crate::idgen::room_id;

    #[test]
    fn demo_world_builds_and_validates() {
        let world = build_demo().expect("demo builds");
        assert_eq!(world.room_order.len(), 4);
        assert_eq!(world.room_order[0], room_id("cavern"));
        assert!(validate_world(&world).is_empty());
    }

    #[test]
    fn only_the_first_glyph_starts_live() {
        let world = build_demo().expect("demo builds");
        let o = world.item(item_id("glyph_o")).expect("o");
        let p = world.item(item_id("glyph_p")).expect("p");
        assert_eq!(o.behaviors.len(), 1);
        assert_eq!(p.behaviors, vec![nothing_happens()]);
        assert_ne!(o.behaviors, p.behaviors);
    }

    #[test]
    fn demo_config_keeps_classic_words() {
        let words = demo_config().use_aliases.words();
        assert!(words.iter().any(|w| w == "read"));
        assert!(words.iter().any(|w| w == "touch"));
    }
}
