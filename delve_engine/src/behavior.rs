//! Behaviors -- what an item does when the player uses it.
//!
//! A [`Behavior`] pairs a trigger verb with a policy deciding whether its
//! effects run. Items carry an ordered list of them, and effects can rewrite
//! those lists at runtime, which is how multi-step puzzles advance.
//!
//! # Resolution
//!
//! [`use_item`] walks an item's list in attachment order:
//! - behaviors whose trigger doesn't match the verb are skipped,
//! - the first matching behavior that doesn't come back [`Outcome::Ignored`]
//!   decides the reply,
//! - if the only matches were ignored (location-restricted behaviors used
//!   elsewhere) the reply is empty,
//! - if nothing matched, the reply is the first skipped behavior's mismatch
//!   message, or the caller's fallback when there is none.
//!
//! Answers for [`Choice`](Behavior::Choice) and [`Conditional`](Behavior::Conditional)
//! behaviors are compared exactly, with no trimming or case folding.

use std::collections::HashMap;

use anyhow::Result;
use log::info;
use variantly::Variantly;

use crate::effect::run_effects;
use crate::world::{HolderRef, World};
use crate::{Effect, Id};

/// Default reply for a verb an unconditional behavior doesn't respond to.
pub const COMMAND_ERROR: &str = "You cannot do that.";
/// Reply for a verb a restricted behavior doesn't respond to.
pub const RESTRICTED_WRONG_VERB: &str = "You can't do that.";

/// The words of a "use"-class command: `<verb> <alias> [answer]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseContext {
    pub verb: String,
    pub alias: String,
    pub answer: Option<String>,
}

impl UseContext {
    pub fn new(verb: &str, alias: &str, answer: Option<&str>) -> Self {
        Self {
            verb: verb.to_string(),
            alias: alias.to_string(),
            answer: answer.map(str::to_string),
        }
    }

    /// Build from tokenised input. Needs at least a verb and an alias.
    pub fn from_tokens(tokens: &[String]) -> Option<Self> {
        match tokens {
            [verb, alias, rest @ ..] => Some(Self {
                verb: verb.clone(),
                alias: alias.clone(),
                answer: rest.first().cloned(),
            }),
            _ => None,
        }
    }
}

/// Result of offering a command to one behavior.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Outcome {
    /// Effects ran; the narration they produced.
    Fired(String),
    /// Nothing ran; the reason to give the player.
    Refused(String),
    /// The behavior stayed silent (location-restricted, wrong room).
    Ignored,
}

/// A trigger verb plus the policy that decides whether effects run.
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    /// Runs its effects whenever the verb matches.
    Unconditional {
        trigger: String,
        effects: Vec<Effect>,
        invalid_msg: String,
    },
    /// Runs its effects only while `holder` possesses every item in `requires`.
    Restricted {
        trigger: String,
        effects: Vec<Effect>,
        holder: HolderRef,
        requires: Vec<Id>,
        not_holding_msg: String,
    },
    /// Picks a sub-behavior by the answer word.
    Choice {
        trigger: String,
        choices: HashMap<String, Behavior>,
        invalid_choice: String,
    },
    /// Routes to one of two sub-behaviors depending on whether the answer is exactly `answer`.
    Conditional {
        trigger: String,
        answer: String,
        on_correct: Box<Behavior>,
        on_incorrect: Box<Behavior>,
    },
    /// Forwards to `inner` only while the player is in `room`; otherwise silent.
    LocationRestricted { room: Id, inner: Box<Behavior> },
}

impl Behavior {
    pub fn unconditional(trigger: &str, effects: Vec<Effect>) -> Self {
        Self::unconditional_with_msg(trigger, effects, COMMAND_ERROR)
    }

    pub fn unconditional_with_msg(trigger: &str, effects: Vec<Effect>, invalid_msg: &str) -> Self {
        Behavior::Unconditional {
            trigger: trigger.to_string(),
            effects,
            invalid_msg: invalid_msg.to_string(),
        }
    }

    pub fn restricted(
        trigger: &str,
        effects: Vec<Effect>,
        holder: HolderRef,
        requires: Vec<Id>,
        not_holding_msg: &str,
    ) -> Self {
        Behavior::Restricted {
            trigger: trigger.to_string(),
            effects,
            holder,
            requires,
            not_holding_msg: not_holding_msg.to_string(),
        }
    }

    pub fn choice<'a>(
        trigger: &str,
        choices: impl IntoIterator<Item = (&'a str, Behavior)>,
        invalid_choice: &str,
    ) -> Self {
        Behavior::Choice {
            trigger: trigger.to_string(),
            choices: choices
                .into_iter()
                .map(|(answer, behavior)| (answer.to_string(), behavior))
                .collect(),
            invalid_choice: invalid_choice.to_string(),
        }
    }

    pub fn conditional(trigger: &str, answer: &str, on_correct: Behavior, on_incorrect: Behavior) -> Self {
        Behavior::Conditional {
            trigger: trigger.to_string(),
            answer: answer.to_string(),
            on_correct: Box::new(on_correct),
            on_incorrect: Box::new(on_incorrect),
        }
    }

    pub fn location_restricted(room: Id, inner: Behavior) -> Self {
        Behavior::LocationRestricted {
            room,
            inner: Box::new(inner),
        }
    }

    /// The verb this behavior responds to.
    pub fn trigger(&self) -> &str {
        match self {
            Behavior::Unconditional { trigger, .. }
            | Behavior::Restricted { trigger, .. }
            | Behavior::Choice { trigger, .. }
            | Behavior::Conditional { trigger, .. } => trigger,
            Behavior::LocationRestricted { inner, .. } => inner.trigger(),
        }
    }

    pub fn matches(&self, verb: &str) -> bool {
        self.trigger() == verb
    }

    /// What to say when offered a verb this behavior doesn't respond to, if anything.
    pub fn mismatch_message(&self) -> Option<&str> {
        match self {
            Behavior::Unconditional { invalid_msg, .. } => Some(invalid_msg),
            Behavior::Restricted { .. } => Some(RESTRICTED_WRONG_VERB),
            Behavior::Choice { .. } | Behavior::Conditional { .. } => None,
            Behavior::LocationRestricted { inner, .. } => inner.mismatch_message(),
        }
    }

    /// Every effect this behavior or any of its sub-behaviors can run.
    pub fn referenced_effects(&self) -> Vec<&Effect> {
        match self {
            Behavior::Unconditional { effects, .. } | Behavior::Restricted { effects, .. } => effects.iter().collect(),
            Behavior::Choice { choices, .. } => choices.values().flat_map(Behavior::referenced_effects).collect(),
            Behavior::Conditional {
                on_correct, on_incorrect, ..
            } => {
                let mut all = on_correct.referenced_effects();
                all.extend(on_incorrect.referenced_effects());
                all
            },
            Behavior::LocationRestricted { inner, .. } => inner.referenced_effects(),
        }
    }
}

/// Offer a command to a single behavior.
///
/// # Errors
/// - if a possession check or effect refers to something missing from the world
pub fn run_behavior(world: &mut World, behavior: &Behavior, ctx: &UseContext) -> Result<Outcome> {
    if !behavior.matches(&ctx.verb) {
        return Ok(Outcome::Refused(
            behavior.mismatch_message().unwrap_or(COMMAND_ERROR).to_string(),
        ));
    }

    match behavior {
        Behavior::Unconditional { effects, .. } => Ok(Outcome::Fired(run_effects(world, effects)?)),
        Behavior::Restricted {
            effects,
            holder,
            requires,
            not_holding_msg,
            ..
        } => {
            if world.holds_all(*holder, requires)? {
                Ok(Outcome::Fired(run_effects(world, effects)?))
            } else {
                info!("'{}' refused: {holder} lacks required items", ctx.verb);
                Ok(Outcome::Refused(not_holding_msg.clone()))
            }
        },
        Behavior::Choice {
            trigger,
            choices,
            invalid_choice,
        } => match &ctx.answer {
            None => Ok(Outcome::Refused(answer_prompt(trigger, ctx))),
            Some(answer) => match choices.get(answer) {
                Some(chosen) => run_behavior(world, chosen, ctx),
                None => Ok(Outcome::Refused(invalid_choice.clone())),
            },
        },
        Behavior::Conditional {
            trigger,
            answer,
            on_correct,
            on_incorrect,
        } => match &ctx.answer {
            None => Ok(Outcome::Refused(answer_prompt(trigger, ctx))),
            Some(given) if given == answer => run_behavior(world, on_correct, ctx),
            Some(_) => run_behavior(world, on_incorrect, ctx),
        },
        Behavior::LocationRestricted { room, inner } => {
            if world.current_room_id()? == *room {
                run_behavior(world, inner, ctx)
            } else {
                Ok(Outcome::Ignored)
            }
        },
    }
}

fn answer_prompt(trigger: &str, ctx: &UseContext) -> String {
    format!("{trigger} {} what?", ctx.alias)
}

/// Resolve a "use"-class command against one item's behaviors.
///
/// The list is cloned up front, so effects are free to rewrite this item's
/// own behaviors while they run.
///
/// # Errors
/// - if the item is unknown, or a behavior refers to something missing from the world
pub fn use_item(world: &mut World, item_id: Id, ctx: &UseContext, fallback: &str) -> Result<String> {
    let item = world.item(item_id)?;
    let symbol = item.symbol.clone();
    let behaviors = item.behaviors.clone();

    let mut mismatch: Option<String> = None;
    let mut ignored = false;
    for behavior in &behaviors {
        if !behavior.matches(&ctx.verb) {
            if mismatch.is_none() {
                mismatch = behavior.mismatch_message().map(str::to_string);
            }
            continue;
        }
        match run_behavior(world, behavior, ctx)? {
            Outcome::Fired(text) => {
                info!("'{}' fired on {symbol}", ctx.verb);
                return Ok(text);
            },
            Outcome::Refused(text) => return Ok(text),
            Outcome::Ignored => ignored = true,
        }
    }

    if ignored {
        return Ok(String::new());
    }
    Ok(mismatch.unwrap_or_else(|| fallback.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::RoomRef;
    use crate::{Item, Room};

    struct Fixture {
        world: World,
        hall: Id,
        yard: Id,
    }

    fn fixture() -> Fixture {
        let mut world = World::new("test");
        let hall = world
            .add_room(Room::new("hall", "Hall").with_description("A hall."))
            .expect("hall");
        let yard = world
            .add_room(Room::new("yard", "Yard").with_description("A yard."))
            .expect("yard");
        world.player.location = Some(hall);
        Fixture { world, hall, yard }
    }

    fn add_item(world: &mut World, symbol: &str, behaviors: Vec<Behavior>) -> Id {
        let mut item = Item::new(symbol, symbol).with_aliases(&[symbol]);
        item.behaviors = behaviors;
        world.add_item(item).expect("item")
    }

    #[test]
    fn unconditional_runs_on_matching_verb_only() {
        let mut f = fixture();
        let b = Behavior::unconditional_with_msg(
            "touch",
            vec![Effect::add_exit(RoomRef::Current, "n", f.yard), Effect::say("Click.")],
            "Touch it, maybe?",
        );

        let before = f.world.rooms.clone();
        let wrong = run_behavior(&mut f.world, &b, &UseContext::new("push", "button", None)).expect("run");
        assert_eq!(wrong, Outcome::Refused("Touch it, maybe?".into()));
        assert_eq!(f.world.rooms, before);

        let right = run_behavior(&mut f.world, &b, &UseContext::new("touch", "button", None)).expect("run");
        assert_eq!(right, Outcome::Fired("Click.".into()));
        assert_eq!(f.world.room(f.hall).expect("hall").exit("n"), Some(f.yard));
    }

    #[test]
    fn restricted_needs_every_required_item() {
        let mut f = fixture();
        let helmet = add_item(&mut f.world, "helmet", vec![]);
        let cloak = add_item(&mut f.world, "cloak", vec![]);
        f.world.place_item(helmet, HolderRef::Player).expect("helmet");

        let b = Behavior::restricted(
            "wear",
            vec![Effect::RemoveItem {
                item: helmet,
                from: HolderRef::Player,
            }],
            HolderRef::Player,
            vec![helmet, cloak],
            "You aren't holding everything.",
        );

        let inv_before = f.world.player.inventory.clone();
        let out = run_behavior(&mut f.world, &b, &UseContext::new("wear", "helmet", None)).expect("run");
        assert_eq!(out, Outcome::Refused("You aren't holding everything.".into()));
        assert_eq!(f.world.player.inventory, inv_before);

        let wrong = run_behavior(&mut f.world, &b, &UseContext::new("eat", "helmet", None)).expect("run");
        assert_eq!(wrong, Outcome::Refused(RESTRICTED_WRONG_VERB.into()));
        assert_ne!(RESTRICTED_WRONG_VERB, "You aren't holding everything.");

        f.world.place_item(cloak, HolderRef::Player).expect("cloak");
        let out = run_behavior(&mut f.world, &b, &UseContext::new("wear", "helmet", None)).expect("run");
        assert!(out.is_fired());
        assert!(!f.world.player.inventory.contains(helmet));
    }

    #[test]
    fn restricted_possession_by_symbol_not_by_shape() {
        let mut f = fixture();
        let real = add_item(&mut f.world, "coin", vec![]);
        // same name, same aliases, different symbol
        let twin = f
            .world
            .add_item(Item::new("coin_copy", "coin").with_aliases(&["coin"]))
            .expect("twin");
        f.world.place_item(twin, HolderRef::Player).expect("twin placed");

        let b = Behavior::restricted("pay", vec![Effect::say("Paid.")], HolderRef::Player, vec![real], "No coin.");
        let out = run_behavior(&mut f.world, &b, &UseContext::new("pay", "coin", None)).expect("run");
        assert_eq!(out, Outcome::Refused("No coin.".into()));
    }

    #[test]
    fn choice_routes_by_answer() {
        let mut f = fixture();
        let ruby = add_item(&mut f.world, "ruby", vec![]);
        let lamp = add_item(&mut f.world, "lamp", vec![]);
        let b = Behavior::choice(
            "answer",
            [
                (
                    "ruby",
                    Behavior::unconditional(
                        "answer",
                        vec![
                            Effect::AddItem {
                                item: ruby,
                                to: HolderRef::Player,
                            },
                            Effect::say("A ruby."),
                        ],
                    ),
                ),
                (
                    "lamp",
                    Behavior::unconditional(
                        "answer",
                        vec![
                            Effect::AddItem {
                                item: lamp,
                                to: HolderRef::Player,
                            },
                            Effect::say("A lamp."),
                        ],
                    ),
                ),
            ],
            "The wizard looks unimpressed.",
        );

        let missing = run_behavior(&mut f.world, &b, &UseContext::new("answer", "wizard", None)).expect("run");
        assert_eq!(missing, Outcome::Refused("answer wizard what?".into()));

        let unknown = run_behavior(&mut f.world, &b, &UseContext::new("answer", "wizard", Some("sword"))).expect("run");
        assert_eq!(unknown, Outcome::Refused("The wizard looks unimpressed.".into()));
        assert!(f.world.player.inventory.is_empty());

        let lamp_out = run_behavior(&mut f.world, &b, &UseContext::new("answer", "wizard", Some("lamp"))).expect("run");
        assert_eq!(lamp_out, Outcome::Fired("A lamp.".into()));
        assert!(f.world.player.inventory.contains(lamp));
        assert!(!f.world.player.inventory.contains(ruby));
    }

    #[test]
    fn conditional_answer_is_case_sensitive() {
        let mut f = fixture();
        let b = Behavior::conditional(
            "answer",
            "stone",
            Behavior::unconditional("answer", vec![Effect::say("Truth accepted.")]),
            Behavior::unconditional("answer", vec![Effect::say("You do not speak the truth.")]),
        );

        let ctx = |a: &str| UseContext::new("answer", "olgarth", Some(a));
        assert_eq!(
            run_behavior(&mut f.world, &b, &ctx("stone")).expect("run"),
            Outcome::Fired("Truth accepted.".into())
        );
        for wrong in ["Stone", "STONE", " stone", "stones", "rock"] {
            assert_eq!(
                run_behavior(&mut f.world, &b, &ctx(wrong)).expect("run"),
                Outcome::Fired("You do not speak the truth.".into()),
                "answer {wrong:?} should take the failure branch"
            );
        }
        assert_eq!(
            run_behavior(&mut f.world, &b, &UseContext::new("answer", "olgarth", None)).expect("run"),
            Outcome::Refused("answer olgarth what?".into())
        );
    }

    #[test]
    fn conditional_branches_check_their_own_trigger() {
        let mut f = fixture();
        let b = Behavior::conditional(
            "answer",
            "stone",
            Behavior::unconditional_with_msg("reply", vec![Effect::say("never")], "Wrong word."),
            Behavior::unconditional("answer", vec![Effect::say("no")]),
        );
        let out = run_behavior(&mut f.world, &b, &UseContext::new("answer", "olgarth", Some("stone"))).expect("run");
        assert_eq!(out, Outcome::Refused("Wrong word.".into()));
    }

    #[test]
    fn location_restricted_is_silent_elsewhere() {
        let mut f = fixture();
        let b = Behavior::location_restricted(
            f.yard,
            Behavior::unconditional("cast", vec![Effect::say("A bridge appears.")]),
        );
        let ctx = UseContext::new("cast", "spell", None);
        assert_eq!(run_behavior(&mut f.world, &b, &ctx).expect("run"), Outcome::Ignored);

        f.world.player.location = Some(f.yard);
        assert_eq!(
            run_behavior(&mut f.world, &b, &ctx).expect("run"),
            Outcome::Fired("A bridge appears.".into())
        );
    }

    #[test]
    fn use_item_runs_first_matching_behavior_only() {
        let mut f = fixture();
        let wizard = add_item(
            &mut f.world,
            "wizard",
            vec![
                Behavior::unconditional("talk", vec![Effect::say("Hello.")]),
                Behavior::unconditional("answer", vec![Effect::say("First.")]),
                Behavior::unconditional("answer", vec![Effect::say("Second.")]),
            ],
        );
        let out = use_item(&mut f.world, wizard, &UseContext::new("answer", "wizard", None), "fallback").expect("use");
        assert_eq!(out, "First.");
        let out = use_item(&mut f.world, wizard, &UseContext::new("talk", "wizard", None), "fallback").expect("use");
        assert_eq!(out, "Hello.");
    }

    #[test]
    fn use_item_reports_first_mismatch_or_fallback() {
        let mut f = fixture();
        let box_id = add_item(
            &mut f.world,
            "box",
            vec![Behavior::unconditional_with_msg("open", vec![], "It won't budge.")],
        );
        let rock = add_item(&mut f.world, "rock", vec![]);
        let ctx = UseContext::new("eat", "box", None);
        assert_eq!(use_item(&mut f.world, box_id, &ctx, "fallback").expect("use"), "It won't budge.");
        assert_eq!(use_item(&mut f.world, rock, &ctx, "fallback").expect("use"), "fallback");
    }

    #[test]
    fn use_item_is_empty_when_only_location_restricted_matched() {
        let mut f = fixture();
        let spell = add_item(
            &mut f.world,
            "spell",
            vec![Behavior::location_restricted(
                f.yard,
                Behavior::unconditional("cast", vec![Effect::say("Whoosh.")]),
            )],
        );
        let out = use_item(&mut f.world, spell, &UseContext::new("cast", "spell", None), "fallback").expect("use");
        assert_eq!(out, "");
    }

    #[test]
    fn use_item_lets_effects_rewrite_the_same_item() {
        let mut f = fixture();
        let lever_id = crate::idgen::item_id("lever");
        let lever = add_item(
            &mut f.world,
            "lever",
            vec![Behavior::unconditional(
                "pull",
                vec![Effect::replace_behaviors(
                    lever_id,
                    Behavior::unconditional("pull", vec![Effect::say("It's stuck now.")]),
                    "Clunk.",
                )],
            )],
        );
        let ctx = UseContext::new("pull", "lever", None);
        assert_eq!(use_item(&mut f.world, lever, &ctx, "fallback").expect("use"), "Clunk.");
        assert_eq!(use_item(&mut f.world, lever, &ctx, "fallback").expect("use"), "It's stuck now.");
    }

    #[test]
    fn context_from_tokens_needs_verb_and_alias() {
        let tokens: Vec<String> = ["answer", "olgarth", "stone", "extra"].iter().map(|s| s.to_string()).collect();
        let ctx = UseContext::from_tokens(&tokens).expect("ctx");
        assert_eq!(ctx, UseContext::new("answer", "olgarth", Some("stone")));
        assert!(UseContext::from_tokens(&tokens[..1]).is_none());
    }
}
