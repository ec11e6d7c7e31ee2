//! The dispatcher: one line of player input in, narration out.
//!
//! An [`Engine`] owns the [`World`] once play starts. Each call to
//! [`Engine::resolve`] parses the line, runs whatever effects or behaviors it
//! selects to completion, and returns the text to show. Nothing a player types
//! makes `resolve` fail; problems are narrated as plain replies.

use anyhow::Result;
use log::{debug, error, info, warn};

use crate::behavior::{UseContext, use_item};
use crate::command::{BuiltinVerb, Command, Vocabulary};
use crate::config::EngineConfig;
use crate::effect::dispatch_effect;
use crate::error::{EngineError, WorldError};
use crate::validate::validate_world;
use crate::world::{HolderRef, World};
use crate::Effect;

#[derive(Debug, Clone)]
pub struct Engine {
    world: World,
    config: EngineConfig,
    vocabulary: Vocabulary,
}

impl Engine {
    /// Take ownership of a built world and get it ready for play.
    ///
    /// The player is placed in the room at `config.start_index` (rooms are
    /// indexed in the order they were added), and every id referenced by
    /// behaviors and effects is checked.
    ///
    /// # Errors
    /// - if the config maps more verbs than there are built-ins
    /// - if the world has no rooms, or the start index is out of range
    /// - if any behavior, effect, exit or holder refers to an unregistered id
    pub fn new(mut world: World, config: EngineConfig) -> Result<Engine, EngineError> {
        let vocabulary = Vocabulary::from_config(&config)?;

        if world.room_order.is_empty() {
            return Err(WorldError::NoRooms.into());
        }
        let start = *world
            .room_order
            .get(config.start_index)
            .ok_or(WorldError::StartIndex {
                index: config.start_index,
                count: world.room_order.len(),
            })?;
        world.player.location = Some(start);

        if let Some(first) = validate_world(&world).into_iter().next() {
            return Err(first.into());
        }

        if let Some(message) = &config.messages.game_over {
            world.game_over_message.clone_from(message);
        }

        info!(
            "engine ready: world \"{}\" with {} rooms and {} items; starting in {}",
            world.name,
            world.rooms.len(),
            world.items.len(),
            world.room(start)?.symbol
        );
        Ok(Engine {
            world,
            config,
            vocabulary,
        })
    }

    /// Resolve one line of input against the world and return the reply.
    pub fn resolve(&mut self, input: &str) -> String {
        if !self.world.active {
            warn!("input after the game ended: \"{input}\"");
            return self.world.game_over_message.clone();
        }
        self.world.turn_count += 1;

        let command = self.vocabulary.parse(input);
        debug!("turn {}: \"{input}\" -> {command:?}", self.world.turn_count);

        match self.execute(&command, input) {
            Ok(reply) => reply,
            Err(e) => {
                error!("turn {}: \"{input}\" failed: {e:#}", self.world.turn_count);
                self.config.messages.use_failed.clone()
            },
        }
    }

    fn execute(&mut self, command: &Command, input: &str) -> Result<String> {
        let messages = &self.config.messages;
        match command {
            Command::Empty => Ok(messages.empty_input.clone()),
            Command::MoveTo(direction) => dispatch_effect(
                &mut self.world,
                &Effect::move_player(direction, &messages.cannot_go),
            ),
            Command::UseItem(ctx) => self.use_reachable(ctx),
            Command::UseWhat(verb) => Ok(format!("{verb} what?")),
            Command::Builtin { verb, object } => self.run_builtin(*verb, object.as_deref()),
            Command::Unknown(raw) => {
                info!("unrecognised command \"{raw}\"");
                Ok(format!("{} {input}.", messages.unknown_verb))
            },
        }
    }

    fn use_reachable(&mut self, ctx: &UseContext) -> Result<String> {
        let fallback = &self.config.messages.use_failed;
        let Some(item_id) = self.world.find_reachable(&ctx.alias).map(|item| item.id) else {
            info!("'{}': nothing here answers to \"{}\"", ctx.verb, ctx.alias);
            return Ok(fallback.clone());
        };
        use_item(&mut self.world, item_id, ctx, fallback)
    }

    fn run_builtin(&mut self, verb: BuiltinVerb, object: Option<&str>) -> Result<String> {
        let messages = &self.config.messages;
        let effect = match (verb, object) {
            (BuiltinVerb::Look, _) => Effect::DescribeRoom,
            (BuiltinVerb::Inventory, _) => Effect::ListInventory,
            (BuiltinVerb::Quit, _) => Effect::end_game(&messages.quit),
            (BuiltinVerb::Take, Some(alias)) => Effect::transfer(alias, HolderRef::CurrentRoom, HolderRef::Player),
            (BuiltinVerb::Drop, Some(alias)) => Effect::transfer(alias, HolderRef::Player, HolderRef::CurrentRoom),
            (BuiltinVerb::Examine, Some(alias)) => Effect::Examine {
                alias: alias.to_string(),
            },
            (BuiltinVerb::Take, None) => return Ok(messages.take_what.clone()),
            (BuiltinVerb::Drop, None) => return Ok(messages.drop_what.clone()),
            (BuiltinVerb::Examine, None) => return Ok(messages.examine_what.clone()),
        };
        dispatch_effect(&mut self.world, &effect)
    }

    /// False once the game has ended, by quitting or otherwise.
    pub fn active(&self) -> bool {
        self.world.active
    }

    /// Describe the player's current room, marking it visited.
    ///
    /// # Errors
    /// - if the player's room has gone missing from the world
    pub fn describe_current_room(&mut self) -> Result<String, WorldError> {
        let id = self.world.current_room_id()?;
        self.world.describe_room(id)
    }

    /// Accept another word as a "use"-class verb from now on.
    pub fn add_use_alias(&mut self, alias: &str) {
        info!("use alias \"{alias}\" added");
        self.vocabulary.add_use_alias(&alias.to_lowercase());
    }

    pub fn opening(&self) -> &str {
        &self.world.opening
    }

    pub fn game_over_message(&self) -> &str {
        &self.world.game_over_message
    }

    pub fn set_game_over_message(&mut self, message: &str) {
        self.world.game_over_message = message.to_string();
    }

    pub fn turn_count(&self) -> usize {
        self.world.turn_count
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for scenario scripting between turns.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
