//! Engine configuration.
//!
//! Everything about how raw input is interpreted lives here: which tokens
//! are movement, which words map onto the built-in verbs, which words count
//! as "use", and the stock replies. Defaults reproduce the classic preset;
//! a TOML file can override any part of it.
//!
//! ```toml
//! start_index = 0
//! legal_moves = ["n", "s", "e", "w"]
//! verbs = ["look", "i", "take", "drop", "x", "quit"]
//! use_aliases = "combat"          # or "minimal", "classic", or ["use", "zap"]
//!
//! [messages]
//! cannot_go = "A wall blocks your way."
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::effect::{DEFAULT_MOVE_ERROR, QUIT_MSG};
use crate::error::ConfigError;

pub const DEFAULT_LEGAL_MOVES: [&str; 6] = ["n", "s", "e", "w", "u", "d"];

/// Default words for the built-in verbs, in [`BuiltinVerb::ALL`](crate::command::BuiltinVerb::ALL) order.
pub const DEFAULT_VERBS: [&str; 6] = ["look", "inv", "get", "drop", "ex", "quit"];

pub const MINIMAL_USE_ALIASES: [&str; 1] = ["use"];

pub const CLASSIC_USE_ALIASES: [&str; 10] = [
    "use", "eat", "open", "close", "hit", "break", "dig", "talk", "throw", "read",
];

/// Extra words added to the classic set by the combat preset.
pub const COMBAT_USE_ALIASES: [&str; 6] = ["shoot", "blast", "fire", "kill", "punch", "explode"];

/// Named sets of "use" words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseAliasPreset {
    Minimal,
    Classic,
    Combat,
}

/// The words treated as "use"-class verbs: a preset or a custom list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UseAliases {
    Preset(UseAliasPreset),
    Custom(Vec<String>),
}

impl Default for UseAliases {
    fn default() -> Self {
        UseAliases::Preset(UseAliasPreset::Classic)
    }
}

impl UseAliases {
    /// Expand into the concrete word list.
    pub fn words(&self) -> Vec<String> {
        let words: Vec<&str> = match self {
            UseAliases::Preset(UseAliasPreset::Minimal) => MINIMAL_USE_ALIASES.to_vec(),
            UseAliases::Preset(UseAliasPreset::Classic) => CLASSIC_USE_ALIASES.to_vec(),
            UseAliases::Preset(UseAliasPreset::Combat) => {
                CLASSIC_USE_ALIASES.iter().chain(COMBAT_USE_ALIASES.iter()).copied().collect()
            },
            UseAliases::Custom(list) => return list.clone(),
        };
        words.into_iter().map(str::to_string).collect()
    }
}

/// Stock replies used by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// A legal movement token with no exit that way.
    pub cannot_go: String,
    /// A "use" command naming nothing the player can reach.
    pub use_failed: String,
    /// Prefix for unrecognised commands; the raw input and a full stop are appended.
    pub unknown_verb: String,
    pub empty_input: String,
    pub take_what: String,
    pub drop_what: String,
    pub examine_what: String,
    pub quit: String,
    /// Replaces the world's own game-over text when set.
    pub game_over: Option<String>,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            cannot_go: DEFAULT_MOVE_ERROR.to_string(),
            use_failed: "You cannot do that.".to_string(),
            unknown_verb: "I don't know how to".to_string(),
            empty_input: "Pardon?".to_string(),
            take_what: "What would you like to pickup?".to_string(),
            drop_what: "What would you like to drop?".to_string(),
            examine_what: "What would you like to examine?".to_string(),
            quit: QUIT_MSG.to_string(),
            game_over: None,
        }
    }
}

/// How the engine reads player input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Index into the world's rooms, in registration order, where the player starts.
    pub start_index: usize,
    /// Input lines that are movement commands, matched exactly and before lowercasing.
    pub legal_moves: Vec<String>,
    /// Words for look, inventory, take, drop, examine and quit, in that order.
    /// A shorter list leaves the remaining built-ins unmapped.
    pub verbs: Vec<String>,
    pub use_aliases: UseAliases,
    pub messages: Messages,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_index: 0,
            legal_moves: DEFAULT_LEGAL_MOVES.iter().map(|s| (*s).to_string()).collect(),
            verbs: DEFAULT_VERBS.iter().map(|s| (*s).to_string()).collect(),
            use_aliases: UseAliases::default(),
            messages: Messages::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    /// - if the text is not valid TOML for this structure
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML file.
    ///
    /// # Errors
    /// - if the file can't be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("engine config loaded from {}", path.display());
        Ok(config)
    }

    #[must_use]
    pub fn with_use_aliases(mut self, aliases: UseAliases) -> Self {
        self.use_aliases = aliases;
        self
    }

    #[must_use]
    pub fn with_legal_moves(mut self, moves: &[&str]) -> Self {
        self.legal_moves = moves.iter().map(|s| (*s).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_verbs(mut self, verbs: &[&str]) -> Self {
        self.verbs = verbs.iter().map(|s| (*s).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_start_index(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }
}
