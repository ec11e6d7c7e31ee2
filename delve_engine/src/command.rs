//! Command module
//!
//! Turns a raw input line into a [`Command`]. Parsing is strictly ordered:
//! 1. an exact movement token is a move,
//! 2. otherwise the line is lowercased and split on whitespace; a leading
//!    "use" word makes it a use command,
//! 3. otherwise the first word is looked up among the built-in verbs.
use std::collections::HashMap;

use variantly::Variantly;

use crate::behavior::UseContext;
use crate::config::EngineConfig;
use crate::error::ConfigError;

/// The engine's built-in, non-puzzle verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinVerb {
    Look,
    Inventory,
    Take,
    Drop,
    Examine,
    Quit,
}

impl BuiltinVerb {
    /// Positional order used when mapping configured verb words.
    pub const ALL: [BuiltinVerb; 6] = [
        BuiltinVerb::Look,
        BuiltinVerb::Inventory,
        BuiltinVerb::Take,
        BuiltinVerb::Drop,
        BuiltinVerb::Examine,
        BuiltinVerb::Quit,
    ];
}

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Command {
    /// Nothing but whitespace.
    Empty,
    /// A movement token, exactly as typed.
    MoveTo(String),
    /// A use verb with an object, and possibly an answer.
    UseItem(UseContext),
    /// A use verb with nothing to use it on.
    UseWhat(String),
    Builtin { verb: BuiltinVerb, object: Option<String> },
    /// Anything else, exactly as typed.
    Unknown(String),
}

/// The word lists the parser matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    legal_moves: Vec<String>,
    verbs: HashMap<String, BuiltinVerb>,
    use_aliases: Vec<String>,
}

impl Vocabulary {
    /// Build from config, zipping the verb words onto [`BuiltinVerb::ALL`].
    ///
    /// # Errors
    /// - if more verb words are configured than there are built-in verbs
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        if config.verbs.len() > BuiltinVerb::ALL.len() {
            return Err(ConfigError::TooManyVerbs(config.verbs.len()));
        }
        let verbs = config
            .verbs
            .iter()
            .zip(BuiltinVerb::ALL)
            .map(|(word, verb)| (word.to_lowercase(), verb))
            .collect();
        Ok(Self {
            legal_moves: config.legal_moves.clone(),
            verbs,
            use_aliases: config.use_aliases.words().into_iter().map(|w| w.to_lowercase()).collect(),
        })
    }

    pub fn add_use_alias(&mut self, alias: &str) {
        self.use_aliases.push(alias.to_string());
    }

    pub fn is_move(&self, input: &str) -> bool {
        self.legal_moves.iter().any(|m| m == input)
    }

    /// Parses an input line into a `Command`.
    pub fn parse(&self, input: &str) -> Command {
        if self.is_move(input) {
            return Command::MoveTo(input.to_string());
        }

        let tokens: Vec<String> = input.to_lowercase().split_whitespace().map(str::to_string).collect();
        let Some(first) = tokens.first() else {
            return Command::Empty;
        };

        if self.use_aliases.iter().any(|alias| alias == first) {
            return UseContext::from_tokens(&tokens).map_or_else(|| Command::UseWhat(first.clone()), Command::UseItem);
        }

        match self.verbs.get(first) {
            Some(verb) => Command::Builtin {
                verb: *verb,
                object: tokens.get(1).cloned(),
            },
            None => Command::Unknown(input.to_string()),
        }
    }
}
