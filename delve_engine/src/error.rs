//! Error types for world construction, configuration loading, and engine startup.
//!
//! Nothing in here is ever shown to the player. Failures that come from
//! player input are narrated as plain text by the engine; these errors mark
//! mistakes in scenario data and surface before the first command is played.

use std::path::PathBuf;

use crate::Id;

/// Problems found while building or validating a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// Two rooms or two items were registered under the same symbol.
    #[error("duplicate symbol \"{0}\"")]
    DuplicateSymbol(String),

    /// An item id was referenced that is not registered in the world.
    #[error("unknown item id {0}")]
    UnknownItem(Id),

    /// A room id was referenced that is not registered in the world.
    #[error("unknown room id {0}")]
    UnknownRoom(Id),

    /// The world has no rooms to start in.
    #[error("world has no rooms")]
    NoRooms,

    /// The configured start index does not point at a room.
    #[error("start index {index} out of range ({count} rooms)")]
    StartIndex { index: usize, count: usize },

    /// A holder handle was used where it cannot be resolved (e.g. adding to the current room before play).
    #[error("holder {0} cannot be used here")]
    InvalidHolder(String),

    /// A behavior or effect refers to something that does not exist.
    #[error("{context}: {source}")]
    Dangling {
        context: String,
        #[source]
        source: Box<WorldError>,
    },
}

/// Problems loading an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The verb list maps more words than there are built-in handlers.
    #[error("too many verbs: {0} given, at most {max} allowed", max = crate::command::BuiltinVerb::ALL.len())]
    TooManyVerbs(usize),
}

/// Anything that stops an [`Engine`](crate::Engine) from being built.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
