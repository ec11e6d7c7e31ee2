#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Delve **
//! Action-resolution core for small text adventures: rooms and the items they
//! hold, a participant who moves between them, and puzzle behaviors that can
//! rewrite each other while the game is running.
//!
//! Scenarios build a [`World`], hand it to an [`Engine`], then feed it one line
//! of player input at a time through [`Engine::resolve`].

pub const DELVE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stable identifier for rooms and items.
pub type Id = uuid::Uuid;

// Core modules
pub mod behavior;
pub mod command;
pub mod config;
pub mod demo;
pub mod effect;
pub mod engine;
pub mod error;
pub mod holder;
pub mod idgen;
pub mod input;
pub mod item;
pub mod player;
pub mod room;
pub mod style;
pub mod validate;
pub mod world;

// Re-exports for convenience
pub use behavior::{Behavior, Outcome, UseContext};
pub use config::EngineConfig;
pub use effect::Effect;
pub use engine::Engine;
pub use error::{ConfigError, EngineError, WorldError};
pub use holder::Holder;
pub use item::Item;
pub use player::Player;
pub use room::Room;
pub use world::{HolderRef, RoomRef, World};
