#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Delve **
//! Plays the built-in demo scenario in the terminal.
//!
//! Usage: `delve_engine [CONFIG.toml]`. The optional file overrides the
//! demo's input configuration (verbs, movement tokens, stock replies).

use delve_engine::demo::{build_demo, demo_config};
use delve_engine::input::{InputEvent, InputManager};
use delve_engine::style::GameStyle;
use delve_engine::{Engine, EngineConfig};

use anyhow::{Context, Result};
use log::info;
use textwrap::{fill, termwidth};

use std::io::Write;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            EngineConfig::load(&path).with_context(|| format!("while loading config {}", path.display()))?
        },
        None => demo_config(),
    };

    info!("Start: building demo world...");
    let world = build_demo().context("while building the demo world")?;
    let mut engine = Engine::new(world, config).context("while starting the engine")?;
    info!("Demo world ready.");

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush().context("while clearing the screen")?;

    let width = termwidth().min(100);
    println!("{:^width$}\n", engine.world().name.to_uppercase().title_style());
    println!("{}\n", fill(engine.opening(), width).opening_style());
    let first_look = engine.describe_current_room().context("while describing the start room")?;
    println!("{}", fill(&first_look, width).description_style());

    let mut input = InputManager::new();
    while engine.active() {
        let line = match input.read_line(&"\n> ".prompt_style().to_string()) {
            Ok(InputEvent::Line(line)) => line,
            Ok(InputEvent::Eof) => break,
            Ok(InputEvent::Interrupted) => continue,
            Err(err) => {
                println!("{}", format!("Failed to read input: {err}").error_style());
                break;
            },
        };

        let reply = engine.resolve(line.trim_end());
        if !reply.is_empty() {
            println!("{}", fill(&reply, width).narration_style());
        }
    }

    println!("\n{}", engine.game_over_message().game_over_style());
    info!("Game ended after {} turns.", engine.turn_count());
    Ok(())
}
