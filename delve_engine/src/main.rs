#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Delve **
//! Turn-based dungeon crawl / engine project

use delve_engine::data_paths::data_path;
use delve_engine::repl::TerminalInput;
use delve_engine::terminal::TerminalOutput;
use delve_engine::{DELVE_VERSION, Output, SeededDice, SessionEnd, TextStyle, load_config, load_world, run_session};

use anyhow::{Context, Result};
use log::info;

fn main() -> Result<()> {
    env_logger::init();
    let config = load_config(&data_path("delve.toml"));

    info!("Start: loading delve world...");
    let world_path = data_path(&config.world_file);
    let mut world = load_world(&world_path).with_context(|| format!("while loading world from '{}'", world_path.display()))?;
    info!("World '{}' loaded successfully.", world.title);

    let mut dice = match config.seed {
        Some(seed) => {
            info!("combat dice seeded with {seed}");
            SeededDice::from_seed(seed)
        },
        None => SeededDice::from_entropy(),
    };
    let mut out = TerminalOutput::new(config.color, config.wrap_width);
    let mut input = TerminalInput::new();

    out.clear();
    out.print(&format!("{} (delve v{DELVE_VERSION})", world.title.to_uppercase()), TextStyle::Title);
    if !world.intro.is_empty() {
        out.print(&world.intro, TextStyle::Description);
    }

    match run_session(&mut world, &mut dice, &config, &mut input, &mut out)? {
        SessionEnd::Quit => info!("session ended by player"),
        SessionEnd::GaveUp => info!("session ended after player death"),
    }
    Ok(())
}
