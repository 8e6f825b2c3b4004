//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop over an [`Input`] and an
//! [`Output`]. This module drives the loop and the turn driver; its
//! submodules implement the handlers for each family of commands.

pub mod combat;
mod input;
pub mod inventory;
pub mod item;
pub mod look;
pub mod movement;
pub mod system;

pub use combat::*;
pub use input::TerminalInput;
pub use inventory::*;
pub use item::*;
pub use look::*;
pub use movement::*;
pub use system::*;

use anyhow::Result;
use log::{debug, info};

use crate::command::{Command, parse_command};
use crate::config::EngineConfig;
use crate::dice::Dice;
use crate::encounter;
use crate::io::{Input, InputEvent, Output, TextStyle};
use crate::spinners::SpinnerType;
use crate::turn;
use crate::world::World;

/// Control flow signal used by handlers to exit the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    /// The player died and chose not to rise again.
    GaveUp,
}

/// Run the main read–eval–print loop until the player quits or gives up.
///
/// Handles prompting, command parsing, dispatching to the handler modules,
/// and advancing world time after commands that take it.
///
/// # Errors
/// - Propagates input failures and broken world invariants (a player with
///   no location, a dangling character id).
pub fn run_session(
    world: &mut World,
    dice: &mut dyn Dice,
    config: &EngineConfig,
    input: &mut dyn Input,
    out: &mut dyn Output,
) -> Result<SessionEnd> {
    #[allow(clippy::enum_glob_use)]
    use Command::*;

    look_handler(world, out)?;
    loop {
        if !world.player()?.is_alive() {
            if let ReplControl::Quit = death_handler(world, input, out)? {
                info!("player gave up at tick {}", world.tick_count);
                return Ok(SessionEnd::GaveUp);
            }
            continue;
        }

        let line = match input.query_line(&prompt(world)?)? {
            InputEvent::Line(line) => line,
            InputEvent::Eof => {
                info!("input closed; ending session");
                return Ok(SessionEnd::Quit);
            },
            InputEvent::Interrupted => {
                out.print("Command canceled.", TextStyle::System);
                continue;
            },
        };

        let command = parse_command(&line);
        debug!("parsed {line:?} as {command:?}");
        let acted = match &command {
            Attack(who) => attack_handler(world, out, who)?,
            Drop(thing) => drop_handler(world, out, thing)?,
            Equip { item, slot } => equip_handler(world, out, item, slot.as_deref())?,
            Help => {
                help_handler(out);
                false
            },
            Ingest { how, item } => ingest_handler(world, out, *how, item)?,
            Inventory => {
                inv_handler(world, out)?;
                false
            },
            Look => {
                look_handler(world, out)?;
                false
            },
            LookAt(thing) => {
                look_at_handler(world, out, thing)?;
                false
            },
            MoveTo(direction) => move_to_handler(world, out, *direction)?,
            BadDirection(word) => {
                bad_direction_handler(out, word);
                false
            },
            Perform(word) => perform_handler(world, out, word)?,
            Quit => {
                if let ReplControl::Quit = quit_handler(world, input, out)? {
                    return Ok(SessionEnd::Quit);
                }
                false
            },
            Read(thing) => {
                read_handler(world, out, thing)?;
                false
            },
            Status => {
                status_handler(world, out)?;
                false
            },
            Take(thing) => take_handler(world, out, thing)?,
            Unequip(thing) => unequip_handler(world, out, thing)?,
            Unknown => {
                unknown_handler(world, out);
                false
            },
            Wait => wait_handler(out),
            Wear(thing) => wear_handler(world, out, thing)?,
        };

        if acted && (command.advances_time() || command.is_perform()) {
            run_ticks(world, dice, config.ticks_per_command, out)?;
        }
    }
}

/// Advance the world `ticks` times, stopping early if the player dies.
///
/// # Errors
/// Propagates turn driver failures.
pub fn run_ticks(world: &mut World, dice: &mut dyn Dice, ticks: u32, out: &mut dyn Output) -> Result<()> {
    for _ in 0..ticks {
        turn::advance(world, dice, out)?;
        if !world.player()?.is_alive() {
            info!("player died at tick {}", world.tick_count);
            break;
        }
    }
    Ok(())
}

/// Offer a dead player the choice to rise again at their respawn point.
///
/// # Errors
/// Propagates input failures and respawn failures.
pub fn death_handler(world: &mut World, input: &mut dyn Input, out: &mut dyn Output) -> Result<ReplControl> {
    out.print("You have died.", TextStyle::Danger);
    match input.query_choice("What now?", &["Rise again", "Give up"], Some(0))? {
        Some(0) => {
            let player = world.player.clone();
            encounter::respawn(world, &player, out)?;
            out.print("You rise again.", TextStyle::Success);
            look_handler(world, out)?;
            Ok(ReplControl::Continue)
        },
        _ => {
            out.print("Your adventure ends here.", TextStyle::Danger);
            Ok(ReplControl::Quit)
        },
    }
}

fn prompt(world: &World) -> Result<String> {
    let hp = world.player()?.vitals.hp;
    Ok(format!("\n[Tick {}|HP {}/{:.0}]> ", world.tick_count, hp.display(), hp.max()))
}

/// Feedback to player if an entity search comes up empty
pub fn entity_not_found(world: &World, out: &mut dyn Output, search_text: &str) {
    out.print(
        &format!(
            "\"{search_text}\"? {}",
            world.spin(SpinnerType::EntityNotFound, "What's that?")
        ),
        TextStyle::Error,
    );
}
