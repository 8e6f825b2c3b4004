//! `repl::system` module
//!
//! Contains repl loop handlers for quitting, help, waiting and the player's
//! personal action table.

use anyhow::Result;
use log::{info, warn};

use crate::action::Action;
use crate::encounter::relocate;
use crate::io::{Input, Output, TextStyle};
use crate::repl::{ReplControl, look_handler};
use crate::spinners::SpinnerType;
use crate::world::World;

const HELP: &[(&str, &str)] = &[
    ("look / l", "describe your surroundings"),
    ("look at <thing> / x <thing>", "examine something or someone"),
    ("go <direction> / n, s, e, w, ne, nw, se, sw, u, d", "move"),
    ("take <item> / drop <item>", "pick up or put down"),
    ("inventory / i", "list what you carry"),
    ("equip <item> [as <slot>] / unequip <slot or item>", "ready or put away a weapon"),
    ("wear <item>", "put on armor"),
    ("attack <someone>", "start a fight"),
    ("drink / eat / use / read <item>", "make use of an item"),
    ("wait / z", "let time pass"),
    ("status", "check your condition"),
    ("quit", "leave the game"),
];

/// Ask for confirmation, then quit.
///
/// # Errors
/// Propagates input failures.
pub fn quit_handler(world: &World, input: &mut dyn Input, out: &mut dyn Output) -> Result<ReplControl> {
    match input.query_key("Really quit? (y/n) ", Some(&['y', 'n']))? {
        Some('n') => {
            out.print("Carry on, then.", TextStyle::System);
            Ok(ReplControl::Continue)
        },
        _ => {
            if let Ok(player) = world.player() {
                info!("{} quit at tick {}", player.name, world.tick_count);
                info!("ending inventory:");
                player.inventory.iter().for_each(|item| info!("- {item}"));
            }
            out.print(&world.spin(SpinnerType::QuitMsg, "Farewell."), TextStyle::System);
            Ok(ReplControl::Quit)
        },
    }
}

/// List the available commands.
pub fn help_handler(out: &mut dyn Output) {
    out.print("Commands:", TextStyle::Title);
    for (command, purpose) in HELP {
        out.print(&format!("  {command:<52} {purpose}"), TextStyle::System);
    }
}

/// Feedback for input that no handler understood.
pub fn unknown_handler(world: &World, out: &mut dyn Output) {
    out.print(
        &world.spin(SpinnerType::UnrecognizedCommand, "Didn't quite catch that?"),
        TextStyle::Error,
    );
}

/// Let a turn go by.
pub fn wait_handler(out: &mut dyn Output) -> bool {
    out.print("Time passes.", TextStyle::System);
    true
}

/// Perform an entry from the player's action table. Returns true if the
/// action takes time.
///
/// # Errors
/// Returns an error if the player cannot be resolved or relocation fails.
pub fn perform_handler(world: &mut World, out: &mut dyn Output, word: &str) -> Result<bool> {
    let Some(action) = world.player()?.action(word).cloned() else {
        unknown_handler(world, out);
        return Ok(false);
    };
    info!("player performs '{word}': {action:?}");

    match &action {
        Action::Emote { text } => out.print(text, TextStyle::Plain),
        Action::Recover { amount, text } => {
            world.player_mut()?.recover(*amount);
            out.print(text.as_deref().unwrap_or("You feel better."), TextStyle::Success);
        },
        Action::Warp { to, text } => {
            if world.location(to).is_err() {
                warn!("action '{word}' warps to unknown location '{to}'");
                out.print(&world.spin(SpinnerType::NoEffect, "Nothing happens."), TextStyle::Denied);
                return Ok(false);
            }
            out.print(text.as_deref().unwrap_or("The world lurches around you."), TextStyle::System);
            let player = world.player.clone();
            relocate(world, &player, to, out)?;
            look_handler(world, out)?;
        },
    }
    Ok(action.takes_time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use crate::idgen::LocationId;
    use crate::io::{RecordingOutput, ScriptedInput};
    use crate::location::PendingLocation;
    use crate::vitals::Recovery;
    use crate::world::WorldBuilder;

    fn world() -> World {
        let mut hero = Character::new("hero", "Hero");
        hero.add_action("dance", Action::Emote { text: "You dance a jig.".into() });
        hero.add_action(
            "pray",
            Action::Recover {
                amount: Recovery::new(1.0, 0.0, 0.0),
                text: None,
            },
        );
        hero.add_action(
            "blink",
            Action::Warp {
                to: LocationId::new("tower"),
                text: Some("Pop!".into()),
            },
        );
        let mut builder = WorldBuilder::new("Test");
        builder
            .add_location(PendingLocation::new("field", "Field"))
            .add_location(PendingLocation::new("tower", "Tower"))
            .add_character(hero, "field")
            .player("hero");
        builder.build().unwrap()
    }

    #[test]
    fn quitting_needs_confirmation() {
        let world = world();
        let mut out = RecordingOutput::new();
        let mut input = ScriptedInput::new(["n", "y"]);
        assert_eq!(quit_handler(&world, &mut input, &mut out).unwrap(), ReplControl::Continue);
        assert_eq!(quit_handler(&world, &mut input, &mut out).unwrap(), ReplControl::Quit);
    }

    #[test]
    fn actions_run_from_the_table() {
        let mut world = world();
        let mut out = RecordingOutput::new();
        assert!(!perform_handler(&mut world, &mut out, "dance").unwrap());
        assert!(out.contains("You dance a jig."));
        assert!(perform_handler(&mut world, &mut out, "pray").unwrap());
        assert!(perform_handler(&mut world, &mut out, "blink").unwrap());
        assert_eq!(world.player_location().unwrap().id, LocationId::new("tower"));
        assert!(out.contains("Pop!"));
        assert!(!perform_handler(&mut world, &mut out, "fly").unwrap());
        assert_eq!(out.styled(TextStyle::Error).len(), 1);
    }
}
