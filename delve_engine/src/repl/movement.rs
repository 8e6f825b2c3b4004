//! `repl::movement` module
//!
//! Contains repl loop handlers for commands that change player location

use anyhow::Result;
use log::info;

use crate::encounter::relocate;
use crate::io::{Output, TextStyle};
use crate::location::Direction;
use crate::repl::look_handler;
use crate::spinners::SpinnerType;
use crate::world::World;

/// Move the player to a neighboring location. Returns true if the player moved.
///
/// Arrival runs the encounter protocol, so anyone hostile waiting there may
/// turn on the player before the first tick.
///
/// # Errors
/// Returns an error if the player's location or the destination cannot be resolved.
pub fn move_to_handler(world: &mut World, out: &mut dyn Output, direction: Direction) -> Result<bool> {
    let Some(destination) = world.player_location()?.neighbor(direction).cloned() else {
        out.print("You can't go that way.", TextStyle::Denied);
        return Ok(false);
    };

    let travel_message = world.spin(SpinnerType::Movement, "You head that way...");
    out.print(&travel_message, TextStyle::System);
    let player = world.player.clone();
    relocate(world, &player, &destination, out)?;
    info!("player went {direction} to {destination}");
    look_handler(world, out)?;
    Ok(true)
}

/// Feedback for a movement command naming no known direction.
pub fn bad_direction_handler(out: &mut dyn Output, word: &str) {
    out.print(&format!("Which way is {word}?"), TextStyle::Denied);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use crate::encounter::EncounterPolicy;
    use crate::idgen::{CharacterId, LocationId};
    use crate::io::RecordingOutput;
    use crate::location::PendingLocation;
    use crate::world::WorldBuilder;

    fn world() -> World {
        let mut wolf = Character::new("wolf", "Wolf");
        wolf.encounter = EncounterPolicy {
            hostile_to_players: true,
            hook: None,
        };
        let mut builder = WorldBuilder::new("Test");
        builder
            .add_location(PendingLocation::new("camp", "Camp").exit(Direction::North, "woods"))
            .add_location(PendingLocation::new("woods", "Woods").exit(Direction::South, "camp"))
            .add_character(Character::new("hero", "Hero"), "camp")
            .add_character(wolf, "woods")
            .player("hero");
        builder.build().unwrap()
    }

    #[test]
    fn walking_into_a_hostile_triggers_an_encounter() {
        let mut world = world();
        let mut out = RecordingOutput::new();
        assert!(move_to_handler(&mut world, &mut out, Direction::North).unwrap());
        assert_eq!(world.player_location().unwrap().id, LocationId::new("woods"));
        let wolf = world.character(&CharacterId::new("wolf")).unwrap();
        assert_eq!(wolf.attack_target, Some(CharacterId::new("hero")));
        assert!(out.contains("Wolf turns on you!"));
        assert!(out.contains("Woods"));
    }

    #[test]
    fn missing_exit_is_refused() {
        let mut world = world();
        let mut out = RecordingOutput::new();
        assert!(!move_to_handler(&mut world, &mut out, Direction::Up).unwrap());
        assert_eq!(out.styled(TextStyle::Denied), ["You can't go that way."]);
        assert_eq!(world.player_location().unwrap().id, LocationId::new("camp"));
    }
}
