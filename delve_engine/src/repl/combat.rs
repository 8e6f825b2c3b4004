//! `repl::combat` module
//!
//! Declaring an attack only records intent. The blows themselves land when
//! the turn driver runs after the command.

use anyhow::Result;
use log::info;

use crate::entity_search::find_character;
use crate::io::{Output, TextStyle};
use crate::repl::entity_not_found;
use crate::world::World;

/// Make a character nearby the player's attack target.
///
/// # Errors
/// Returns an error if the player or their location cannot be resolved.
pub fn attack_handler(world: &mut World, out: &mut dyn Output, who: &str) -> Result<bool> {
    let here = world.player_location()?.id.clone();
    let Ok(target) = find_character(world, who, &here) else {
        entity_not_found(world, out, who);
        return Ok(false);
    };
    let name = world.character(&target)?.name.clone();

    let player = world.player_mut()?;
    player.add_enemy(target.clone());
    player.attack_target = Some(target.clone());
    info!("player attacks {target}");
    out.print(&format!("You attack {name}!"), TextStyle::Combat);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use crate::idgen::CharacterId;
    use crate::io::RecordingOutput;
    use crate::location::PendingLocation;
    use crate::world::WorldBuilder;

    #[test]
    fn attacking_sets_intent_and_enmity() {
        let mut builder = WorldBuilder::new("Test");
        builder
            .add_location(PendingLocation::new("den", "Den"))
            .add_character(Character::new("hero", "Hero"), "den")
            .add_character(Character::new("bear", "Brown Bear"), "den")
            .player("hero");
        let mut world = builder.build().unwrap();
        let mut out = RecordingOutput::new();

        assert!(attack_handler(&mut world, &mut out, "bear").unwrap());
        let bear = CharacterId::new("bear");
        let player = world.player().unwrap();
        assert_eq!(player.attack_target, Some(bear.clone()));
        assert!(player.is_enemy(&bear));
        assert!(out.contains("You attack Brown Bear!"));

        assert!(!attack_handler(&mut world, &mut out, "ghost").unwrap());
    }
}
