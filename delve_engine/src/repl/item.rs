//! `repl::item` module
//!
//! Drinking, eating and using carried items.

use anyhow::Result;
use log::info;

use crate::io::{Output, TextStyle};
use crate::item::Ingest;
use crate::repl::entity_not_found;
use crate::spinners::SpinnerType;
use crate::world::World;

/// Apply an item's effect to the player. Drinking and eating use up one unit.
///
/// An item without the matching behavior narrates a refusal and changes nothing.
///
/// # Errors
/// Returns an error if the player character is missing.
pub fn ingest_handler(world: &mut World, out: &mut dyn Output, how: Ingest, thing: &str) -> Result<bool> {
    let Some(item) = world.player()?.inventory.find(thing) else {
        entity_not_found(world, out, thing);
        return Ok(false);
    };
    let name = item.name.clone();
    let Some(effect) = how.effect_of(item).cloned() else {
        out.print(&format!("You can't {} the {name}.", how.verb()), TextStyle::Denied);
        return Ok(false);
    };

    let player = world.player_mut()?;
    player.apply_effect(&effect);
    if how.consumes() {
        player.remove_item(&name, 1);
    }
    info!("player used '{}' on {name}: {effect:?}", how.verb());

    let message = match &effect.message {
        Some(message) => message.clone(),
        None if effect.recover.is_zero() && effect.drunk == 0.0 && effect.invisible == 0 => {
            world.spin(SpinnerType::NoEffect, "Nothing seems to happen.")
        },
        None => format!("You {} the {name}.", how.verb()),
    };
    out.print(&message, TextStyle::Success);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use crate::io::RecordingOutput;
    use crate::item::{Item, ItemEffect};
    use crate::location::PendingLocation;
    use crate::vitals::{Recovery, Vitals};
    use crate::world::WorldBuilder;

    fn world() -> World {
        let mut ale = Item::stack("ale", "", 2);
        ale.on_drink = Some(ItemEffect {
            recover: Recovery::new(5.0, 0.0, 0.0),
            drunk: 3.0,
            invisible: 0,
            message: Some("Hoppy.".into()),
        });
        let mut hero = Character::new("hero", "Hero").with_vitals(Vitals::new(20.0, 0.0, 0.0));
        hero.vitals.hp.set(10.0);
        hero.inventory.add(ale);
        hero.inventory.add(Item::new("rock", ""));
        let mut builder = WorldBuilder::new("Test");
        builder
            .add_location(PendingLocation::new("inn", "Inn"))
            .add_character(hero, "inn")
            .player("hero");
        builder.build().unwrap()
    }

    #[test]
    fn drinking_applies_the_effect_and_uses_one_unit() {
        let mut world = world();
        let mut out = RecordingOutput::new();
        assert!(ingest_handler(&mut world, &mut out, Ingest::Drink, "ale").unwrap());
        let player = world.player().unwrap();
        assert_eq!(player.vitals.hp.display(), 15);
        assert_eq!(player.drunk, 3.0);
        assert_eq!(player.inventory.get("ale").unwrap().quantity(), 1);
        assert!(out.contains("Hoppy."));
    }

    #[test]
    fn items_without_the_behavior_are_refused() {
        let mut world = world();
        let mut out = RecordingOutput::new();
        assert!(!ingest_handler(&mut world, &mut out, Ingest::Eat, "rock").unwrap());
        assert!(out.contains("You can't eat the rock."));
        assert!(world.player().unwrap().inventory.contains("rock"));
    }
}
