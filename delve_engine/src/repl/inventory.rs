//! `repl::inventory` module
//!
//! Handlers that move items between the ground and the player's pack, and
//! that manage what the player wields and wears. Each returns true when the
//! player actually did something, which is what makes time pass.

use anyhow::Result;
use log::info;

use crate::character::PRIMARY_SLOT;
use crate::io::{Output, TextStyle};
use crate::repl::entity_not_found;
use crate::world::World;

/// Pick up an item (the whole stack) from the ground.
///
/// # Errors
/// Returns an error if the player or their location cannot be resolved.
pub fn take_handler(world: &mut World, out: &mut dyn Output, thing: &str) -> Result<bool> {
    let here = world.player_location()?.id.clone();
    let Some(found) = world.location(&here)?.items.find(thing) else {
        entity_not_found(world, out, thing);
        return Ok(false);
    };
    if found.immovable {
        out.print(&format!("The {} won't budge.", found.name), TextStyle::Denied);
        return Ok(false);
    }
    let name = found.name.clone();

    let Some(item) = world.location_mut(&here)?.items.remove_all(&name) else {
        return Ok(false);
    };
    info!("player took {item} from {here}");
    out.print(&format!("Taken: {item}"), TextStyle::Success);
    world.player_mut()?.inventory.add(item);
    Ok(true)
}

/// Drop an item (the whole stack) on the ground. Whatever slot held it is emptied.
///
/// # Errors
/// Returns an error if the player or their location cannot be resolved.
pub fn drop_handler(world: &mut World, out: &mut dyn Output, thing: &str) -> Result<bool> {
    let here = world.player_location()?.id.clone();
    let Some(item) = world.player_mut()?.remove_item(thing, u32::MAX) else {
        out.print(&format!("You don't have any {thing}."), TextStyle::Denied);
        return Ok(false);
    };
    info!("player dropped {item} in {here}");
    out.print(&format!("Dropped: {item}"), TextStyle::Success);
    world.location_mut(&here)?.items.add(item);
    Ok(true)
}

/// Wield a carried weapon, in the primary slot unless another is named.
///
/// # Errors
/// Returns an error if the player character is missing.
pub fn equip_handler(world: &mut World, out: &mut dyn Output, thing: &str, slot: Option<&str>) -> Result<bool> {
    let slot = slot.unwrap_or(PRIMARY_SLOT);
    let player = world.player_mut()?;
    let Some(item) = player.inventory.find(thing) else {
        out.print(&format!("You don't have any {thing}."), TextStyle::Denied);
        return Ok(false);
    };
    if item.weapon.is_none() {
        out.print(&format!("The {} isn't much of a weapon.", item.name), TextStyle::Denied);
        return Ok(false);
    }
    let Some(name) = player.wield(slot, thing) else {
        return Ok(false);
    };
    info!("player equipped {name} in slot '{slot}'");
    out.print(&format!("You ready the {name} ({slot})."), TextStyle::Success);
    Ok(true)
}

/// Empty a slot, or take off a worn item.
///
/// # Errors
/// Returns an error if the player character is missing.
pub fn unequip_handler(world: &mut World, out: &mut dyn Output, thing: &str) -> Result<bool> {
    match world.player_mut()?.unequip(thing) {
        Some(name) => {
            out.print(&format!("You put away the {name}."), TextStyle::Success);
            Ok(true)
        },
        None => {
            out.print(&format!("You have no {thing} equipped."), TextStyle::Denied);
            Ok(false)
        },
    }
}

/// Put on a carried piece of armor.
///
/// # Errors
/// Returns an error if the player character is missing.
pub fn wear_handler(world: &mut World, out: &mut dyn Output, thing: &str) -> Result<bool> {
    let player = world.player_mut()?;
    let Some(item) = player.inventory.find(thing) else {
        out.print(&format!("You don't have any {thing}."), TextStyle::Denied);
        return Ok(false);
    };
    let item_name = item.name.clone();
    match player.wear(thing) {
        Some(name) => {
            out.print(&format!("You put on the {name}."), TextStyle::Success);
            Ok(true)
        },
        None => {
            out.print(&format!("You can't wear the {item_name}."), TextStyle::Denied);
            Ok(false)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use crate::io::RecordingOutput;
    use crate::item::{ArmorStats, Item, WeaponKind, WeaponStats};
    use crate::location::PendingLocation;
    use crate::world::WorldBuilder;

    fn world() -> World {
        let mut camp = PendingLocation::new("camp", "Camp");
        camp.items.add(Item::stack("coin", "", 4));
        camp.items
            .add(Item::new("sword", "").with_weapon(WeaponStats::new(WeaponKind::Blades, 0.0, 3.0, 0.0)));
        let mut anvil = Item::new("anvil", "");
        anvil.immovable = true;
        camp.items.add(anvil);
        let mut hero = Character::new("hero", "Hero");
        hero.inventory.add(Item::stack("coin", "", 1));
        hero.inventory.add(Item::new("bread", ""));
        hero.inventory
            .add(Item::new("mail shirt", "").with_armor(ArmorStats::new(1.0, 2.0, 0.0)));
        let mut builder = WorldBuilder::new("Test");
        builder.add_location(camp).add_character(hero, "camp").player("hero");
        builder.build().unwrap()
    }

    #[test]
    fn taking_merges_into_existing_stacks() {
        let mut world = world();
        let mut out = RecordingOutput::new();
        assert!(take_handler(&mut world, &mut out, "coin").unwrap());
        let player = world.player().unwrap();
        assert_eq!(player.inventory.get("coin").unwrap().quantity(), 5);
        assert!(!world.player_location().unwrap().items.contains("coin"));
        assert!(!take_handler(&mut world, &mut out, "anvil").unwrap());
        assert!(out.contains("won't budge"));
    }

    #[test]
    fn dropping_a_wielded_weapon_empties_its_slot() {
        let mut world = world();
        let mut out = RecordingOutput::new();
        assert!(take_handler(&mut world, &mut out, "sword").unwrap());
        assert!(equip_handler(&mut world, &mut out, "sword", None).unwrap());
        assert!(world.player().unwrap().weapon_in(PRIMARY_SLOT).is_some());
        assert!(drop_handler(&mut world, &mut out, "sword").unwrap());
        assert_eq!(world.player().unwrap().equipped().count(), 0);
        assert!(world.player_location().unwrap().items.contains("sword"));
    }

    #[test]
    fn only_weapons_are_wielded_and_only_armor_is_worn() {
        let mut world = world();
        let mut out = RecordingOutput::new();
        assert!(!equip_handler(&mut world, &mut out, "bread", None).unwrap());
        assert!(!wear_handler(&mut world, &mut out, "bread").unwrap());
        assert!(wear_handler(&mut world, &mut out, "mail").unwrap());
        assert_eq!(world.player().unwrap().armor().sharp, 2.0);
        assert!(unequip_handler(&mut world, &mut out, "mail").unwrap());
        assert_eq!(world.player().unwrap().armor().sharp, 0.0);
    }
}
