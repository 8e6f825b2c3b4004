//! Observation and examination command handlers.
//!
//! None of these change world state, so none of them take time.
//!
//! # Commands
//! - [`look_handler`] - describe the current location
//! - [`look_at_handler`] - examine a character or item nearby
//! - [`inv_handler`] - list what the player carries
//! - [`read_handler`] - read the text on an item
//! - [`status_handler`] - the player's pools and conditions

use anyhow::Result;
use log::info;

use crate::character::Character;
use crate::entity_search::{SearchScope, find_character, find_item};
use crate::io::{Output, TextStyle};
use crate::repl::entity_not_found;
use crate::world::World;

/// Shows description of surroundings.
///
/// # Errors
/// Returns an error if the player's current location cannot be resolved.
pub fn look_handler(world: &World, out: &mut dyn Output) -> Result<()> {
    let location = world.player_location()?;
    out.print(&location.name, TextStyle::Title);
    if !location.description.is_empty() {
        out.print(&location.description, TextStyle::Description);
    }

    if !location.items.is_empty() {
        let items: Vec<String> = location.items.iter().map(ToString::to_string).collect();
        out.print(&format!("You see: {}", items.join(", ")), TextStyle::Item);
    }

    for other in world.others_in(&location.id, &world.player) {
        let character = world.character(&other)?;
        let note = if character.attack_target.as_ref() == Some(&world.player) {
            " It looks ready to fight you."
        } else {
            ""
        };
        out.print(&format!("{} is here.{note}", character.name), TextStyle::Character);
    }

    if location.exits().is_empty() {
        out.print("There is no way out.", TextStyle::Exit);
    } else {
        let exits: Vec<&str> = location.exits().keys().map(|dir| dir.as_str()).collect();
        out.print(&format!("Exits: {}", exits.join(", ")), TextStyle::Exit);
    }
    Ok(())
}

/// Examine a character or item nearby.
///
/// # Errors
/// Returns an error if the player's current location cannot be resolved.
pub fn look_at_handler(world: &World, out: &mut dyn Output, thing: &str) -> Result<()> {
    let here = world.player_location()?.id.clone();
    if let Ok(id) = find_character(world, thing, &here) {
        let character = world.character(&id)?;
        out.print(&character.name, TextStyle::Character);
        if !character.description.is_empty() {
            out.print(&character.description, TextStyle::Description);
        }
        out.print(&condition(character), TextStyle::Description);
        for (_, weapon) in character.equipped() {
            out.print(&format!("It wields a {}.", weapon.name), TextStyle::Item);
        }
        return Ok(());
    }

    match find_item(world, thing, SearchScope::Nearby(&here)) {
        Ok(item) => {
            info!("player examined {}", item.name);
            out.print(&item.to_string(), TextStyle::Item);
            let description = if item.description.is_empty() {
                "You see nothing special about it."
            } else {
                item.description.as_str()
            };
            out.print(description, TextStyle::Description);
        },
        Err(_) => entity_not_found(world, out, thing),
    }
    Ok(())
}

/// A rough read of how hurt a character looks.
fn condition(character: &Character) -> String {
    let hp = character.vitals.hp;
    let fraction = if hp.max() > 0.0 { hp.current() / hp.max() } else { 0.0 };
    let state = match fraction {
        f if f >= 1.0 => "is unhurt",
        f if f >= 0.75 => "has a few scratches",
        f if f >= 0.5 => "is wounded",
        f if f >= 0.25 => "is badly wounded",
        _ => "is barely standing",
    };
    format!("{} {state}.", character.name)
}

/// Show the contents of the player's inventory.
///
/// # Errors
/// Returns an error if the player character is missing.
pub fn inv_handler(world: &World, out: &mut dyn Output) -> Result<()> {
    let player = world.player()?;
    if player.inventory.is_empty() {
        out.print("You aren't carrying anything.", TextStyle::System);
        return Ok(());
    }
    out.print("You are carrying:", TextStyle::System);
    for item in &player.inventory {
        let mut line = format!("  {item}");
        for slot in player.slots_holding(item) {
            line.push_str(&format!(" (equipped: {slot})"));
        }
        if player.is_worn(item) {
            line.push_str(" (worn)");
        }
        out.print(&line, TextStyle::Item);
    }
    Ok(())
}

/// Read the text written on an item.
///
/// # Errors
/// Returns an error if the player's current location cannot be resolved.
pub fn read_handler(world: &World, out: &mut dyn Output, thing: &str) -> Result<()> {
    let here = world.player_location()?.id.clone();
    match find_item(world, thing, SearchScope::Nearby(&here)) {
        Ok(item) => match &item.text {
            Some(text) => {
                out.print(&format!("The {} reads:", item.name), TextStyle::System);
                out.print(text, TextStyle::Description);
            },
            None => out.print(
                &format!("There's nothing written on the {}.", item.name),
                TextStyle::Denied,
            ),
        },
        Err(_) => entity_not_found(world, out, thing),
    }
    Ok(())
}

/// Show the player's pools, conditions and current target.
///
/// # Errors
/// Returns an error if the player character is missing.
pub fn status_handler(world: &World, out: &mut dyn Output) -> Result<()> {
    let player = world.player()?;
    let vitals = &player.vitals;
    out.print(&player.name, TextStyle::Title);
    out.print(
        &format!(
            "HP {}/{:.0}  MP {}/{:.0}  SP {}/{:.0}",
            vitals.hp.display(),
            vitals.hp.max(),
            vitals.mp.display(),
            vitals.mp.max(),
            vitals.sp.display(),
            vitals.sp.max()
        ),
        TextStyle::System,
    );
    let armor = player.armor();
    out.print(
        &format!("Armor: blunt {:.1}, sharp {:.1}, magic {:.1}", armor.blunt, armor.sharp, armor.magic),
        TextStyle::System,
    );
    if player.drunk > 0.0 {
        out.print("You are drunk.", TextStyle::System);
    }
    if player.invisible > 0 {
        out.print(
            &format!("You are invisible ({} more turns).", player.invisible),
            TextStyle::System,
        );
    }
    if let Some(target) = &player.attack_target
        && let Ok(target) = world.character(target)
    {
        out.print(&format!("You are fighting {}.", target.name), TextStyle::Combat);
    }
    Ok(())
}
