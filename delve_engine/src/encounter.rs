//! Encounter protocol.
//!
//! Every move goes through [`relocate`]. When a character arrives somewhere,
//! each pairing with a living occupant runs both parties' hooks and then both
//! hostility scans. A scan only ever sets attack intent; damage waits for the
//! next tick of the turn driver.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::idgen::{CharacterId, LocationId};
use crate::io::{Output, TextStyle};
use crate::world::World;

/// How a character reacts to meeting someone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterPolicy {
    /// Attack any player on sight, unless they're a friend.
    pub hostile_to_players: bool,
    pub hook: Option<EncounterHook>,
}

/// Custom side effect run before the hostility scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EncounterHook {
    /// Speak a line if a player can hear it.
    Say { text: String },
    /// Count whoever is met as a friend, unless already an enemy.
    Befriend,
    /// Count whoever is met as an enemy, unless already a friend.
    Provoke,
}

/// Move a character to `dest` and run encounters there.
///
/// Intent that no longer makes sense across the move is dropped: the mover
/// stops targeting anyone left behind, and anyone left behind stops targeting
/// the mover.
pub fn relocate(
    world: &mut World,
    id: &CharacterId,
    dest: &LocationId,
    out: &mut dyn Output,
) -> Result<(), WorldError> {
    let previous = world.place(id, dest)?;
    info!("{id} moved {} -> {dest}", previous.as_ref().map_or("(nowhere)", LocationId::as_str));

    let stale_target = world
        .character(id)?
        .attack_target
        .clone()
        .filter(|target| !world.co_located(id, target));
    if stale_target.is_some() {
        world.character_mut(id)?.attack_target = None;
    }

    let id_ref = id.clone();
    let left_behind: Vec<CharacterId> = world
        .characters
        .values()
        .filter(|c| c.attack_target.as_ref() == Some(&id_ref))
        .map(|c| c.id.clone())
        .filter(|other| !world.co_located(other, &id_ref))
        .collect();
    for other in left_behind {
        debug!("{other} lost track of {id}");
        world.character_mut(&other)?.attack_target = None;
    }

    run_encounters(world, id, out)
}

/// Run encounters between `id` and everyone already where it stands.
pub fn run_encounters(world: &mut World, id: &CharacterId, out: &mut dyn Output) -> Result<(), WorldError> {
    let here = world
        .character(id)?
        .location
        .clone()
        .ok_or_else(|| WorldError::Nowhere(id.clone()))?;

    for other in world.others_in(&here, id) {
        if !both_alive(world, id, &other)? {
            continue;
        }
        run_hook(world, id, &other, &here, out)?;
        run_hook(world, &other, id, &here, out)?;
        scan(world, id, &other, &here, out)?;
        scan(world, &other, id, &here, out)?;
    }
    Ok(())
}

/// Revive a dead character and send it back to its respawn point.
pub fn respawn(world: &mut World, id: &CharacterId, out: &mut dyn Output) -> Result<LocationId, WorldError> {
    let point = world.revive(id)?;
    relocate(world, id, &point, out)?;
    let character = world.character(id)?;
    info!("{} ({id}) respawned at {point}", character.name);
    if world.observer_present(&point) && !character.is_player {
        out.print(&format!("{} appears.", character.name), TextStyle::Character);
    }
    Ok(point)
}

fn both_alive(world: &World, a: &CharacterId, b: &CharacterId) -> Result<bool, WorldError> {
    Ok(world.character(a)?.is_alive() && world.character(b)?.is_alive())
}

fn run_hook(
    world: &mut World,
    owner: &CharacterId,
    other: &CharacterId,
    here: &LocationId,
    out: &mut dyn Output,
) -> Result<(), WorldError> {
    let Some(hook) = world.character(owner)?.encounter.hook.clone() else {
        return Ok(());
    };
    match hook {
        EncounterHook::Say { text } => {
            if world.observer_present(here) {
                let name = &world.character(owner)?.name;
                out.print(&format!("{name} says, \"{text}\""), TextStyle::Character);
            }
        },
        EncounterHook::Befriend => {
            let character = world.character_mut(owner)?;
            if !character.is_enemy(other) {
                character.add_friend(other.clone());
            }
        },
        EncounterHook::Provoke => {
            let character = world.character_mut(owner)?;
            if !character.is_friend(other) {
                character.add_enemy(other.clone());
            }
        },
    }
    Ok(())
}

/// `a` looks at `b` and decides whether to attack.
fn scan(
    world: &mut World,
    a: &CharacterId,
    b: &CharacterId,
    here: &LocationId,
    out: &mut dyn Output,
) -> Result<(), WorldError> {
    let seeker = world.character(a)?;
    let seen = world.character(b)?;
    let hostile = seeker.is_enemy(b)
        || (seeker.encounter.hostile_to_players && seen.is_player && !seeker.is_friend(b));
    if !hostile {
        return Ok(());
    }

    let line = if seen.is_player {
        format!("{} turns on you!", seeker.name)
    } else {
        format!("{} turns on {}!", seeker.name, seen.name)
    };
    let seeker = world.character_mut(a)?;
    seeker.add_enemy(b.clone());
    seeker.attack_target = Some(b.clone());
    info!("{a} now targets {b}");
    if world.observer_present(here) {
        out.print(&line, TextStyle::Danger);
    }
    Ok(())
}
