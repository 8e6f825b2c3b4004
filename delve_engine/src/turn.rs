//! Turn driver.
//!
//! [`advance`] runs one tick: every character holding a live, co-located
//! target attacks once per equipped weapon, then everyone gets their upkeep
//! and dead NPCs count down toward respawning. The driver has no notion of
//! wall-clock time; the session decides how often to call it.

use log::{debug, info};

use crate::combat::{AttackOutcome, resolve_attack};
use crate::dice::Dice;
use crate::encounter;
use crate::error::WorldError;
use crate::idgen::CharacterId;
use crate::io::Output;
use crate::world::World;

/// One call into combat resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub attacker: CharacterId,
    pub target: CharacterId,
    /// `None` for an unarmed attack.
    pub slot: Option<String>,
    pub outcome: AttackOutcome,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub resolutions: Vec<Resolution>,
    pub deaths: Vec<CharacterId>,
    pub respawns: Vec<CharacterId>,
}

impl TickReport {
    pub fn attacks_by(&self, id: &CharacterId) -> usize {
        self.resolutions.iter().filter(|r| &r.attacker == id).count()
    }
}

/// The target `id` should attack now, if any: alive, with a living target in
/// the same location.
pub fn qualifying_target(world: &World, id: &CharacterId) -> Option<CharacterId> {
    let character = world.characters.get(id)?;
    if !character.is_alive() {
        return None;
    }
    let target = character.attack_target.as_ref()?;
    let alive = world.characters.get(target).is_some_and(|t| t.is_alive());
    (alive && world.co_located(id, target)).then(|| target.clone())
}

/// Advance the world one tick.
pub fn advance(world: &mut World, dice: &mut dyn Dice, out: &mut dyn Output) -> Result<TickReport, WorldError> {
    world.tick_count += 1;
    let mut report = TickReport {
        tick: world.tick_count,
        ..TickReport::default()
    };

    let turn_order: Vec<CharacterId> = world.characters.keys().cloned().collect();
    for id in &turn_order {
        let Some(target) = qualifying_target(world, id) else {
            continue;
        };
        for slot in world.character(id)?.attack_slots() {
            // the target may have died, or the attacker been killed, mid-volley
            if qualifying_target(world, id).as_ref() != Some(&target) {
                break;
            }
            let outcome = resolve_attack(world, dice, out, id, &target, slot.as_deref())?;
            if let AttackOutcome::Hit(hit) = &outcome
                && hit.killed
            {
                report.deaths.push(target.clone());
            }
            report.resolutions.push(Resolution {
                attacker: id.clone(),
                target: target.clone(),
                slot,
                outcome,
            });
        }
    }

    for character in world.characters.values_mut() {
        character.upkeep();
    }

    for id in &turn_order {
        if countdown_respawn(world, id)? {
            encounter::respawn(world, id, out)?;
            report.respawns.push(id.clone());
        }
    }

    debug!(
        "tick {}: {} resolution(s), {} death(s)",
        report.tick,
        report.resolutions.len(),
        report.deaths.len()
    );
    if !report.deaths.is_empty() {
        info!("tick {} deaths: {:?}", report.tick, report.deaths);
    }
    Ok(report)
}

/// Tick a dead NPC's respawn countdown. Returns true when it's due.
fn countdown_respawn(world: &mut World, id: &CharacterId) -> Result<bool, WorldError> {
    let character = world.character_mut(id)?;
    if character.is_alive() || character.is_player {
        return Ok(false);
    }
    match character.respawn_countdown {
        Some(0) => Ok(true),
        Some(n) => {
            character.respawn_countdown = Some(n - 1);
            Ok(n == 1)
        },
        None => Ok(false),
    }
}
