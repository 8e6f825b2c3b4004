//! Combat resolution.
//!
//! [`roll_attack`] is the pure arithmetic of one swing: given what the
//! attacker brings, what the defender has, and a [`Dice`], it decides hit or
//! miss and the damage in each channel. [`resolve_attack`] wraps it with world
//! state: picking the weapon, narrating, recording enmity and applying damage.
//!
//! Damage totals do double duty. The same number selects the narration tier
//! (read as a percentage figure, "DT") and is subtracted from hp as-is.

use log::{debug, info};
use variantly::Variantly;

use crate::character::{Attributes, Character, PowerOverride};
use crate::dice::Dice;
use crate::error::WorldError;
use crate::idgen::CharacterId;
use crate::io::{Output, TextStyle};
use crate::item::{ArmorStats, Item, WeaponStats};
use crate::narration::AttackLine;
use crate::world::World;

/// The offensive side of one attack.
#[derive(Debug, Clone, Copy)]
pub struct AttackProfile {
    pub attributes: Attributes,
    pub power: PowerOverride,
    pub weapon: WeaponStats,
}

impl AttackProfile {
    pub fn of(attacker: &Character, weapon: &Item) -> Self {
        Self {
            attributes: attacker.attributes,
            power: attacker.power,
            weapon: weapon.weapon_stats(),
        }
    }

    pub fn blunt_power(&self) -> f64 {
        self.power
            .blunt
            .unwrap_or(self.attributes.strength * self.weapon.blunt)
    }

    pub fn sharp_power(&self) -> f64 {
        self.power
            .sharp
            .unwrap_or(self.attributes.strength * self.weapon.sharp)
    }

    pub fn magic_power(&self) -> f64 {
        self.power
            .magic
            .unwrap_or(self.attributes.magic_level * self.weapon.magic)
    }
}

/// The defensive side of one attack.
#[derive(Debug, Clone, Copy)]
pub struct DefenseProfile {
    pub agility: f64,
    pub drunk: f64,
    pub max_sp: f64,
    pub invisible: u32,
    pub armor: ArmorStats,
}

impl DefenseProfile {
    pub fn of(target: &Character) -> Self {
        Self {
            agility: target.attributes.agility,
            drunk: target.drunk,
            max_sp: target.vitals.sp.max(),
            invisible: target.invisible,
            armor: target.armor(),
        }
    }

    /// Multiplier applied to the to-hit roll; drunk targets dodge worse.
    pub fn sobriety(&self) -> f64 {
        if self.drunk > 0.0 {
            1.0 - self.drunk / (self.max_sp / 2.0 + 50.0)
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageRoll {
    pub blunt: u32,
    pub sharp: u32,
    pub magic: u32,
}

impl DamageRoll {
    pub fn total(&self) -> u32 {
        self.blunt + self.sharp + self.magic
    }
}

/// Every number drawn for one attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRoll {
    pub accuracy: f64,
    pub to_hit: f64,
    /// The target's invisibility turned the attack aside.
    pub lost_sight: bool,
    /// `None` on a miss.
    pub damage: Option<DamageRoll>,
}

impl AttackRoll {
    pub fn is_hit(&self) -> bool {
        self.damage.is_some()
    }
}

/// Roll one attack. Draws happen in a fixed order: accuracy, to-hit, the
/// invisibility check (only against invisible targets), then power and
/// armor for blunt, sharp and magic. A miss stops after the checks.
pub fn roll_attack(attack: &AttackProfile, defense: &DefenseProfile, dice: &mut dyn Dice) -> AttackRoll {
    let accuracy = attack.attributes.coordination * dice.unit();
    let to_hit = defense.agility * dice.unit() * defense.sobriety();
    let lost_sight = defense.invisible > 0 && dice.unit() * 4.0 > 1.0;

    if accuracy < to_hit || lost_sight {
        return AttackRoll {
            accuracy,
            to_hit,
            lost_sight,
            damage: None,
        };
    }

    let blunt = linear_channel(attack.blunt_power(), defense.armor.blunt, dice);
    let sharp = root_channel(attack.sharp_power(), defense.armor.sharp, dice);
    let magic = root_channel(attack.magic_power(), defense.armor.magic, dice);
    AttackRoll {
        accuracy,
        to_hit,
        lost_sight,
        damage: Some(DamageRoll { blunt, sharp, magic }),
    }
}

/// Armor soaks a linear share of its rating.
fn linear_channel(power: f64, armor: f64, dice: &mut dyn Dice) -> u32 {
    let dealt = (dice.unit().sqrt() * power).floor();
    let soaked = (dice.unit() * armor).floor();
    clamp_damage(dealt - soaked)
}

/// Armor soaks a square-root-weighted share of its rating.
fn root_channel(power: f64, armor: f64, dice: &mut dyn Dice) -> u32 {
    let dealt = (dice.unit().sqrt() * power).floor();
    let soaked = (dice.unit().sqrt() * armor).floor();
    clamp_damage(dealt - soaked)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_damage(value: f64) -> u32 {
    value.max(0.0) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitReport {
    pub damage: DamageRoll,
    /// Narration tier input; equal to the damage total.
    pub dt: u32,
    pub killed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Variantly)]
pub enum AttackOutcome {
    Miss,
    Hit(HitReport),
}

/// One attack by `attacker` on `target` with the weapon in `slot`.
///
/// With no slot the primary weapon is used; a missing weapon means bare
/// hands. Co-location is the caller's business.
pub fn resolve_attack(
    world: &mut World,
    dice: &mut dyn Dice,
    out: &mut dyn Output,
    attacker_id: &CharacterId,
    target_id: &CharacterId,
    slot: Option<&str>,
) -> Result<AttackOutcome, WorldError> {
    let attacker = world.character(attacker_id)?;
    let target = world.character(target_id)?;
    let weapon = match slot {
        Some(slot) => attacker.weapon_in(slot),
        None => attacker.primary_weapon(),
    }
    .cloned()
    .unwrap_or_else(Item::unarmed);

    let roll = roll_attack(&AttackProfile::of(attacker, &weapon), &DefenseProfile::of(target), dice);
    debug!(
        "{attacker_id} -> {target_id} with {}: accuracy {:.2} vs to-hit {:.2}{}",
        weapon.name,
        roll.accuracy,
        roll.to_hit,
        if roll.lost_sight { " (lost sight)" } else { "" }
    );

    let observed = [&attacker.location, &target.location]
        .into_iter()
        .flatten()
        .any(|loc| world.observer_present(loc));
    let line = AttackLine {
        attacker: &attacker.name,
        target: &target.name,
        weapon: &weapon.name,
        kind: weapon.weapon_stats().kind,
    };

    let Some(damage) = roll.damage else {
        if observed {
            out.print(&attacker.narration.miss(&line), TextStyle::Combat);
        }
        return Ok(AttackOutcome::Miss);
    };

    let dt = damage.total();
    if observed {
        let text = if dt == 0 {
            attacker.narration.graze(&line)
        } else {
            attacker.narration.hit(&line, dt)
        };
        out.print(&text, TextStyle::Combat);
    }
    let target_name = target.name.clone();

    world.character_mut(attacker_id)?.add_enemy(target_id.clone());
    let defender = world.character_mut(target_id)?;
    defender.add_enemy(attacker_id.clone());
    if defender.attack_target.is_none() {
        debug!("{target_id} retaliates against {attacker_id}");
        defender.attack_target = Some(attacker_id.clone());
    }

    let killed = world.take_damage(target_id, f64::from(dt))?.is_dead();
    info!("{attacker_id} hit {target_id} for {dt}{}", if killed { " (killed)" } else { "" });
    if killed && observed {
        out.print(&format!("{target_name} dies."), TextStyle::Danger);
    }

    Ok(AttackOutcome::Hit(HitReport { damage, dt, killed }))
}
