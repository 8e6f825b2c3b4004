//! Combat narration.
//!
//! The damage figure (DT) of a hit selects a line from a tier table keyed by
//! weapon family. Tables are sorted by ascending threshold and the *last*
//! threshold not exceeding DT wins. Characters pick a [`NarrationStyle`] at
//! construction time.

use serde::{Deserialize, Serialize};

use crate::item::WeaponKind;

type TierTable = &'static [(u32, &'static str)];

const CLUB: TierTable = &[
    (1, "{attacker} clips {target} with the {weapon}."),
    (10, "{attacker} cracks {target} with the {weapon}."),
    (25, "{attacker} smashes the {weapon} into {target}."),
    (50, "{attacker} pounds {target} with a bone-jarring blow of the {weapon}."),
    (75, "{attacker} brings the {weapon} down on {target} with a sickening crunch!"),
    (100, "{attacker} pulverizes {target} with the {weapon}!"),
];

const AXE: TierTable = &[
    (1, "{attacker} nicks {target} with the {weapon}."),
    (10, "{attacker} hacks at {target} with the {weapon}."),
    (25, "{attacker} chops a deep gash in {target}."),
    (50, "{attacker} cleaves into {target} with the {weapon}."),
    (75, "{attacker} buries the {weapon} in {target}!"),
    (100, "{attacker} hews {target} nearly in two!"),
];

const SPEAR: TierTable = &[
    (1, "{attacker} pricks {target} with the {weapon}."),
    (10, "{attacker} jabs {target} with the {weapon}."),
    (25, "{attacker} stabs {target} with the {weapon}."),
    (50, "{attacker} drives the {weapon} deep into {target}."),
    (75, "{attacker} runs {target} through with the {weapon}!"),
    (100, "{attacker} skewers {target} on the {weapon}!"),
];

const BURN: TierTable = &[
    (1, "{target} is singed by {attacker}'s {weapon}."),
    (10, "{target} is scorched by {attacker}'s {weapon}."),
    (25, "{attacker}'s {weapon} burns {target} badly."),
    (50, "{target} is seared by {attacker}'s {weapon}."),
    (75, "{target} is charred by {attacker}'s {weapon}!"),
    (100, "{target} is incinerated by {attacker}'s {weapon}!"),
];

const ARROW: TierTable = &[
    (1, "{attacker}'s arrow grazes {target}."),
    (10, "{attacker}'s arrow strikes {target}."),
    (25, "{attacker}'s arrow sinks into {target}."),
    (50, "{attacker}'s arrow buries itself in {target}."),
    (75, "{attacker}'s arrow punches clean through {target}!"),
    (100, "{attacker}'s arrow finds {target}'s heart!"),
];

const BOLT: TierTable = &[
    (1, "{attacker}'s bolt glances off {target}."),
    (10, "{attacker}'s bolt thuds into {target}."),
    (25, "{attacker}'s bolt tears into {target}."),
    (50, "{attacker}'s bolt slams deep into {target}."),
    (75, "{attacker}'s bolt knocks {target} off their feet!"),
    (100, "{attacker}'s bolt pins {target} to the ground!"),
];

const FIRE: TierTable = &[
    (1, "{attacker}'s flames lick at {target}."),
    (10, "{attacker}'s flames wash over {target}."),
    (25, "{attacker}'s fire engulfs {target}."),
    (50, "{attacker}'s blaze roars over {target}."),
    (75, "{target} is wreathed in {attacker}'s inferno!"),
    (100, "{target} is consumed by {attacker}'s firestorm!"),
];

const BLADES: TierTable = &[
    (1, "{attacker} scratches {target} with the {weapon}."),
    (10, "{attacker} cuts {target} with the {weapon}."),
    (25, "{attacker} slashes {target} with the {weapon}."),
    (50, "{attacker} carves into {target} with the {weapon}."),
    (75, "{attacker} slices {target} open with the {weapon}!"),
    (100, "{attacker} eviscerates {target} with the {weapon}!"),
];

const GENERIC: TierTable = &[
    (1, "{attacker} barely hurts {target} with the {weapon}."),
    (10, "{attacker} hits {target} with the {weapon}."),
    (25, "{attacker} hits {target} hard with the {weapon}."),
    (50, "{attacker} wounds {target} badly with the {weapon}."),
    (75, "{attacker} maims {target} with the {weapon}!"),
    (100, "{attacker} devastates {target} with the {weapon}!"),
];

const SEVERITY: TierTable = &[
    (1, "lightly"),
    (10, "hard"),
    (25, "viciously"),
    (50, "savagely"),
    (75, "ferociously"),
    (100, "with lethal force"),
];

/// The tier table for a weapon family.
pub fn tier_table(kind: WeaponKind) -> &'static [(u32, &'static str)] {
    match kind {
        WeaponKind::Club => CLUB,
        WeaponKind::Axe => AXE,
        WeaponKind::Spear => SPEAR,
        WeaponKind::Burn => BURN,
        WeaponKind::Arrow => ARROW,
        WeaponKind::Bolt => BOLT,
        WeaponKind::Fire => FIRE,
        WeaponKind::Blades => BLADES,
        WeaponKind::Generic => GENERIC,
    }
}

/// Walk `table` in ascending order, keeping the last entry whose threshold
/// `dt` reaches. Returns `None` when `dt` is below every threshold.
pub fn select_tier<T: Copy>(table: &[(u32, T)], dt: u32) -> Option<T> {
    let mut chosen = None;
    for (threshold, entry) in table {
        if dt >= *threshold {
            chosen = Some(*entry);
        }
    }
    chosen
}

/// Names involved in one attack, as they should appear in narration.
#[derive(Debug, Clone, Copy)]
pub struct AttackLine<'a> {
    pub attacker: &'a str,
    pub target: &'a str,
    pub weapon: &'a str,
    pub kind: WeaponKind,
}

impl AttackLine<'_> {
    fn fill(&self, template: &str) -> String {
        template
            .replace("{attacker}", self.attacker)
            .replace("{target}", self.target)
            .replace("{weapon}", self.weapon)
    }
}

/// How a character's attacks are described.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NarrationStyle {
    /// Weapon-family tier tables.
    #[default]
    Standard,
    /// Natural attacks: a verb ("bites") plus a severity adverb.
    Creature { verb: String },
    /// Numbers only.
    Terse,
}

impl NarrationStyle {
    pub fn miss(&self, line: &AttackLine<'_>) -> String {
        match self {
            NarrationStyle::Standard => line.fill(&format!("{{attacker}} {} at {{target}} but misses.", swing_verb(line.kind))),
            NarrationStyle::Creature { verb } => line.fill(&format!("{{attacker}} {verb} at {{target}} and misses.")),
            NarrationStyle::Terse => line.fill("{attacker} misses {target}."),
        }
    }

    /// Line for a hit that does no damage.
    pub fn graze(&self, line: &AttackLine<'_>) -> String {
        match self {
            NarrationStyle::Standard => line.fill("{attacker}'s {weapon} glances harmlessly off {target}."),
            NarrationStyle::Creature { verb } => line.fill(&format!("{{attacker}} {verb} {{target}} but leaves no mark.")),
            NarrationStyle::Terse => line.fill("{attacker} hits {target} for no damage."),
        }
    }

    pub fn hit(&self, line: &AttackLine<'_>, dt: u32) -> String {
        match self {
            NarrationStyle::Standard => select_tier(tier_table(line.kind), dt).map_or_else(
                || line.fill("{attacker} hits {target}."),
                |template| line.fill(template),
            ),
            NarrationStyle::Creature { verb } => {
                let adverb = select_tier(SEVERITY, dt).unwrap_or("feebly");
                line.fill(&format!("{{attacker}} {verb} {{target}} {adverb}."))
            },
            NarrationStyle::Terse => format!("{} hits {} for {dt}.", line.attacker, line.target),
        }
    }
}

fn swing_verb(kind: WeaponKind) -> &'static str {
    match kind {
        WeaponKind::Club | WeaponKind::Axe | WeaponKind::Blades | WeaponKind::Generic => "swings",
        WeaponKind::Spear => "thrusts",
        WeaponKind::Arrow => "looses an arrow",
        WeaponKind::Bolt => "fires a bolt",
        WeaponKind::Burn | WeaponKind::Fire => "hurls flame",
    }
}
