//! Item types and related helpers.
//!
//! Items are plain values owned by exactly one [`Container`](crate::container::Container)
//! at a time. Moving an item between holders moves the value; nothing aliases it.
//! Weapon and armor statistics are closed structures with zero defaults.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::container::ItemHandle;
use crate::vitals::Recovery;

pub use delve_data::WeaponKind;

/// A possession: a weapon, a bottle, a pile of coins.
///
/// Fungible items stack by name and track a quantity on a single entry.
/// Non-fungible items are always distinct instances with a quantity of one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub value: u32,
    pub size: u32,
    quantity: u32,
    pub fungible: bool,
    pub immovable: bool,
    pub weapon: Option<WeaponStats>,
    pub armor: Option<ArmorStats>,
    pub on_drink: Option<ItemEffect>,
    pub on_eat: Option<ItemEffect>,
    pub on_use: Option<ItemEffect>,
    /// Legible text, shown by `read`.
    pub text: Option<String>,
    /// Assigned by the container holding the item.
    #[serde(default)]
    handle: ItemHandle,
}

impl Item {
    /// Create a distinct, non-fungible item.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value: 0,
            size: 0,
            quantity: 1,
            fungible: false,
            immovable: false,
            weapon: None,
            armor: None,
            on_drink: None,
            on_eat: None,
            on_use: None,
            text: None,
            handle: ItemHandle::default(),
        }
    }

    /// Create a stack of a fungible item.
    pub fn stack(name: impl Into<String>, description: impl Into<String>, quantity: u32) -> Self {
        Self {
            quantity,
            fungible: true,
            ..Self::new(name, description)
        }
    }

    /// The zero-stat stand-in used when a character attacks without a weapon.
    pub fn unarmed() -> Self {
        Self {
            weapon: Some(WeaponStats::default()),
            ..Self::new("bare hands", "Nothing but knuckles.")
        }
    }

    pub fn with_weapon(mut self, weapon: WeaponStats) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_armor(mut self, armor: ArmorStats) -> Self {
        self.armor = Some(armor);
        self
    }

    pub fn handle(&self) -> ItemHandle {
        self.handle
    }

    pub(crate) fn set_handle(&mut self, handle: ItemHandle) {
        self.handle = handle;
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Set the stack size. Non-fungible items keep a quantity of one.
    pub fn set_quantity(&mut self, quantity: u32) {
        if self.fungible {
            self.quantity = quantity;
        }
    }

    /// Returns true if this item stacks with `other`.
    pub fn stacks_with(&self, other: &Item) -> bool {
        self.fungible && other.fungible && self.name == other.name
    }

    /// Weapon statistics, or the zero block if the item was never meant as a weapon.
    pub fn weapon_stats(&self) -> WeaponStats {
        self.weapon.unwrap_or_default()
    }

    /// Returns true if `term` names this item (case-insensitive substring).
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        !term.is_empty() && self.name.to_lowercase().contains(&term)
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.fungible && self.quantity != 1 {
            write!(f, "{} ({})", self.name, self.quantity)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Damage channels and narration family of a weapon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub blunt: f64,
    pub sharp: f64,
    pub magic: f64,
    pub kind: WeaponKind,
}

impl WeaponStats {
    pub fn new(kind: WeaponKind, blunt: f64, sharp: f64, magic: f64) -> Self {
        Self {
            blunt,
            sharp,
            magic,
            kind,
        }
    }
}

/// Mitigation per damage channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmorStats {
    pub blunt: f64,
    pub sharp: f64,
    pub magic: f64,
}

impl ArmorStats {
    pub fn new(blunt: f64, sharp: f64, magic: f64) -> Self {
        Self { blunt, sharp, magic }
    }
}

impl std::ops::Add for ArmorStats {
    type Output = ArmorStats;

    fn add(self, rhs: ArmorStats) -> ArmorStats {
        ArmorStats {
            blunt: self.blunt + rhs.blunt,
            sharp: self.sharp + rhs.sharp,
            magic: self.magic + rhs.magic,
        }
    }
}

/// What happens to whoever drinks, eats or uses an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemEffect {
    pub recover: Recovery,
    pub drunk: f64,
    /// Turns of invisibility granted.
    pub invisible: u32,
    pub message: Option<String>,
}

/// Ways of consuming or handling an item that may trigger an [`ItemEffect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    Drink,
    Eat,
    Use,
}

impl Ingest {
    pub fn verb(self) -> &'static str {
        match self {
            Ingest::Drink => "drink",
            Ingest::Eat => "eat",
            Ingest::Use => "use",
        }
    }

    /// Drinking and eating use up one unit of the stack; using does not.
    pub fn consumes(self) -> bool {
        matches!(self, Ingest::Drink | Ingest::Eat)
    }

    pub fn effect_of(self, item: &Item) -> Option<&ItemEffect> {
        match self {
            Ingest::Drink => item.on_drink.as_ref(),
            Ingest::Eat => item.on_eat.as_ref(),
            Ingest::Use => item.on_use.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_fungible_items_ignore_quantity_changes() {
        let mut sword = Item::new("sword", "sharp");
        sword.set_quantity(5);
        assert_eq!(sword.quantity(), 1);

        let mut coins = Item::stack("gold coin", "shiny", 3);
        coins.set_quantity(7);
        assert_eq!(coins.quantity(), 7);
    }

    #[test]
    fn only_fungible_items_with_same_name_stack() {
        let a = Item::stack("arrow", "", 2);
        let b = Item::stack("arrow", "", 5);
        let c = Item::new("arrow", "");
        assert!(a.stacks_with(&b));
        assert!(!a.stacks_with(&c));
        assert!(!c.stacks_with(&Item::new("arrow", "")));
    }

    #[test]
    fn unarmed_is_a_zero_stat_generic_weapon() {
        let fists = Item::unarmed();
        let stats = fists.weapon_stats();
        assert_eq!(stats, WeaponStats::default());
        assert_eq!(stats.kind, WeaponKind::Generic);
    }

    #[test]
    fn non_weapon_items_fight_with_zero_stats() {
        let teacup = Item::new("teacup", "dainty");
        assert_eq!(teacup.weapon_stats(), WeaponStats::default());
    }

    #[test]
    fn matches_is_case_insensitive_substring() {
        let item = Item::new("Rusty Sword", "");
        assert!(item.matches("sword"));
        assert!(item.matches("RUSTY"));
        assert!(!item.matches("axe"));
        assert!(!item.matches("  "));
    }

    #[test]
    fn display_shows_stack_size() {
        assert_eq!(Item::stack("coin", "", 3).to_string(), "coin (3)");
        assert_eq!(Item::new("lamp", "").to_string(), "lamp");
    }

    #[test]
    fn only_drink_and_eat_consume() {
        assert!(Ingest::Drink.consumes());
        assert!(Ingest::Eat.consumes());
        assert!(!Ingest::Use.consumes());
    }
}
