//! Character Module
//!
//! Mutable, combat-relevant state of anyone who can fight: pools, attributes,
//! equipment, relationships, attack intent and the action table.
//!
//! Equipment slots refer to inventory entries by [`ItemHandle`] rather than
//! holding a second copy of the item, so equipping never duplicates a
//! possession and two same-named items stay apart. A slot whose item has left
//! the inventory is pruned.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::container::{Container, ItemHandle};
use crate::encounter::EncounterPolicy;
use crate::idgen::{CharacterId, LocationId};
use crate::item::{ArmorStats, Item, ItemEffect};
use crate::narration::NarrationStyle;
use crate::vitals::{LifeState, Recovery, Vitals};

/// Slot consulted first when a weapon isn't named explicitly.
pub const PRIMARY_SLOT: &str = "primary";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: f64,
    pub coordination: f64,
    pub agility: f64,
    pub magic_level: f64,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            strength: 10.0,
            coordination: 10.0,
            agility: 10.0,
            magic_level: 0.0,
        }
    }
}

/// Fixed damage powers replacing `attribute * weapon` for a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerOverride {
    pub blunt: Option<f64>,
    pub sharp: Option<f64>,
    pub magic: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub description: String,
    pub is_player: bool,
    pub attributes: Attributes,
    pub vitals: Vitals,
    /// Restored every tick while alive.
    pub regen: Recovery,
    pub base_armor: ArmorStats,
    pub power: PowerOverride,
    pub inventory: Container,
    /// slot -> inventory entry
    equipped: BTreeMap<String, ItemHandle>,
    /// inventory entries
    worn: Vec<ItemHandle>,
    pub enemies: BTreeSet<CharacterId>,
    pub friends: BTreeSet<CharacterId>,
    pub attack_target: Option<CharacterId>,
    pub location: Option<LocationId>,
    pub respawn_point: Option<LocationId>,
    pub dead: bool,
    pub drunk: f64,
    /// Turns of invisibility remaining.
    pub invisible: u32,
    pub narration: NarrationStyle,
    pub encounter: EncounterPolicy,
    pub respawn_delay: Option<u32>,
    pub respawn_countdown: Option<u32>,
    #[serde(skip)]
    actions: BTreeMap<String, Action>,
}

impl Character {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(id),
            name: name.into(),
            description: String::new(),
            is_player: false,
            attributes: Attributes::default(),
            vitals: Vitals::new(100.0, 0.0, 100.0),
            regen: Recovery::default(),
            base_armor: ArmorStats::default(),
            power: PowerOverride::default(),
            inventory: Container::new(),
            equipped: BTreeMap::new(),
            worn: Vec::new(),
            enemies: BTreeSet::new(),
            friends: BTreeSet::new(),
            attack_target: None,
            location: None,
            respawn_point: None,
            dead: false,
            drunk: 0.0,
            invisible: 0,
            narration: NarrationStyle::default(),
            encounter: EncounterPolicy::default(),
            respawn_delay: None,
            respawn_countdown: None,
            actions: BTreeMap::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_vitals(mut self, vitals: Vitals) -> Self {
        self.vitals = vitals;
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Subtract hp (saturating at zero) and report whether the character still lives.
    ///
    /// This only touches the pool; the world-level death transition is
    /// [`World::take_damage`](crate::world::World::take_damage).
    pub fn take_damage(&mut self, amount: f64) -> LifeState {
        self.vitals.hp.drain(amount);
        self.vitals.life_state()
    }

    pub fn recover(&mut self, amount: Recovery) {
        self.vitals.recover(amount);
    }

    pub fn apply_effect(&mut self, effect: &ItemEffect) {
        self.recover(effect.recover);
        self.drunk = (self.drunk + effect.drunk).max(0.0);
        self.invisible = self.invisible.max(effect.invisible);
    }

    /// Per-tick upkeep: regeneration, sobering up, invisibility wearing off.
    pub fn upkeep(&mut self) {
        if self.dead {
            return;
        }
        self.vitals.recover(self.regen);
        self.drunk = (self.drunk - 1.0).max(0.0);
        self.invisible = self.invisible.saturating_sub(1);
    }

    /// Put `item` in a weapon slot, acquiring it into the inventory first.
    pub fn equip(&mut self, slot: impl Into<String>, item: Item) {
        let handle = self.inventory.add(item);
        self.equipped.insert(slot.into(), handle);
    }

    /// Put an item already carried into a weapon slot. Returns its name.
    ///
    /// Among same-named items, one not already in another slot is preferred.
    pub fn wield(&mut self, slot: impl Into<String>, term: &str) -> Option<String> {
        let slot = slot.into();
        let candidates = self.inventory.matching(term);
        let item = candidates
            .iter()
            .find(|item| !self.equipped.iter().any(|(other, h)| *other != slot && *h == item.handle()))
            .or_else(|| candidates.first())?;
        let (handle, name) = (item.handle(), item.name.clone());
        self.equipped.insert(slot, handle);
        Some(name)
    }

    /// Wear a carried armor item. Returns its name.
    pub fn wear(&mut self, term: &str) -> Option<String> {
        let candidates: Vec<&Item> = self
            .inventory
            .matching(term)
            .into_iter()
            .filter(|item| item.armor.is_some())
            .collect();
        let item = candidates
            .iter()
            .find(|item| !self.worn.contains(&item.handle()))
            .or_else(|| candidates.first())?;
        let (handle, name) = (item.handle(), item.name.clone());
        if !self.worn.contains(&handle) {
            self.worn.push(handle);
        }
        Some(name)
    }

    /// Empty a slot (by slot name) or take off an item (by item name).
    /// Returns the name of the item put away.
    pub fn unequip(&mut self, term: &str) -> Option<String> {
        let term = term.trim().to_lowercase();
        let slot = self.equipped.contains_key(&term).then(|| term.clone()).or_else(|| {
            self.equipped()
                .find(|(_, item)| item.matches(&term))
                .map(|(slot, _)| slot.to_string())
        });
        if let Some(slot) = slot {
            let handle = self.equipped.remove(&slot)?;
            return self.inventory.by_handle(handle).map(|item| item.name.clone());
        }
        let idx = self
            .worn
            .iter()
            .position(|h| self.inventory.by_handle(*h).is_some_and(|item| item.matches(&term)))?;
        let handle = self.worn.remove(idx);
        self.inventory.by_handle(handle).map(|item| item.name.clone())
    }

    /// Occupied weapon slots in slot-name order, with the item each holds.
    pub fn equipped(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.equipped
            .iter()
            .filter_map(|(slot, handle)| self.inventory.by_handle(*handle).map(|item| (slot.as_str(), item)))
    }

    /// Slots holding this particular inventory entry.
    pub fn slots_holding(&self, item: &Item) -> Vec<&str> {
        self.equipped()
            .filter(|(_, held)| held.handle() == item.handle())
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn is_worn(&self, item: &Item) -> bool {
        self.worn.contains(&item.handle()) && self.inventory.by_handle(item.handle()).is_some()
    }

    pub fn weapon_in(&self, slot: &str) -> Option<&Item> {
        self.equipped.get(slot).and_then(|handle| self.inventory.by_handle(*handle))
    }

    /// The primary slot's weapon, else the first equipped one.
    pub fn primary_weapon(&self) -> Option<&Item> {
        self.weapon_in(PRIMARY_SLOT)
            .or_else(|| self.equipped().next().map(|(_, item)| item))
    }

    /// Slots to attack with this tick: one per occupied slot, or a single
    /// unarmed attack (`None`) when nothing is equipped.
    pub fn attack_slots(&self) -> Vec<Option<String>> {
        let slots: Vec<Option<String>> = self.equipped().map(|(slot, _)| Some(slot.to_string())).collect();
        if slots.is_empty() { vec![None] } else { slots }
    }

    /// Base armor plus every worn item still carried.
    pub fn armor(&self) -> ArmorStats {
        self.worn
            .iter()
            .filter_map(|handle| self.inventory.by_handle(*handle))
            .filter_map(|item| item.armor)
            .fold(self.base_armor, |total, piece| total + piece)
    }

    /// Remove items from the inventory, dropping any slot left pointing at nothing.
    pub fn remove_item(&mut self, term: &str, quantity: u32) -> Option<Item> {
        let item = self.inventory.remove(term, quantity)?;
        self.prune_equipment();
        Some(item)
    }

    pub fn prune_equipment(&mut self) {
        let inventory = &self.inventory;
        self.equipped.retain(|_, handle| inventory.by_handle(*handle).is_some());
        self.worn.retain(|handle| inventory.by_handle(*handle).is_some());
    }

    pub(crate) fn clear_equipment(&mut self) {
        self.equipped.clear();
        self.worn.clear();
    }

    pub fn is_enemy(&self, other: &CharacterId) -> bool {
        self.enemies.contains(other)
    }

    pub fn is_friend(&self, other: &CharacterId) -> bool {
        self.friends.contains(other)
    }

    /// Returns true if `other` was not already an enemy.
    pub fn add_enemy(&mut self, other: CharacterId) -> bool {
        self.friends.remove(&other);
        self.enemies.insert(other)
    }

    pub fn add_friend(&mut self, other: CharacterId) -> bool {
        self.enemies.remove(&other);
        self.friends.insert(other)
    }

    pub fn add_action(&mut self, name: impl Into<String>, action: Action) {
        self.actions.insert(name.into().to_lowercase(), action);
    }

    pub fn remove_action(&mut self, name: &str) -> Option<Action> {
        self.actions.remove(&name.to_lowercase())
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(&name.to_lowercase())
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{WeaponKind, WeaponStats};

    fn sword() -> Item {
        Item::new("sword", "").with_weapon(WeaponStats::new(WeaponKind::Blades, 0.0, 3.0, 0.0))
    }

    #[test]
    fn equip_acquires_without_duplicating() {
        let mut hero = Character::new("hero", "Hero");
        hero.equip(PRIMARY_SLOT, sword());
        assert_eq!(hero.inventory.len(), 1);
        assert_eq!(hero.primary_weapon().map(|w| w.name.as_str()), Some("sword"));

        assert_eq!(hero.wield("offhand", "sword").as_deref(), Some("sword"));
        assert_eq!(hero.inventory.len(), 1);
        assert_eq!(hero.attack_slots().len(), 2);
    }

    #[test]
    fn primary_falls_back_to_first_slot() {
        let mut hero = Character::new("hero", "Hero");
        hero.equip("left", sword());
        assert_eq!(hero.primary_weapon().map(|w| w.name.as_str()), Some("sword"));
    }

    #[test]
    fn nothing_equipped_means_one_unarmed_attack() {
        let hero = Character::new("hero", "Hero");
        assert_eq!(hero.attack_slots(), vec![None]);
        assert!(hero.primary_weapon().is_none());
    }

    #[test]
    fn dropping_an_equipped_item_prunes_its_slot() {
        let mut hero = Character::new("hero", "Hero");
        hero.equip(PRIMARY_SLOT, sword());
        let dropped = hero.remove_item("sword", 1);
        assert!(dropped.is_some());
        assert!(hero.weapon_in(PRIMARY_SLOT).is_none());
        assert_eq!(hero.equipped().count(), 0);
    }

    #[test]
    fn same_named_weapons_keep_their_own_stats() {
        let mut hero = Character::new("hero", "Hero");
        hero.equip(
            PRIMARY_SLOT,
            Item::new("sword", "rusty").with_weapon(WeaponStats::new(WeaponKind::Blades, 0.0, 1.0, 0.0)),
        );
        hero.equip(
            "offhand",
            Item::new("sword", "fine").with_weapon(WeaponStats::new(WeaponKind::Blades, 0.0, 9.0, 0.0)),
        );
        assert_eq!(hero.inventory.len(), 2);
        let sharp = |slot: &str| hero.weapon_in(slot).map(|w| w.weapon_stats().sharp);
        assert_eq!(sharp(PRIMARY_SLOT), Some(1.0));
        assert_eq!(sharp("offhand"), Some(9.0));
    }

    #[test]
    fn dropping_one_of_two_same_named_weapons_clears_only_its_slot() {
        let mut hero = Character::new("hero", "Hero");
        hero.equip(PRIMARY_SLOT, Item::new("sword", "rusty").with_weapon(WeaponStats::default()));
        hero.equip(
            "offhand",
            Item::new("sword", "fine").with_weapon(WeaponStats::new(WeaponKind::Blades, 0.0, 9.0, 0.0)),
        );

        let dropped = hero.remove_item("sword", 1).map(|i| i.description);
        assert_eq!(dropped.as_deref(), Some("rusty"));
        assert!(hero.weapon_in(PRIMARY_SLOT).is_none());
        assert_eq!(hero.weapon_in("offhand").map(|w| w.description.as_str()), Some("fine"));
        assert_eq!(hero.attack_slots(), vec![Some("offhand".to_string())]);
        assert_eq!(hero.primary_weapon().map(|w| w.description.as_str()), Some("fine"));
    }

    #[test]
    fn wielding_prefers_a_free_instance() {
        let mut hero = Character::new("hero", "Hero");
        hero.inventory.add(Item::new("dagger", "left"));
        hero.inventory.add(Item::new("dagger", "right"));
        hero.wield("left", "dagger");
        hero.wield("right", "dagger");
        assert_eq!(hero.weapon_in("left").map(|w| w.description.as_str()), Some("left"));
        assert_eq!(hero.weapon_in("right").map(|w| w.description.as_str()), Some("right"));
        let dagger = hero.weapon_in("right").cloned().unwrap();
        assert_eq!(hero.slots_holding(&dagger), ["right"]);
    }

    #[test]
    fn unequip_by_slot_or_item_name() {
        let mut hero = Character::new("hero", "Hero");
        hero.equip(PRIMARY_SLOT, sword());
        assert_eq!(hero.unequip("SWORD").as_deref(), Some("sword"));
        hero.wield(PRIMARY_SLOT, "sword");
        assert_eq!(hero.unequip(PRIMARY_SLOT).as_deref(), Some("sword"));
        assert!(hero.unequip("nothing").is_none());
        assert_eq!(hero.inventory.len(), 1);
    }

    #[test]
    fn armor_sums_base_and_worn_pieces() {
        let mut hero = Character::new("hero", "Hero");
        hero.base_armor = ArmorStats::new(1.0, 1.0, 0.0);
        hero.inventory.add(Item::new("helm", "").with_armor(ArmorStats::new(2.0, 3.0, 1.0)));
        hero.inventory.add(Item::new("scarf", ""));

        assert!(hero.wear("scarf").is_none());
        assert_eq!(hero.wear("helm").as_deref(), Some("helm"));
        assert_eq!(hero.armor(), ArmorStats::new(3.0, 4.0, 1.0));

        hero.remove_item("helm", 1);
        assert_eq!(hero.armor(), ArmorStats::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn take_damage_reports_death_at_zero() {
        let mut rat = Character::new("rat", "Rat").with_vitals(Vitals::new(5.0, 0.0, 0.0));
        assert!(rat.take_damage(4.0).is_alive());
        assert!(rat.take_damage(1.0).is_dead());
        assert_eq!(rat.vitals.hp.display(), 0);
    }

    #[test]
    fn hp_increase_never_exceeds_max() {
        let mut hero = Character::new("hero", "Hero");
        hero.take_damage(10.0);
        hero.recover(Recovery::new(1000.0, 0.0, 0.0));
        assert_eq!(hero.vitals.hp.display(), 100);
    }

    #[test]
    fn upkeep_regenerates_and_decays_statuses() {
        let mut hero = Character::new("hero", "Hero");
        hero.take_damage(10.0);
        hero.regen = Recovery::new(0.5, 0.0, 0.0);
        hero.drunk = 1.5;
        hero.invisible = 1;

        hero.upkeep();
        assert_eq!(hero.vitals.hp.display(), 90);
        hero.upkeep();
        assert_eq!(hero.vitals.hp.display(), 91);
        assert!(hero.drunk.abs() < f64::EPSILON);
        assert_eq!(hero.invisible, 0);
    }

    #[test]
    fn effects_recover_and_set_statuses() {
        let mut hero = Character::new("hero", "Hero");
        hero.take_damage(20.0);
        hero.invisible = 5;
        hero.apply_effect(&ItemEffect {
            recover: Recovery::new(5.0, 0.0, 0.0),
            drunk: 3.0,
            invisible: 2,
            message: None,
        });
        assert_eq!(hero.vitals.hp.display(), 85);
        assert!((hero.drunk - 3.0).abs() < f64::EPSILON);
        assert_eq!(hero.invisible, 5);
    }

    #[test]
    fn action_table_registration() {
        let mut hero = Character::new("hero", "Hero");
        hero.add_action("Dance", Action::Emote { text: "You dance.".into() });
        assert!(hero.action("dance").is_some());
        assert_eq!(hero.action_names().collect::<Vec<_>>(), ["dance"]);
        assert!(hero.remove_action("DANCE").is_some());
        assert!(hero.action("dance").is_none());
    }

    #[test]
    fn befriending_an_enemy_moves_them_between_sets() {
        let mut hero = Character::new("hero", "Hero");
        let wolf = CharacterId::new("wolf");
        assert!(hero.add_enemy(wolf.clone()));
        assert!(!hero.add_enemy(wolf.clone()));
        hero.add_friend(wolf.clone());
        assert!(hero.is_friend(&wolf));
        assert!(!hero.is_enemy(&wolf));
    }
}
