//! World graph and character registry.
//!
//! [`World`] owns every location and character. Characters refer to locations
//! (and to each other) by id, so a location's presence list and a character's
//! `location` field are kept in step here rather than by the callers.

use std::collections::{BTreeMap, HashMap};

use gametools::Spinner;
use log::{debug, info, warn};

use crate::character::Character;
use crate::error::WorldError;
use crate::idgen::{CharacterId, LocationId};
use crate::location::{Location, PendingLocation};
use crate::spinners::{SpinnerType, default_spinners};
use crate::vitals::LifeState;

#[derive(Debug, Clone)]
pub struct World {
    pub title: String,
    pub intro: String,
    pub locations: BTreeMap<LocationId, Location>,
    /// Iteration order is the turn order.
    pub characters: BTreeMap<CharacterId, Character>,
    pub player: CharacterId,
    pub spinners: HashMap<SpinnerType, Spinner<String>>,
    pub tick_count: u64,
}

impl World {
    pub fn character(&self, id: &CharacterId) -> Result<&Character, WorldError> {
        self.characters
            .get(id)
            .ok_or_else(|| WorldError::UnknownCharacter(id.clone()))
    }

    pub fn character_mut(&mut self, id: &CharacterId) -> Result<&mut Character, WorldError> {
        self.characters
            .get_mut(id)
            .ok_or_else(|| WorldError::UnknownCharacter(id.clone()))
    }

    pub fn location(&self, id: &LocationId) -> Result<&Location, WorldError> {
        self.locations
            .get(id)
            .ok_or_else(|| WorldError::UnknownLocation(id.clone()))
    }

    pub fn location_mut(&mut self, id: &LocationId) -> Result<&mut Location, WorldError> {
        self.locations
            .get_mut(id)
            .ok_or_else(|| WorldError::UnknownLocation(id.clone()))
    }

    pub fn player(&self) -> Result<&Character, WorldError> {
        self.character(&self.player)
    }

    pub fn player_mut(&mut self) -> Result<&mut Character, WorldError> {
        let id = self.player.clone();
        self.character_mut(&id)
    }

    /// Where a character currently stands.
    pub fn location_of(&self, id: &CharacterId) -> Result<&Location, WorldError> {
        let loc_id = self
            .character(id)?
            .location
            .as_ref()
            .ok_or_else(|| WorldError::Nowhere(id.clone()))?;
        self.location(loc_id)
    }

    pub fn player_location(&self) -> Result<&Location, WorldError> {
        self.location_of(&self.player)
    }

    /// True if a living player stands in `location`. Narration is only
    /// produced where someone can see it.
    pub fn observer_present(&self, location: &LocationId) -> bool {
        self.characters
            .get(&self.player)
            .is_some_and(|p| p.is_alive() && p.location.as_ref() == Some(location))
    }

    /// True if both characters exist and stand in the same location.
    pub fn co_located(&self, a: &CharacterId, b: &CharacterId) -> bool {
        match (self.characters.get(a), self.characters.get(b)) {
            (Some(a), Some(b)) => a.location.is_some() && a.location == b.location,
            _ => false,
        }
    }

    /// Living characters in a location, excluding `except`.
    pub fn others_in(&self, location: &LocationId, except: &CharacterId) -> Vec<CharacterId> {
        self.locations
            .get(location)
            .map(|loc| {
                loc.characters()
                    .iter()
                    .filter(|id| *id != except)
                    .filter(|id| self.characters.get(*id).is_some_and(Character::is_alive))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Move a character's membership to `dest`, returning where it was.
    ///
    /// This is bookkeeping only; use [`crate::encounter::relocate`] for a move
    /// that should trigger encounters.
    pub fn place(&mut self, id: &CharacterId, dest: &LocationId) -> Result<Option<LocationId>, WorldError> {
        self.location(dest)?;
        let previous = self.character_mut(id)?.location.replace(dest.clone());
        if let Some(prev) = &previous
            && prev != dest
        {
            self.location_mut(prev)?.exit(id);
        }
        self.location_mut(dest)?.enter(id.clone());
        Ok(previous)
    }

    /// Drain hp and run the death transition if the pool hits zero.
    pub fn take_damage(&mut self, id: &CharacterId, amount: f64) -> Result<LifeState, WorldError> {
        let character = self.character_mut(id)?;
        let already_dead = character.dead;
        let state = character.take_damage(amount);
        if state.is_dead() && !already_dead {
            self.kill(id)?;
        }
        Ok(state)
    }

    /// Death transition: the body leaves the location, its possessions stay
    /// behind, and nobody keeps aiming at it.
    pub fn kill(&mut self, id: &CharacterId) -> Result<(), WorldError> {
        let character = self.character_mut(id)?;
        let location = character.location.take();
        let possessions = character.inventory.drain();
        character.clear_equipment();
        character.vitals.hp.set(0.0);
        character.dead = true;
        character.attack_target = None;
        if location.is_some() {
            character.respawn_point = location.clone();
        }
        character.respawn_countdown = character.respawn_delay;
        info!("{} ({id}) died", character.name);

        match &location {
            Some(loc_id) => {
                let loc = self.location_mut(loc_id)?;
                loc.exit(id);
                loc.items.extend(possessions);
            },
            None if !possessions.is_empty() => {
                warn!("{id} died outside any location; {} item(s) lost", possessions.len());
            },
            None => {},
        }

        for other in self.characters.values_mut() {
            if other.attack_target.as_ref() == Some(id) {
                debug!("{} loses its target {id}", other.id);
                other.attack_target = None;
            }
        }
        Ok(())
    }

    /// Bring a dead character back with full pools and clear statuses.
    ///
    /// Returns the respawn point; placing the character there is up to
    /// [`crate::encounter::respawn`].
    pub fn revive(&mut self, id: &CharacterId) -> Result<LocationId, WorldError> {
        let character = self.character_mut(id)?;
        let point = character
            .respawn_point
            .clone()
            .or_else(|| character.location.clone())
            .ok_or_else(|| WorldError::Nowhere(id.clone()))?;
        character.vitals.refill();
        character.dead = false;
        character.drunk = 0.0;
        character.invisible = 0;
        character.respawn_countdown = None;
        Ok(point)
    }

    /// A random line from a spinner, or `default` if it's missing.
    pub fn spin(&self, spinner: SpinnerType, default: &str) -> String {
        self.spinners
            .get(&spinner)
            .and_then(Spinner::spin)
            .unwrap_or_else(|| default.to_string())
    }
}

/// Collects locations and characters, then resolves the graph in one pass.
#[derive(Debug, Default)]
pub struct WorldBuilder {
    title: String,
    intro: String,
    pending: Vec<PendingLocation>,
    characters: Vec<(Character, String)>,
    player: Option<CharacterId>,
    spinners: HashMap<SpinnerType, Spinner<String>>,
}

impl WorldBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            spinners: default_spinners(),
            ..Self::default()
        }
    }

    pub fn intro(&mut self, intro: impl Into<String>) -> &mut Self {
        self.intro = intro.into();
        self
    }

    pub fn add_location(&mut self, location: PendingLocation) -> &mut Self {
        self.pending.push(location);
        self
    }

    /// Register a character standing at the location with raw id `at`.
    pub fn add_character(&mut self, character: Character, at: impl Into<String>) -> &mut Self {
        self.characters.push((character, at.into()));
        self
    }

    pub fn player(&mut self, id: impl Into<String>) -> &mut Self {
        self.player = Some(CharacterId::new(id));
        self
    }

    pub fn spinner(&mut self, kind: SpinnerType, spinner: Spinner<String>) -> &mut Self {
        self.spinners.insert(kind, spinner);
        self
    }

    /// Resolve every exit and placement. Any dangling reference fails the
    /// whole build.
    pub fn build(self) -> Result<World, WorldError> {
        let mut ids = Vec::with_capacity(self.pending.len());
        for pending in &self.pending {
            if ids.contains(&pending.id) {
                return Err(WorldError::DuplicateLocation(pending.id.clone()));
            }
            ids.push(pending.id.clone());
        }

        let mut locations = BTreeMap::new();
        for pending in self.pending {
            let mut exits = BTreeMap::new();
            for (direction, raw) in &pending.adjacent {
                let target = LocationId::new(raw.as_str());
                if !ids.contains(&target) {
                    return Err(WorldError::UnresolvedExit {
                        from: pending.id.clone(),
                        direction: *direction,
                        to: raw.clone(),
                    });
                }
                exits.insert(*direction, target);
            }
            locations.insert(pending.id.clone(), Location::resolved(pending, exits));
        }

        let player = self.player.ok_or(WorldError::MissingPlayer)?;
        let mut characters = BTreeMap::new();
        for (mut character, at) in self.characters {
            let at = LocationId::new(at);
            let loc = locations
                .get_mut(&at)
                .ok_or_else(|| WorldError::UnknownLocation(at.clone()))?;
            if characters.contains_key(&character.id) {
                return Err(WorldError::DuplicateCharacter(character.id));
            }
            loc.enter(character.id.clone());
            character.is_player = character.id == player;
            character.location = Some(at.clone());
            character.respawn_point = Some(at);
            characters.insert(character.id.clone(), character);
        }
        if !characters.contains_key(&player) {
            return Err(WorldError::MissingPlayer);
        }

        info!(
            "built world '{}': {} locations, {} characters",
            self.title,
            locations.len(),
            characters.len()
        );
        Ok(World {
            title: self.title,
            intro: self.intro,
            locations,
            characters,
            player,
            spinners: self.spinners,
            tick_count: 0,
        })
    }
}
