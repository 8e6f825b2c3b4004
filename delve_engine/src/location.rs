//! Location definitions.
//!
//! Any place a character can stand is a `Location`, whether it's a closet or a
//! canyon. A location holds items and a presence list of characters; its
//! adjacency is fixed once the world graph is built.
//!
//! Construction is two-phase. A [`PendingLocation`] carries symbolic exits
//! (direction -> raw id) and can only become a [`Location`] through
//! [`WorldBuilder::build`](crate::world::WorldBuilder::build), which resolves
//! every exit against the full set of nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::container::Container;
use crate::idgen::{CharacterId, LocationId};

pub use delve_data::Direction;

/// A location whose exits have not been resolved yet.
#[derive(Debug, Clone)]
pub struct PendingLocation {
    pub id: LocationId,
    pub name: String,
    pub description: String,
    pub items: Container,
    /// direction -> raw destination id, checked during resolution
    pub adjacent: BTreeMap<Direction, String>,
}

impl PendingLocation {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: LocationId::new(id),
            name: name.into(),
            description: String::new(),
            items: Container::new(),
            adjacent: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare a one-way exit.
    pub fn exit(mut self, direction: Direction, to: impl Into<String>) -> Self {
        self.adjacent.insert(direction, to.into());
        self
    }
}

/// A resolved node of the world graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub description: String,
    pub items: Container,
    characters: Vec<CharacterId>,
    exits: BTreeMap<Direction, LocationId>,
}

impl Location {
    pub(crate) fn resolved(pending: PendingLocation, exits: BTreeMap<Direction, LocationId>) -> Self {
        Self {
            id: pending.id,
            name: pending.name,
            description: pending.description,
            items: pending.items,
            characters: Vec::new(),
            exits,
        }
    }

    /// Characters present, in arrival order.
    pub fn characters(&self) -> &[CharacterId] {
        &self.characters
    }

    pub fn is_present(&self, id: &CharacterId) -> bool {
        self.characters.contains(id)
    }

    /// Add a character to the presence list. Never touches adjacency.
    pub fn enter(&mut self, id: CharacterId) {
        if !self.is_present(&id) {
            self.characters.push(id);
        }
    }

    /// Remove a character from the presence list. Never touches adjacency.
    pub fn exit(&mut self, id: &CharacterId) {
        self.characters.retain(|present| present != id);
    }

    pub fn exits(&self) -> &BTreeMap<Direction, LocationId> {
        &self.exits
    }

    pub fn neighbor(&self, direction: Direction) -> Option<&LocationId> {
        self.exits.get(&direction)
    }
}
