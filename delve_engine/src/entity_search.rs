//! Entity Search Module
//!
//! Handlers need to turn a fragment of player input into a nearby character or
//! item. Matching is case-insensitive; an exact name beats a partial one, and a
//! character may also be named by its id or the template it was spawned from.

use thiserror::Error;

use crate::character::Character;
use crate::container::Container;
use crate::idgen::{CharacterId, LocationId, template_of};
use crate::item::Item;
use crate::world::World;

/// Where to look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchScope<'a> {
    /// Items lying in a location.
    Ground(&'a LocationId),
    /// Items carried by a character.
    Carried(&'a CharacterId),
    /// Ground first, then the player's pack.
    Nearby(&'a LocationId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("nothing here matches '{0}'")]
    NoMatchingName(String),
    #[error("'{0}' is not a place")]
    InvalidLocation(LocationId),
    #[error("'{0}' is not a character")]
    InvalidCharacter(CharacterId),
}

/// Find a living character other than the player at `location`.
pub fn find_character(world: &World, pattern: &str, location: &LocationId) -> Result<CharacterId, SearchError> {
    let loc = world
        .locations
        .get(location)
        .ok_or_else(|| SearchError::InvalidLocation(location.clone()))?;
    let candidates: Vec<&Character> = loc
        .characters()
        .iter()
        .filter(|id| **id != world.player)
        .filter_map(|id| world.characters.get(id))
        .filter(|c| c.is_alive())
        .collect();

    let lower = pattern.to_lowercase();
    let exact = candidates
        .iter()
        .find(|c| c.name.to_lowercase() == lower || c.id.as_str() == lower || template_of(&c.id) == lower);
    exact
        .or_else(|| candidates.iter().find(|c| c.name.to_lowercase().contains(&lower)))
        .map(|c| c.id.clone())
        .ok_or_else(|| SearchError::NoMatchingName(pattern.to_string()))
}

/// Find an item in scope, returning a reference to it.
pub fn find_item<'w>(world: &'w World, pattern: &str, scope: SearchScope<'_>) -> Result<&'w Item, SearchError> {
    let found = match scope {
        SearchScope::Ground(location) => ground(world, location)?.find(pattern),
        SearchScope::Carried(id) => carried(world, id)?.find(pattern),
        SearchScope::Nearby(location) => ground(world, location)?
            .find(pattern)
            .or_else(|| carried(world, &world.player).ok().and_then(|c| c.find(pattern))),
    };
    found.ok_or_else(|| SearchError::NoMatchingName(pattern.to_string()))
}

fn ground<'w>(world: &'w World, location: &LocationId) -> Result<&'w Container, SearchError> {
    world
        .locations
        .get(location)
        .map(|loc| &loc.items)
        .ok_or_else(|| SearchError::InvalidLocation(location.clone()))
}

fn carried<'w>(world: &'w World, id: &CharacterId) -> Result<&'w Container, SearchError> {
    world
        .characters
        .get(id)
        .map(|c| &c.inventory)
        .ok_or_else(|| SearchError::InvalidCharacter(id.clone()))
}
