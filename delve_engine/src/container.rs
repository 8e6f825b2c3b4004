//! Ordered item storage shared by locations and character inventories.

use serde::{Deserialize, Serialize};

use crate::item::Item;

/// Identifies one entry of a [`Container`] for as long as it stays there.
///
/// Handles are never reused within a container, so a stale handle simply
/// stops resolving once its entry leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemHandle(u32);

/// An ordered collection of item stacks. Insertion order is display order.
///
/// Fungible items sharing a name occupy at most one entry; non-fungible
/// items occupy one entry per instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    items: Vec<Item>,
    #[serde(default)]
    next_handle: u32,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, merging it into an existing stack when fungible.
    /// Returns the handle of the entry now holding it.
    pub fn add(&mut self, mut item: Item) -> ItemHandle {
        if let Some(stack) = self.items.iter_mut().find(|held| held.stacks_with(&item)) {
            stack.set_quantity(stack.quantity().saturating_add(item.quantity()));
            return stack.handle();
        }
        self.next_handle += 1;
        let handle = ItemHandle(self.next_handle);
        item.set_handle(handle);
        self.items.push(item);
        handle
    }

    /// Add every item from an iterator, merging stacks as they arrive.
    pub fn extend(&mut self, items: impl IntoIterator<Item = Item>) {
        for item in items {
            self.add(item);
        }
    }

    /// Remove up to `quantity` of the first entry matching `term`.
    ///
    /// Asking for at least the whole stack (or any amount of a non-fungible
    /// item) removes the entry and returns it intact.
    pub fn remove(&mut self, term: &str, quantity: u32) -> Option<Item> {
        let idx = self.position(term)?;
        let held = &mut self.items[idx];
        if held.fungible && quantity < held.quantity() {
            let mut split = held.clone();
            held.set_quantity(held.quantity() - quantity);
            split.set_quantity(quantity);
            Some(split)
        } else {
            Some(self.items.remove(idx))
        }
    }

    /// Remove the whole entry matching `term`.
    pub fn remove_all(&mut self, term: &str) -> Option<Item> {
        let idx = self.position(term)?;
        Some(self.items.remove(idx))
    }

    /// Move up to `quantity` of an item from this container into `other`.
    /// Returns a copy of what was moved.
    pub fn transfer_to(&mut self, other: &mut Container, term: &str, quantity: u32) -> Option<Item> {
        let moved = self.remove(term, quantity)?;
        let receipt = moved.clone();
        other.add(moved);
        Some(receipt)
    }

    /// Empty the container, yielding every entry in order.
    pub fn drain(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }

    pub fn find(&self, term: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.matches(term))
    }

    /// The entry behind `handle`, if it is still here.
    pub fn by_handle(&self, handle: ItemHandle) -> Option<&Item> {
        self.items.iter().find(|item| item.handle() == handle)
    }

    /// Every entry `term` could mean: exact names first, else substring matches.
    pub fn matching(&self, term: &str) -> Vec<&Item> {
        let exact: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| item.name.eq_ignore_ascii_case(term.trim()))
            .collect();
        if exact.is_empty() {
            self.items.iter().filter(|item| item.matches(term)).collect()
        } else {
            exact
        }
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Exact-name matches are preferred over substring matches.
    fn position(&self, term: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.name.eq_ignore_ascii_case(term.trim()))
            .or_else(|| self.items.iter().position(|item| item.matches(term)))
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
