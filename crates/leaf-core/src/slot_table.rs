//! Per-group slot storage.
//!
//! A group's pages are addressable both by name and by their integer slot.
//! The two directions are kept in separate maps and every mutation updates
//! both, so a name always resolves to the slot that holds it and vice versa.

use std::collections::BTreeMap;
use std::fmt;

use crate::collections::map::HashMap;

/// Integer position of a page within its group; doubles as stacking order.
pub type Slot = u32;

/// Lookup key accepted by [`SlotTable::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKey<'a> {
    Name(&'a str),
    Index(Slot),
}

impl From<Slot> for SlotKey<'_> {
    fn from(slot: Slot) -> Self {
        SlotKey::Index(slot)
    }
}

impl<'a> From<&'a str> for SlotKey<'a> {
    fn from(name: &'a str) -> Self {
        SlotKey::Name(name)
    }
}

#[derive(Default, Clone)]
pub struct SlotTable {
    slots: BTreeMap<Slot, String>,
    names: HashMap<String, Slot>,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the page stored under `key`, if any.
    pub fn get<'a>(&self, key: impl Into<SlotKey<'a>>) -> Option<&str> {
        match key.into() {
            SlotKey::Index(slot) => self.slots.get(&slot).map(String::as_str),
            SlotKey::Name(name) => self
                .names
                .get_key_value(name)
                .map(|(stored, _)| stored.as_str()),
        }
    }

    pub fn slot_of(&self, name: &str) -> Option<Slot> {
        self.names.get(name).copied()
    }

    pub fn is_occupied(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Stores `name` under `slot`, dropping whatever entries either key had.
    pub fn set(&mut self, slot: Slot, name: &str) {
        self.clear_name(name);
        self.clear(slot);
        self.slots.insert(slot, name.to_string());
        self.names.insert(name.to_string(), slot);
    }

    /// Frees `slot`, returning the name that occupied it.
    pub fn clear(&mut self, slot: Slot) -> Option<String> {
        let name = self.slots.remove(&slot)?;
        self.names.remove(&name);
        Some(name)
    }

    /// Removes `name` together with the slot it occupied.
    pub fn clear_name(&mut self, name: &str) -> Option<Slot> {
        let slot = self.names.remove(name)?;
        self.slots.remove(&slot);
        Some(slot)
    }

    /// Relocates the occupant of `from` into the free slot `to`.
    ///
    /// Returns the moved name, or `None` when `from` is empty or `to` is taken.
    pub fn relocate(&mut self, from: Slot, to: Slot) -> Option<&str> {
        if self.slots.contains_key(&to) {
            return None;
        }
        let name = self.slots.remove(&from)?;
        if let Some(slot) = self.names.get_mut(&name) {
            *slot = to;
        }
        let entry = self.slots.entry(to).or_insert(name);
        Some(entry.as_str())
    }

    /// Smallest slot with no occupant, scanning upward from 0.
    pub fn first_free_index(&self) -> Slot {
        let mut expected: Slot = 0;
        for &slot in self.slots.keys() {
            if slot != expected {
                break;
            }
            expected += 1;
        }
        expected
    }

    /// Largest occupied slot, or 0 for an empty table.
    pub fn highest_index(&self) -> Slot {
        self.slots.keys().next_back().copied().unwrap_or(0)
    }

    /// Occupied slots in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &str)> + '_ {
        self.slots.iter().map(|(&slot, name)| (slot, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for SlotTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.slots.iter()).finish()
    }
}

/// A group's slot table plus the two scalars cached from it.
#[derive(Debug, Default, Clone)]
pub struct Group {
    pub(crate) table: SlotTable,
    pub(crate) free_index: Slot,
    pub(crate) last_index: Slot,
}

/// Cached scalars of a group, as seen after its most recent mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupState {
    /// First unoccupied slot; where an append lands.
    pub free_index: Slot,
    /// Highest occupied slot.
    pub last_index: Slot,
    pub len: usize,
}

impl Group {
    pub fn table(&self) -> &SlotTable {
        &self.table
    }

    pub fn state(&self) -> GroupState {
        GroupState {
            free_index: self.free_index,
            last_index: self.last_index,
            len: self.table.len(),
        }
    }

    /// Recomputes both cached scalars from the table.
    pub(crate) fn refresh(&mut self) {
        self.free_index = self.table.first_free_index();
        self.last_index = self.table.highest_index();
    }
}
