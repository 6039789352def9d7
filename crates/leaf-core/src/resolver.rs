//! Slot selection for a page entering a group.
//!
//! The requested level is the slot the page wants. When it is taken, the
//! current occupant is pushed out to a vacancy found by probing upward from
//! the group's remembered high-water mark (`last_index`), and the newcomer
//! takes the requested slot. The high-water mark is only a hint: it is raised
//! to the requested level, then clamped to the first free slot before probing
//! starts, and it is recomputed from the table once the page is placed.

use log::trace;

use crate::error::LeafError;
use crate::slot_table::{Group, Slot};

/// Occupant moved out of the way during placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Displacement {
    pub name: String,
    pub from: Slot,
    pub to: Slot,
}

/// Outcome of [`resolve_slot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub slot: Slot,
    pub displaced: Option<Displacement>,
}

/// Fails with [`LeafError::OutOfRange`] when `value` exceeds `max`.
pub fn check_range(what: &'static str, value: u64, max: u32) -> Result<(), LeafError> {
    if value > u64::from(max) {
        return Err(LeafError::OutOfRange { what, value, max });
    }
    Ok(())
}

/// Places `name` into `group`, moving at most one occupant.
///
/// `level` overrides `index`; with neither the page lands on the group's
/// cached free slot. A page already in the table is taken out first so it
/// never holds two slots. On success the group's cached scalars are
/// recomputed. A probe that runs past `max` fails with
/// [`LeafError::GroupFull`] before anything moves, and a page that was
/// already a member keeps its old slot.
pub fn resolve_slot(
    group: &mut Group,
    group_name: &str,
    name: &str,
    level: Option<Slot>,
    index: Option<Slot>,
    max: u32,
) -> Result<Placement, LeafError> {
    if let Some(index) = index {
        check_range("index", u64::from(index), max)?;
    }
    if let Some(level) = level {
        check_range("level", u64::from(level), max)?;
    }

    let previous = group.table.clear_name(name);
    if previous.is_some() {
        group.refresh();
    }

    match place(group, group_name, name, level, index, max) {
        Ok(placement) => Ok(placement),
        Err(err) => {
            if let Some(slot) = previous {
                group.table.set(slot, name);
                group.refresh();
            }
            Err(err)
        }
    }
}

/// Reverts a placement made by [`resolve_slot`]: `name` leaves its new slot,
/// the displaced occupant moves back and `name` regains `previous`.
pub(crate) fn undo_placement(
    group: &mut Group,
    name: &str,
    placement: &Placement,
    previous: Option<Slot>,
) {
    group.table.clear_name(name);
    if let Some(moved) = &placement.displaced {
        group.table.relocate(moved.to, moved.from);
    }
    if let Some(slot) = previous {
        group.table.set(slot, name);
    }
    group.refresh();
}

fn place(
    group: &mut Group,
    group_name: &str,
    name: &str,
    level: Option<Slot>,
    index: Option<Slot>,
    max: u32,
) -> Result<Placement, LeafError> {
    let full = || LeafError::GroupFull {
        group: group_name.to_string(),
    };

    let mut group_index = index.unwrap_or(group.free_index);
    // The given level overrides the group index.
    group_index = level.unwrap_or(group_index);
    if group_index > max {
        return Err(full());
    }

    let mut last_index = group.last_index.max(group_index);
    let first_free = group.table.first_free_index();
    if last_index > first_free {
        last_index = first_free;
    }

    let mut displaced = None;
    while group.table.is_occupied(group_index) {
        if last_index <= group_index || group.table.is_occupied(last_index) {
            last_index = last_index.checked_add(1).ok_or_else(full)?;
        }

        if last_index > max {
            return Err(full());
        }

        if !group.table.is_occupied(last_index) && last_index > group_index {
            if let Some(moved) = group.table.relocate(group_index, last_index) {
                trace!("{group_name}: moved {moved} from {group_index} to {last_index}");
                displaced = Some(Displacement {
                    name: moved.to_string(),
                    from: group_index,
                    to: last_index,
                });
            }
        }
    }

    group.table.set(group_index, name);
    group.refresh();
    trace!(
        "{group_name}: placed {name} at {group_index} (free {}, last {})",
        group.free_index,
        group.last_index
    );

    Ok(Placement {
        slot: group_index,
        displaced,
    })
}
