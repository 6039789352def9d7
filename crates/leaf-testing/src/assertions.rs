//! Assertion utilities for page registries
//!
//! These helpers check the bookkeeping that must hold between operations:
//! slot contents, the per-page attributes derived from them, and what the
//! document shows.

use leaf_core::{Dom, Leaf, Slot};

/// Assert that a group holds exactly `expected` as `(slot, name)` pairs in
/// ascending slot order.
pub fn assert_slots<D: Dom>(leaf: &Leaf<D>, group: &str, expected: &[(Slot, &str)], msg: &str) {
    let actual = leaf.slots(group);
    let actual: Vec<(Slot, &str)> = actual.iter().map(|(s, n)| (*s, n.as_str())).collect();
    assert_eq!(
        actual, expected,
        "{}: slots of group {} differ",
        msg, group
    );
}

/// Assert that every occupied slot of a group holds a page whose recorded
/// level and index equal the slot key, and that the element attributes say
/// the same.
pub fn assert_indices_match_slots<D: Dom>(leaf: &Leaf<D>, group: &str, msg: &str) {
    for (slot, name) in leaf.slots(group) {
        let page = leaf
            .page_state(&name)
            .unwrap_or_else(|| panic!("{}: slot {} holds unregistered page {}", msg, slot, name));
        assert_eq!(
            page.index(),
            Some(slot),
            "{}: page {} index out of step with slot",
            msg,
            name
        );
        assert_eq!(
            page.level(),
            Some(slot),
            "{}: page {} level out of step with slot",
            msg,
            name
        );
        assert_eq!(
            page.group(),
            Some(group),
            "{}: page {} records another group",
            msg,
            name
        );
        let attribute = leaf.dom().attribute(page.element(), "index");
        assert_eq!(
            attribute,
            Some(slot.to_string()),
            "{}: index attribute of {} out of step with slot",
            msg,
            name
        );
    }
}

/// Assert that the cached free and last index of a group match a fresh scan
/// of its slot table.
pub fn assert_cached_scalars<D: Dom>(leaf: &Leaf<D>, group: &str, msg: &str) {
    let Some(record) = leaf.group(group) else {
        panic!("{}: group {} has no record", msg, group);
    };
    let state = record.state();
    assert_eq!(
        state.free_index,
        record.table().first_free_index(),
        "{}: cached free index of {} is stale",
        msg,
        group
    );
    assert_eq!(
        state.last_index,
        record.table().highest_index(),
        "{}: cached last index of {} is stale",
        msg,
        group
    );
}

/// Assert that no page name appears in more than one group's table.
pub fn assert_single_membership<D: Dom>(leaf: &Leaf<D>, groups: &[&str], msg: &str) {
    for (name, _) in leaf.pages() {
        let owners: Vec<&str> = groups
            .iter()
            .copied()
            .filter(|group| leaf.group(group).is_some_and(|g| g.table().contains_name(name)))
            .collect();
        assert!(
            owners.len() <= 1,
            "{}: page {} is a member of {:?}",
            msg,
            name,
            owners
        );
    }
}

/// Assert the recorded visibility of a page.
pub fn assert_hidden<D: Dom>(leaf: &Leaf<D>, name: &str, hidden: bool, msg: &str) {
    let page = leaf
        .page_state(name)
        .unwrap_or_else(|| panic!("{}: page {} not registered", msg, name));
    assert_eq!(
        page.is_hidden(),
        hidden,
        "{}: page {} visibility",
        msg,
        name
    );
}

/// Assert the last stacking value recorded for a page.
pub fn assert_depth<D: Dom>(leaf: &Leaf<D>, name: &str, expected: u64, msg: &str) {
    let depth = leaf.page_state(name).and_then(|page| page.depth());
    assert_eq!(depth, Some(expected), "{}: depth of {}", msg, name);
}
