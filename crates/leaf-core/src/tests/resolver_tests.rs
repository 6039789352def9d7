use super::*;
use crate::resolver::{check_range, resolve_slot, undo_placement};

const MAX: u32 = 16;

fn place(group: &mut Group, name: &str, level: Option<Slot>) -> Placement {
    resolve_slot(group, "root", name, level, None, MAX).expect("placement")
}

fn snapshot(group: &Group) -> Vec<(Slot, String)> {
    group
        .table()
        .iter()
        .map(|(slot, name)| (slot, name.to_string()))
        .collect()
}

#[test]
fn pages_without_level_append_in_order() {
    let mut group = Group::default();
    assert_eq!(place(&mut group, "a", None).slot, 0);
    assert_eq!(place(&mut group, "b", None).slot, 1);
    assert_eq!(place(&mut group, "c", None).slot, 2);
    assert_eq!(group.state().free_index, 3);
    assert_eq!(group.state().last_index, 2);
}

#[test]
fn requested_level_displaces_occupant_past_high_water_mark() {
    let mut group = Group::default();
    place(&mut group, "a", None);
    place(&mut group, "b", None);

    let placement = place(&mut group, "c", Some(0));

    assert_eq!(placement.slot, 0);
    assert_eq!(
        placement.displaced,
        Some(Displacement {
            name: "a".into(),
            from: 0,
            to: 2,
        })
    );
    assert_eq!(
        snapshot(&group),
        vec![(0, "c".into()), (1, "b".into()), (2, "a".into())]
    );
    assert_eq!(group.state().free_index, 3);
    assert_eq!(group.state().last_index, 2);
}

#[test]
fn level_into_a_free_slot_moves_nobody() {
    let mut group = Group::default();
    place(&mut group, "a", None);
    let placement = place(&mut group, "b", Some(4));
    assert_eq!(placement.slot, 4);
    assert_eq!(placement.displaced, None);
    assert_eq!(group.state().free_index, 1);
    assert_eq!(group.state().last_index, 4);
}

#[test]
fn high_water_mark_is_clamped_to_first_gap_before_probing() {
    let mut group = Group::default();
    group.table.set(0, "a");
    group.table.set(2, "b");
    group.refresh();

    let placement = place(&mut group, "c", Some(2));

    assert_eq!(placement.slot, 2);
    assert_eq!(
        placement.displaced,
        Some(Displacement {
            name: "b".into(),
            from: 2,
            to: 3,
        })
    );
    assert_eq!(group.state().free_index, 1);
    assert_eq!(group.state().last_index, 3);
}

#[test]
fn only_the_displaced_occupant_changes_slot() {
    let mut group = Group::default();
    for name in ["a", "b", "c", "d"] {
        place(&mut group, name, None);
    }
    let before = snapshot(&group);

    let placement = place(&mut group, "x", Some(1));
    let moved = placement.displaced.expect("slot 1 was taken");
    assert!(before.iter().all(|(_, name)| name != "x"));

    for (slot, name) in before {
        if name == moved.name {
            assert_eq!(group.table().slot_of(&name), Some(moved.to));
        } else {
            assert_eq!(group.table().slot_of(&name), Some(slot), "{name} moved");
        }
    }
    assert_eq!(group.table().get(1), Some("x"));
}

#[test]
fn requested_index_is_used_when_no_level_is_given() {
    let mut group = Group::default();
    let placement = resolve_slot(&mut group, "root", "x", None, Some(5), MAX).unwrap();
    assert_eq!(placement.slot, 5);
    assert_eq!(group.state().free_index, 0);
    assert_eq!(group.state().last_index, 5);

    assert_eq!(place(&mut group, "y", None).slot, 0);
}

#[test]
fn level_overrides_requested_index() {
    let mut group = Group::default();
    let placement = resolve_slot(&mut group, "root", "x", Some(3), Some(9), MAX).unwrap();
    assert_eq!(placement.slot, 3);
}

#[test]
fn level_at_maximum_succeeds_and_above_fails() {
    let mut group = Group::default();
    assert_eq!(place(&mut group, "top", Some(MAX)).slot, MAX);

    let err = resolve_slot(&mut group, "root", "over", Some(MAX + 1), None, MAX).unwrap_err();
    assert_eq!(
        err,
        LeafError::OutOfRange {
            what: "level",
            value: u64::from(MAX) + 1,
            max: MAX,
        }
    );

    let err = resolve_slot(&mut group, "root", "over", None, Some(MAX + 1), MAX).unwrap_err();
    assert!(err.is_range());
}

#[test]
fn exhausted_probe_reports_group_full() {
    let mut group = Group::default();
    for name in ["a", "b", "c"] {
        resolve_slot(&mut group, "tiny", name, None, None, 2).unwrap();
    }

    let err = resolve_slot(&mut group, "tiny", "d", Some(0), None, 2).unwrap_err();
    assert_eq!(err, LeafError::GroupFull { group: "tiny".into() });

    let err = resolve_slot(&mut group, "tiny", "d", None, None, 2).unwrap_err();
    assert_eq!(err, LeafError::GroupFull { group: "tiny".into() });
}

#[test]
fn occupied_maximum_slot_cannot_be_displaced() {
    let mut group = Group::default();
    resolve_slot(&mut group, "root", "a", Some(MAX), None, MAX).unwrap();
    let err = resolve_slot(&mut group, "root", "b", Some(MAX), None, MAX).unwrap_err();
    assert!(matches!(err, LeafError::GroupFull { .. }));
}

#[test]
fn resolving_a_member_again_moves_it_instead_of_duplicating() {
    let mut group = Group::default();
    place(&mut group, "a", None);
    place(&mut group, "b", None);

    let placement = place(&mut group, "a", Some(5));

    assert_eq!(placement.slot, 5);
    assert_eq!(group.table().len(), 2);
    assert!(!group.table().is_occupied(0));
    assert_eq!(group.state().free_index, 0);
}

#[test]
fn member_keeps_its_slot_when_group_is_full() {
    let mut group = Group::default();
    for name in ["a", "b", "c"] {
        resolve_slot(&mut group, "tiny", name, None, None, 2).unwrap();
    }

    let err = resolve_slot(&mut group, "tiny", "a", Some(1), None, 2).unwrap_err();

    assert_eq!(err, LeafError::GroupFull { group: "tiny".into() });
    assert_eq!(
        snapshot(&group),
        vec![(0, "a".into()), (1, "b".into()), (2, "c".into())]
    );
    assert_eq!(group.table().slot_of("a"), Some(0));
    assert_eq!(group.state().free_index, 3);
    assert_eq!(group.state().last_index, 2);
}

#[test]
fn undo_placement_restores_displaced_occupant() {
    let mut group = Group::default();
    place(&mut group, "a", None);
    place(&mut group, "b", None);
    let before = snapshot(&group);

    let placement = place(&mut group, "c", Some(0));
    undo_placement(&mut group, "c", &placement, None);

    assert_eq!(snapshot(&group), before);
    assert!(!group.table().contains_name("c"));
    assert_eq!(group.state().free_index, 2);
    assert_eq!(group.state().last_index, 1);
}

#[test]
fn undo_placement_returns_member_to_previous_slot() {
    let mut group = Group::default();
    place(&mut group, "a", None);
    place(&mut group, "b", None);

    // b moves from 1 to 0 and pushes a out to 1, the slot b just left.
    let placement = place(&mut group, "b", Some(0));
    assert_eq!(
        placement.displaced,
        Some(Displacement {
            name: "a".into(),
            from: 0,
            to: 1,
        })
    );
    undo_placement(&mut group, "b", &placement, Some(1));

    assert_eq!(snapshot(&group), vec![(0, "a".into()), (1, "b".into())]);
}

#[test]
fn check_range_is_inclusive() {
    assert!(check_range("depth", 10, 10).is_ok());
    assert!(check_range("depth", 11, 10).is_err());
}
