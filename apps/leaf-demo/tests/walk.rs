use leaf_core::LeafConfig;
use leaf_testing::prelude::*;

fn owned(entries: &[(u32, &str)]) -> Vec<(u32, String)> {
    entries
        .iter()
        .map(|&(slot, name)| (slot, name.to_string()))
        .collect()
}

#[test]
fn walk_records_each_stage() {
    let (leaf, steps) = leaf_demo::run(LeafConfig::default()).expect("walk");
    let labels: Vec<_> = steps.iter().map(|step| step.label).collect();
    assert_eq!(
        labels,
        [
            "append a, b",
            "insert c at level 0",
            "tear and tape b",
            "transfer c to alt"
        ]
    );

    assert_eq!(steps[1].root, owned(&[(0, "c"), (1, "b"), (2, "a")]));
    assert_eq!(steps[2].root, owned(&[(0, "c"), (1, "b"), (2, "a")]));
    assert_eq!(steps[3].root, owned(&[(1, "b"), (2, "a")]));
    assert_eq!(steps[3].alt, owned(&[(0, "c")]));

    assert_indices_match_slots(&leaf, "root", "after walk");
    assert_hidden(&leaf, "c", false, "c is shown in alt");
    assert_depth(&leaf, "c", 0, "first slot of alt");
}

#[test]
fn walk_fails_cleanly_when_levels_are_capped() {
    let result = leaf_demo::run(LeafConfig::new().with_max_level(1));
    let err = result.err().expect("level cap");
    assert!(format!("{err:#}").contains("is full"), "{err:#}");
}
