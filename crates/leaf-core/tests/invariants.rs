//! Long operation sequences checked against the slot bookkeeping after every
//! step.

use leaf_core::PageOptions;
use leaf_testing::prelude::*;

const GROUPS: [&str; 3] = ["root", "alt", "modal"];

/// Small linear congruential generator so sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

fn check(harness: &LeafHarness, step: &str) {
    for group in GROUPS {
        if harness.group(group).is_some() {
            assert_indices_match_slots(harness, group, step);
            assert_cached_scalars(harness, group, step);
        }
    }
    assert_single_membership(harness, &GROUPS, step);
}

fn run_sequence(seed: u64, steps: usize) {
    let mut harness = LeafHarness::with_views(&[("root", 1), ("alt", 2), ("modal", 3)]);
    let mut rng = Lcg(seed);
    let names: Vec<String> = (0..12).map(|i| format!("p{i}")).collect();

    for step in 0..steps {
        let name = &names[rng.below(names.len() as u64) as usize];
        let group = GROUPS[rng.below(GROUPS.len() as u64) as usize];
        let label = format!("seed {seed} step {step}");

        match rng.below(5) {
            0 => {
                let level = rng.below(6) as u32;
                let _ = harness.try_open(
                    PageOptions::new(name.as_str())
                        .with_group(group)
                        .with_level(level),
                );
            }
            1 => {
                let _ = harness.tear(name, group);
            }
            2 => {
                let _ = harness.tape(name, group);
            }
            3 => {
                if harness.page_state(name).is_some() {
                    harness.transfer(name, group).unwrap();
                }
            }
            _ => {
                harness.cascade(group).unwrap();
            }
        }
        check(&harness, &label);
    }
}

#[test]
fn bookkeeping_survives_mixed_operations() {
    for seed in [1, 7, 42, 1234, 98765] {
        run_sequence(seed, 200);
    }
}

#[test]
fn cascade_twice_changes_nothing() {
    let mut harness = LeafHarness::with_views(&[("root", 4)]);
    for (name, level) in [("a", 3), ("b", 0), ("c", 3), ("d", 1)] {
        harness.open_with(PageOptions::new(name).with_level(level));
    }
    harness.tear("b", None).unwrap();

    harness.cascade(None).unwrap();
    let first: Vec<_> = harness
        .pages()
        .map(|(name, page)| (name.to_string(), page.clone()))
        .collect();
    harness.cascade(None).unwrap();
    let second: Vec<_> = harness
        .pages()
        .map(|(name, page)| (name.to_string(), page.clone()))
        .collect();

    assert_eq!(first, second);
}
