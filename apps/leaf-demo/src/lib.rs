//! Scripted walk through the page lifecycle.

use anyhow::{Context, Result};
use leaf_core::{Leaf, LeafConfig, MemoryDom, PageOptions};
use log::info;

/// One named step of the walk and the slots it left behind.
pub struct Step {
    pub label: &'static str,
    pub root: Vec<(u32, String)>,
    pub alt: Vec<(u32, String)>,
}

/// Document with a `root` view (depth 1) and an `alt` view (depth 100).
pub fn demo_dom() -> MemoryDom {
    let mut dom = MemoryDom::new();
    dom.add_view("root", 1);
    dom.add_view("alt", 100);
    dom
}

fn record(leaf: &Leaf<MemoryDom>, label: &'static str) -> Step {
    let step = Step {
        label,
        root: leaf.slots("root"),
        alt: leaf.slots("alt"),
    };
    info!("{label}: root {:?} alt {:?}", step.root, step.alt);
    step
}

/// Runs the walk and returns the registry together with every step.
pub fn run(config: LeafConfig) -> Result<(Leaf<MemoryDom>, Vec<Step>)> {
    let mut leaf = Leaf::booted(demo_dom(), config).context("booting registry")?;
    let mut steps = Vec::new();

    leaf.page("a").context("creating a")?;
    leaf.page("b").context("creating b")?;
    steps.push(record(&leaf, "append a, b"));

    leaf.page(PageOptions::new("c").with_level(0))
        .context("creating c in front")?;
    steps.push(record(&leaf, "insert c at level 0"));

    leaf.tear("b", None)?.tape("b", None)?;
    steps.push(record(&leaf, "tear and tape b"));

    leaf.transfer("c", "alt")?.show("c")?;
    steps.push(record(&leaf, "transfer c to alt"));

    Ok((leaf, steps))
}
