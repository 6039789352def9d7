//! Booted registries over an in-memory document.

use std::ops::{Deref, DerefMut};

use leaf_core::{
    Dom, ElementId, Leaf, LeafConfig, LeafError, MemoryDom, PageOptions, Selector, Slot,
};

/// A booted [`Leaf`] over [`MemoryDom`] with a set of views already mounted.
///
/// Dereferences to the registry, so every operation is available directly:
///
/// ```rust,ignore
/// let mut harness = LeafHarness::new();
/// harness.open("menu");
/// harness.tear("menu", None).unwrap();
/// ```
pub struct LeafHarness {
    leaf: Leaf<MemoryDom>,
}

impl Default for LeafHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl LeafHarness {
    /// Root view with depth 1.
    pub fn new() -> Self {
        Self::with_views(&[("root", 1)])
    }

    pub fn with_views(views: &[(&str, u32)]) -> Self {
        Self::with_config(views, LeafConfig::default())
    }

    pub fn with_config(views: &[(&str, u32)], config: LeafConfig) -> Self {
        let mut dom = MemoryDom::new();
        for &(group, depth) in views {
            dom.add_view(group, depth);
        }
        let leaf = match Leaf::booted(dom, config) {
            Ok(leaf) => leaf,
            Err(err) => panic!("harness failed to boot: {err}"),
        };
        Self { leaf }
    }

    /// Creates a page in the root group at its first free slot.
    pub fn open(&mut self, name: &str) -> ElementId {
        self.open_with(PageOptions::new(name))
    }

    pub fn open_at(&mut self, name: &str, level: Slot) -> ElementId {
        self.open_with(PageOptions::new(name).with_level(level))
    }

    pub fn open_in(&mut self, name: &str, group: &str) -> ElementId {
        self.open_with(PageOptions::new(name).with_group(group))
    }

    pub fn open_with(&mut self, options: PageOptions) -> ElementId {
        let name = options.name.clone();
        match self.leaf.page(options) {
            Ok(element) => element,
            Err(err) => panic!("failed to open page {name}: {err}"),
        }
    }

    pub fn try_open(&mut self, options: PageOptions) -> Result<ElementId, LeafError> {
        self.leaf.page(options)
    }

    /// Page names of a group in slot order.
    pub fn names(&self, group: &str) -> Vec<String> {
        self.leaf
            .slots(group)
            .into_iter()
            .map(|(_, name)| name)
            .collect()
    }

    /// The `z-index` written on the page element, parsed.
    pub fn z_index(&self, name: &str) -> Option<u64> {
        let element = self.leaf.page_state(name)?.element();
        self.leaf
            .dom()
            .style_property(element, "z-index")?
            .parse()
            .ok()
    }

    pub fn has_hidden_class(&self, name: &str) -> bool {
        let hidden = &self.leaf.config().hidden_class;
        self.leaf
            .page_state(name)
            .is_some_and(|page| self.leaf.dom().has_class(page.element(), hidden))
    }

    /// Whether the page element currently sits in the given group's view.
    pub fn is_attached_to(&self, name: &str, group: &str) -> bool {
        let Some(page) = self.leaf.page_state(name) else {
            return false;
        };
        let config = self.leaf.config();
        let view = self
            .leaf
            .dom()
            .query(&Selector::tag(&config.view_tag).with_class(group));
        view.is_some() && self.leaf.dom().parent(page.element()) == view
    }

    pub fn into_inner(self) -> Leaf<MemoryDom> {
        self.leaf
    }
}

impl Deref for LeafHarness {
    type Target = Leaf<MemoryDom>;

    fn deref(&self) -> &Self::Target {
        &self.leaf
    }
}

impl DerefMut for LeafHarness {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.leaf
    }
}
