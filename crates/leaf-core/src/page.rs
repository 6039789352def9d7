use crate::dom::ElementId;
use crate::slot_table::Slot;

/// Registry record of a page element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub(crate) element: ElementId,
    pub(crate) group: Option<String>,
    pub(crate) level: Option<Slot>,
    pub(crate) index: Option<Slot>,
    pub(crate) depth: Option<u64>,
    pub(crate) hidden: bool,
}

impl Page {
    pub(crate) fn new(element: ElementId) -> Self {
        Self {
            element,
            group: None,
            level: None,
            index: None,
            depth: None,
            hidden: true,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Group the page is taped into; `None` once torn.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn level(&self) -> Option<Slot> {
        self.level
    }

    pub fn index(&self) -> Option<Slot> {
        self.index
    }

    /// Last stacking value written to the element's `z-index`.
    pub fn depth(&self) -> Option<u64> {
        self.depth
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Arguments of [`Leaf::page`](crate::Leaf::page).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub name: String,
    pub level: Option<Slot>,
    pub group: Option<String>,
}

impl PageOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: Slot) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl From<&str> for PageOptions {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PageOptions {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Arguments of [`Leaf::resolve_group`](crate::Leaf::resolve_group).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub name: String,
    /// Defaults to the configured root group.
    pub group: Option<String>,
    /// Element to register under `name` when no page is registered yet.
    pub page: Option<ElementId>,
    pub level: Option<Slot>,
    pub index: Option<Slot>,
}

impl ResolveOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_page(mut self, page: ElementId) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_level(mut self, level: Slot) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_index(mut self, index: Slot) -> Self {
        self.index = Some(index);
        self
    }
}
