//! Document abstraction consumed by the page registry.
//!
//! The registry never touches a browser directly. Everything it needs from a
//! document (creating elements, locating views, toggling classes, writing the
//! `z-index` of a page) goes through the [`Dom`] trait, so the same
//! slot-resolution code runs against [`MemoryDom`](crate::MemoryDom) in tests
//! and against `web-sys` in the browser.

use std::fmt;

/// Handle to an element owned by a [`Dom`] backend.
pub type ElementId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    MissingElement { id: ElementId },
    NotAChild { parent: ElementId, child: ElementId },
    RuleRejected { rule: String, reason: String },
    Backend(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::MissingElement { id } => write!(f, "element {id} missing"),
            DomError::NotAChild { parent, child } => {
                write!(f, "element {child} is not a child of {parent}")
            }
            DomError::RuleRejected { rule, reason } => {
                write!(f, "style rule `{rule}` rejected: {reason}")
            }
            DomError::Backend(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for DomError {}

/// Structural selector of the form `tag.class` optionally scoped to a direct
/// parent, e.g. `section.root > div.menu`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub tag: String,
    pub class: Option<String>,
    pub parent: Option<Box<Selector>>,
}

impl Selector {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class: None,
            parent: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Restricts the match to direct children of elements matching `parent`.
    pub fn child_of(mut self, parent: Selector) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = &self.parent {
            write!(f, "{parent} > ")?;
        }
        f.write_str(&self.tag)?;
        if let Some(class) = &self.class {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

/// Document operations required by [`Leaf`](crate::Leaf).
pub trait Dom {
    fn create_element(&mut self, tag: &str) -> Result<ElementId, DomError>;

    /// First element in document order matching `selector`.
    fn query(&self, selector: &Selector) -> Option<ElementId>;

    fn head(&self) -> Result<ElementId, DomError>;

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError>;
    fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;
    fn set_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), DomError>;
    fn remove_attribute(&mut self, element: ElementId, name: &str) -> Result<(), DomError>;

    fn add_class(&mut self, element: ElementId, class: &str) -> Result<(), DomError>;
    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<(), DomError>;
    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn set_style_property(
        &mut self,
        element: ElementId,
        property: &str,
        value: &str,
    ) -> Result<(), DomError>;

    /// Whether `style` is a `<style>` element with an attached style sheet.
    fn has_style_sheet(&self, style: ElementId) -> bool;

    /// Inserts `rule` into the sheet of `style` at position `index`.
    fn insert_rule(&mut self, style: ElementId, rule: &str, index: u32) -> Result<(), DomError>;
}
