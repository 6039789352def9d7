//! Browser document adapter.
//!
//! [`WebDom`] implements [`Dom`] over `web-sys`, handing out [`ElementId`]s
//! that index a table of the elements it has seen.

use std::cell::RefCell;

use leaf_core::{Dom, DomError, ElementId, Leaf, LeafConfig, Selector};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleSheet, Document, Element, HtmlElement, HtmlStyleElement};

pub struct WebDom {
    document: Document,
    elements: RefCell<Vec<Element>>,
}

impl WebDom {
    /// Adapter over the document of the global window.
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no global window exists")?;
        let document = window.document().ok_or("should have a document on window")?;
        Ok(Self::from_document(document))
    }

    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            elements: RefCell::new(Vec::new()),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The element behind a handle.
    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.elements.borrow().get(id).cloned()
    }

    fn register(&self, element: Element) -> ElementId {
        let mut elements = self.elements.borrow_mut();
        if let Some(id) = elements.iter().position(|known| known == &element) {
            return id;
        }
        elements.push(element);
        elements.len() - 1
    }

    fn require(&self, id: ElementId) -> Result<Element, DomError> {
        self.element(id).ok_or(DomError::MissingElement { id })
    }
}

fn js_error(value: JsValue) -> DomError {
    DomError::Backend(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

impl Dom for WebDom {
    fn create_element(&mut self, tag: &str) -> Result<ElementId, DomError> {
        let element = self.document.create_element(tag).map_err(js_error)?;
        Ok(self.register(element))
    }

    fn query(&self, selector: &Selector) -> Option<ElementId> {
        match self.document.query_selector(&selector.to_string()) {
            Ok(found) => found.map(|element| self.register(element)),
            Err(err) => {
                log::debug!("query `{}` failed: {:?}", selector, err);
                None
            }
        }
    }

    fn head(&self) -> Result<ElementId, DomError> {
        let head = self
            .document
            .head()
            .ok_or_else(|| DomError::Backend("document has no head".into()))?;
        Ok(self.register(head.into()))
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        let parent = self.require(parent)?;
        let child = self.require(child)?;
        parent.append_child(&child).map_err(js_error)?;
        Ok(())
    }

    fn remove_child(&mut self, parent_id: ElementId, child_id: ElementId) -> Result<(), DomError> {
        let parent = self.require(parent_id)?;
        let child = self.require(child_id)?;
        if child.parent_element().as_ref() != Some(&parent) {
            return Err(DomError::NotAChild {
                parent: parent_id,
                child: child_id,
            });
        }
        parent.remove_child(&child).map_err(js_error)?;
        Ok(())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)?.get_attribute(name)
    }

    fn set_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        self.require(element)?
            .set_attribute(name, value)
            .map_err(js_error)
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) -> Result<(), DomError> {
        self.require(element)?
            .remove_attribute(name)
            .map_err(js_error)
    }

    fn add_class(&mut self, element: ElementId, class: &str) -> Result<(), DomError> {
        self.require(element)?
            .class_list()
            .add_1(class)
            .map_err(js_error)
    }

    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<(), DomError> {
        self.require(element)?
            .class_list()
            .remove_1(class)
            .map_err(js_error)
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.element(element)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn set_style_property(
        &mut self,
        element: ElementId,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let element = self.require(element)?;
        let html = element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| DomError::Backend("element has no inline style".into()))?;
        html.style().set_property(property, value).map_err(js_error)
    }

    fn has_style_sheet(&self, style: ElementId) -> bool {
        self.element(style)
            .and_then(|element| element.dyn_into::<HtmlStyleElement>().ok())
            .and_then(|style| style.sheet())
            .is_some()
    }

    fn insert_rule(&mut self, style: ElementId, rule: &str, index: u32) -> Result<(), DomError> {
        let sheet = self
            .require(style)?
            .dyn_into::<HtmlStyleElement>()
            .ok()
            .and_then(|style| style.sheet())
            .and_then(|sheet| sheet.dyn_into::<CssStyleSheet>().ok())
            .ok_or_else(|| DomError::RuleRejected {
                rule: rule.to_string(),
                reason: "element has no css style sheet".into(),
            })?;
        sheet
            .insert_rule_with_index(rule, index)
            .map_err(|err| DomError::RuleRejected {
                rule: rule.to_string(),
                reason: format!("{:?}", err),
            })?;
        Ok(())
    }
}

/// Boots a registry over the global window's document.
pub fn boot_window(config: LeafConfig) -> Result<Leaf<WebDom>, JsValue> {
    let dom = WebDom::new()?;
    Leaf::booted(dom, config).map_err(|err| JsValue::from_str(&err.to_string()))
}
