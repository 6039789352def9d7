use crate::dom::{Dom, DomError, ElementId, Selector};

const ROOT: ElementId = 0;
const HEAD: ElementId = 1;
const BODY: ElementId = 2;

struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    style: Vec<(String, String)>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    /// Rules of an attached style sheet; `None` for elements without one.
    sheet: Option<Vec<String>>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            classes: Vec::new(),
            style: Vec::new(),
            parent: None,
            children: Vec::new(),
            sheet: tag.eq_ignore_ascii_case("style").then(Vec::new),
        }
    }
}

/// Element tree kept entirely in memory.
///
/// Starts with `html`, `head` and `body`. Queries only see elements attached
/// below the document root, as a browser's `querySelector` does.
pub struct MemoryDom {
    elements: Vec<Option<Element>>,
    reject_rules: bool,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        let mut root = Element::new("html");
        root.children = vec![HEAD, BODY];
        let mut head = Element::new("head");
        head.parent = Some(ROOT);
        let mut body = Element::new("body");
        body.parent = Some(ROOT);
        Self {
            elements: vec![Some(root), Some(head), Some(body)],
            reject_rules: false,
        }
    }

    /// Makes every subsequent [`Dom::insert_rule`] call fail.
    pub fn with_rule_failures(mut self) -> Self {
        self.reject_rules = true;
        self
    }

    pub fn body(&self) -> ElementId {
        BODY
    }

    /// Appends a `<section class="group" level="depth">` view under `body`.
    pub fn add_view(&mut self, group: &str, depth: u32) -> ElementId {
        let id = self.push(Element::new("section"));
        if let Some(view) = self.element_mut(id) {
            view.classes.push(group.to_string());
            view.attributes.push(("level".into(), depth.to_string()));
        }
        self.attach(BODY, id);
        id
    }

    /// Detaches or reattaches the style sheet of a `<style>` element.
    pub fn set_sheet_enabled(&mut self, style: ElementId, enabled: bool) {
        if let Some(element) = self.element_mut(style) {
            element.sheet = if enabled { Some(Vec::new()) } else { None };
        }
    }

    pub fn len(&self) -> usize {
        self.elements.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    pub fn classes(&self, id: ElementId) -> &[String] {
        self.element(id).map(|e| e.classes.as_slice()).unwrap_or(&[])
    }

    pub fn style_property(&self, id: ElementId, property: &str) -> Option<&str> {
        self.element(id)?
            .style
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn rules(&self, style: ElementId) -> &[String] {
        self.element(style)
            .and_then(|e| e.sheet.as_deref())
            .unwrap_or(&[])
    }

    pub fn dump_tree(&self) -> String {
        let mut output = String::new();
        self.dump_element(&mut output, ROOT, 0);
        output
    }

    fn dump_element(&self, output: &mut String, id: ElementId, depth: usize) {
        let indent = "  ".repeat(depth);
        let Some(element) = self.element(id) else {
            output.push_str(&format!("{}[{}] (missing)\n", indent, id));
            return;
        };
        output.push_str(&format!("{}[{}] {}", indent, id, element.tag));
        if !element.classes.is_empty() {
            output.push_str(&format!(".{}", element.classes.join(".")));
        }
        for (name, value) in &element.attributes {
            output.push_str(&format!(" {}={:?}", name, value));
        }
        if let Some(z) = self.style_property(id, "z-index") {
            output.push_str(&format!(" z={}", z));
        }
        output.push('\n');
        for &child in &element.children {
            self.dump_element(output, child, depth + 1);
        }
    }

    fn push(&mut self, element: Element) -> ElementId {
        let id = self.elements.len();
        self.elements.push(Some(element));
        id
    }

    fn attach(&mut self, parent: ElementId, child: ElementId) {
        if let Some(element) = self.element_mut(child) {
            element.parent = Some(parent);
        }
        if let Some(element) = self.element_mut(parent) {
            element.children.push(child);
        }
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id).and_then(Option::as_ref)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id).and_then(Option::as_mut)
    }

    fn require(&self, id: ElementId) -> Result<&Element, DomError> {
        self.element(id).ok_or(DomError::MissingElement { id })
    }

    fn require_mut(&mut self, id: ElementId) -> Result<&mut Element, DomError> {
        self.element_mut(id).ok_or(DomError::MissingElement { id })
    }

    fn matches(&self, id: ElementId, selector: &Selector) -> bool {
        let Some(element) = self.element(id) else {
            return false;
        };
        if !element.tag.eq_ignore_ascii_case(&selector.tag) {
            return false;
        }
        if let Some(class) = &selector.class {
            if !element.classes.iter().any(|c| c == class) {
                return false;
            }
        }
        match &selector.parent {
            Some(parent) => element
                .parent
                .is_some_and(|parent_id| self.matches(parent_id, parent)),
            None => true,
        }
    }

    fn find(&self, id: ElementId, selector: &Selector) -> Option<ElementId> {
        if self.matches(id, selector) {
            return Some(id);
        }
        self.children(id)
            .iter()
            .find_map(|&child| self.find(child, selector))
    }

    fn contains(&self, ancestor: ElementId, mut id: ElementId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }
}

impl Dom for MemoryDom {
    fn create_element(&mut self, tag: &str) -> Result<ElementId, DomError> {
        Ok(self.push(Element::new(tag)))
    }

    fn query(&self, selector: &Selector) -> Option<ElementId> {
        self.find(ROOT, selector)
    }

    fn head(&self) -> Result<ElementId, DomError> {
        self.require(HEAD).map(|_| HEAD)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        self.require(parent)?;
        if self.contains(child, parent) {
            return Err(DomError::Backend(format!(
                "cannot append element {child} inside its own subtree"
            )));
        }
        if let Some(previous) = self.require(child)?.parent {
            self.require_mut(previous)?.children.retain(|&c| c != child);
        }
        self.attach(parent, child);
        Ok(())
    }

    fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        if self.require(child)?.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.require_mut(parent)?.children.retain(|&c| c != child);
        self.require_mut(child)?.parent = None;
        Ok(())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)?
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn set_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let attributes = &mut self.require_mut(element)?.attributes;
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) -> Result<(), DomError> {
        self.require_mut(element)?
            .attributes
            .retain(|(key, _)| key != name);
        Ok(())
    }

    fn add_class(&mut self, element: ElementId, class: &str) -> Result<(), DomError> {
        let classes = &mut self.require_mut(element)?.classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<(), DomError> {
        self.require_mut(element)?.classes.retain(|c| c != class);
        Ok(())
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.element(element)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    fn set_style_property(
        &mut self,
        element: ElementId,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let style = &mut self.require_mut(element)?.style;
        match style.iter_mut().find(|(name, _)| name == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => style.push((property.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn has_style_sheet(&self, style: ElementId) -> bool {
        self.element(style).is_some_and(|e| e.sheet.is_some())
    }

    fn insert_rule(&mut self, style: ElementId, rule: &str, index: u32) -> Result<(), DomError> {
        if self.reject_rules {
            return Err(DomError::RuleRejected {
                rule: rule.to_string(),
                reason: "rule insertion disabled".into(),
            });
        }
        let sheet = self
            .require_mut(style)?
            .sheet
            .as_mut()
            .ok_or_else(|| DomError::RuleRejected {
                rule: rule.to_string(),
                reason: "element has no style sheet".into(),
            })?;
        let index = index as usize;
        if index > sheet.len() {
            return Err(DomError::RuleRejected {
                rule: rule.to_string(),
                reason: format!("index {index} out of bounds"),
            });
        }
        sheet.insert(index, rule.to_string());
        Ok(())
    }
}
