use indexmap::IndexMap;
use log::debug;

use crate::collections::map::HashMap;
use crate::config::LeafConfig;
use crate::dom::{Dom, ElementId, Selector};
use crate::error::LeafError;
use crate::page::{Page, PageOptions, ResolveOptions};
use crate::resolver::{check_range, resolve_slot, undo_placement, Placement};
use crate::slot_table::{Group, GroupState, Slot};
use crate::style;

pub(crate) const ATTR_NAME: &str = "name";
pub(crate) const ATTR_GROUP: &str = "group";
pub(crate) const ATTR_LEVEL: &str = "level";
pub(crate) const ATTR_INDEX: &str = "index";
pub(crate) const ATTR_STYLE: &str = "style";
pub(crate) const Z_INDEX: &str = "z-index";

/// Registry of pages and the groups that stack them.
///
/// All state lives here rather than in globals, so independent registries
/// can share a process (or a test binary) without interfering. Every
/// operation other than [`Leaf::boot`] requires the registry to be booted.
pub struct Leaf<D: Dom> {
    pub(crate) dom: D,
    pub(crate) config: LeafConfig,
    pub(crate) pages: IndexMap<String, Page>,
    pub(crate) groups: HashMap<String, Group>,
    style: Option<ElementId>,
    booted: bool,
}

impl<D: Dom> Leaf<D> {
    pub fn new(dom: D, config: LeafConfig) -> Self {
        Self {
            dom,
            config,
            pages: IndexMap::new(),
            groups: HashMap::default(),
            style: None,
            booted: false,
        }
    }

    /// Creates a registry and boots it.
    pub fn booted(dom: D, config: LeafConfig) -> Result<Self, LeafError> {
        let mut leaf = Self::new(dom, config);
        leaf.boot()?;
        Ok(leaf)
    }

    /// One-time setup: registers the root group, locates or creates the
    /// global `<style>` element and inserts the page and hidden rules.
    ///
    /// Calling it again is a no-op. A `<style>` element that exists without a
    /// usable sheet is an error; a rule the sheet refuses is only logged.
    pub fn boot(&mut self) -> Result<&mut Self, LeafError> {
        if self.booted {
            return Ok(self);
        }

        self.groups
            .entry(self.config.root_group.clone())
            .or_default();

        let name = self.config.style_name.clone();
        let style = match self.dom.query(&Selector::tag("style").with_class(&name)) {
            Some(style) => {
                if !self.dom.has_style_sheet(style) {
                    return Err(LeafError::StyleSheetMissing { name });
                }
                style
            }
            None => {
                let style = self.dom.create_element("style")?;
                self.dom.set_attribute(style, ATTR_NAME, &name)?;
                self.dom.add_class(style, &name)?;
                let head = self.dom.head()?;
                self.dom.append_child(head, style)?;
                style
            }
        };

        for rule in style::global_rules(&self.config) {
            if let Err(err) = self.dom.insert_rule(style, &rule, 0) {
                debug!("unexpected error when inserting rule `{rule}`: {err}");
            }
        }

        self.style = Some(style);
        self.booted = true;
        debug!("booted with root group {}", self.config.root_group);
        Ok(self)
    }

    pub fn is_booted(&self) -> bool {
        self.booted
    }

    /// The `<style>` element holding the global rules, once booted.
    pub fn style_element(&self) -> Option<ElementId> {
        self.style
    }

    /// Returns the element of page `name`, creating the page when it does
    /// not exist yet.
    ///
    /// A new page is placed in its group through [`Leaf::resolve_group`] with
    /// the requested level, appended to the group's view and left hidden.
    /// An existing page is returned untouched, whatever the options say.
    pub fn page(&mut self, options: impl Into<PageOptions>) -> Result<ElementId, LeafError> {
        self.ensure_booted()?;
        let options = options.into();
        let name = options.name;
        if name.is_empty() {
            return Err(LeafError::NameNotSpecified);
        }
        if let Some(page) = self.pages.get(&name) {
            return Ok(page.element);
        }

        let group = self.group_name(options.group.as_deref())?;
        let view = self.view(&group)?;
        if self.is_member(&group, &name)
            || self.dom.query(&self.page_selector(&group, &name)).is_some()
        {
            return Err(LeafError::AlreadyInGroup { name, group });
        }
        if let Some(level) = options.level {
            check_range("level", u64::from(level), self.config.max_level)?;
        }

        let element = self.dom.create_element(&self.config.page_tag)?;
        self.dom.add_class(element, &self.config.page_class)?;
        self.dom.set_attribute(element, ATTR_NAME, &name)?;
        self.dom.add_class(element, &name)?;
        self.dom.set_attribute(element, ATTR_GROUP, &group)?;
        self.dom.add_class(element, &group)?;
        self.dom
            .set_attribute(element, ATTR_STYLE, &style::page_inline_style())?;

        let mut record = Page::new(element);
        record.group = Some(group.clone());
        self.pages.insert(name.clone(), record);

        let resolved = self.resolve_group(ResolveOptions {
            name: name.clone(),
            group: Some(group.clone()),
            page: Some(element),
            level: options.level,
            index: None,
        });
        if let Err(err) = resolved {
            self.pages.shift_remove(&name);
            if let Some(record) = self.groups.get_mut(&group) {
                if record.table.clear_name(&name).is_some() {
                    record.refresh();
                }
            }
            return Err(err);
        }

        self.dom.add_class(element, &self.config.hidden_class)?;
        self.dom.append_child(view, element)?;
        debug!("created page {name} in {group}");
        Ok(element)
    }

    /// Finds a slot for a page in a group and records it on the page.
    ///
    /// When no page is registered under `options.name`, `options.page` is
    /// registered for it. The page's level, index and `z-index` (view depth
    /// times slot) are updated, as are those of an occupant moved aside.
    /// When either depth would exceed the maximum, the slot table is put
    /// back as it was and nothing is written.
    pub fn resolve_group(&mut self, options: ResolveOptions) -> Result<Placement, LeafError> {
        self.ensure_booted()?;
        let ResolveOptions {
            name,
            group,
            page,
            level,
            index,
        } = options;
        if name.is_empty() {
            return Err(LeafError::NameNotSpecified);
        }
        let group = self.group_name(group.as_deref())?;
        let view = self.view(&group)?;
        let view_depth = self.view_depth(view);

        let mut registered = false;
        match self.pages.get(&name) {
            Some(existing) => {
                if let Some(other) = existing.group.as_deref() {
                    if other != group && self.is_member(other, &name) {
                        return Err(LeafError::AlreadyInGroup {
                            group: other.to_string(),
                            name,
                        });
                    }
                }
            }
            None => {
                let element = page.ok_or_else(|| LeafError::PageNotFound { name: name.clone() })?;
                self.pages.insert(name.clone(), Page::new(element));
                registered = true;
            }
        }

        let max = self.config.max_level;
        let record = self.groups.entry(group.clone()).or_default();
        let previous = record.table.slot_of(&name);
        let placement = match resolve_slot(record, &group, &name, level, index, max) {
            Ok(placement) => placement,
            Err(err) => {
                if registered {
                    self.pages.shift_remove(&name);
                }
                return Err(err);
            }
        };

        // Both depths are checked before either page is touched.
        let depths = self.depth(view_depth, placement.slot).and_then(|depth| {
            let moved = placement
                .displaced
                .as_ref()
                .map(|moved| self.depth(view_depth, moved.to))
                .transpose()?;
            Ok((depth, moved))
        });
        let (depth, moved_depth) = match depths {
            Ok(depths) => depths,
            Err(err) => {
                if let Some(record) = self.groups.get_mut(&group) {
                    undo_placement(record, &name, &placement, previous);
                }
                if registered {
                    self.pages.shift_remove(&name);
                }
                return Err(err);
            }
        };

        if let (Some(moved), Some(moved_depth)) = (&placement.displaced, moved_depth) {
            self.apply_slot(&moved.name, moved.to, moved_depth)?;
        }

        if let Some(page) = self.pages.get_mut(&name) {
            page.group = Some(group);
        }
        self.apply_slot(&name, placement.slot, depth)?;
        Ok(placement)
    }

    /// Unhides a page and restores its `z-index` from its level. Unknown
    /// names are logged and ignored.
    pub fn show(&mut self, name: &str) -> Result<&mut Self, LeafError> {
        self.ensure_booted()?;
        let Some(page) = self.pages.get_mut(name) else {
            debug!("cannot find page {name}");
            return Ok(self);
        };
        page.hidden = false;
        let element = page.element;
        let placed = page.group.clone().zip(page.level);

        self.dom.remove_class(element, &self.config.hidden_class)?;
        if let Some((group, level)) = placed {
            let view = self.view(&group)?;
            let depth = self.depth(self.view_depth(view), level)?;
            self.dom
                .set_style_property(element, Z_INDEX, &depth.to_string())?;
            if let Some(page) = self.pages.get_mut(name) {
                page.depth = Some(depth);
            }
        }
        Ok(self)
    }

    /// Hides a page. Unknown names are logged and ignored.
    pub fn hide(&mut self, name: &str) -> Result<&mut Self, LeafError> {
        self.ensure_booted()?;
        let Some(page) = self.pages.get_mut(name) else {
            debug!("cannot find page {name}");
            return Ok(self);
        };
        page.hidden = true;
        let element = page.element;
        self.dom.add_class(element, &self.config.hidden_class)?;
        Ok(self)
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn into_dom(self) -> D {
        self.dom
    }

    pub fn config(&self) -> &LeafConfig {
        &self.config
    }

    pub fn page_state(&self, name: &str) -> Option<&Page> {
        self.pages.get(name)
    }

    /// Registered pages in creation order.
    pub fn pages(&self) -> impl Iterator<Item = (&str, &Page)> + '_ {
        self.pages.iter().map(|(name, page)| (name.as_str(), page))
    }

    pub fn group(&self, group: &str) -> Option<&Group> {
        self.groups.get(group)
    }

    pub fn group_state(&self, group: &str) -> Option<GroupState> {
        self.groups.get(group).map(Group::state)
    }

    /// `(slot, page)` pairs of a group in ascending slot order.
    pub fn slots(&self, group: &str) -> Vec<(Slot, String)> {
        self.groups
            .get(group)
            .map(|record| {
                record
                    .table
                    .iter()
                    .map(|(slot, name)| (slot, name.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn ensure_booted(&self) -> Result<(), LeafError> {
        if self.booted {
            Ok(())
        } else {
            Err(LeafError::NotBooted)
        }
    }

    /// Explicit group name, or the root group when none is given.
    pub(crate) fn group_name(&self, group: Option<&str>) -> Result<String, LeafError> {
        match group {
            Some("") => Err(LeafError::GroupNotSpecified),
            Some(group) => Ok(group.to_string()),
            None => Ok(self.config.root_group.clone()),
        }
    }

    pub(crate) fn view(&self, group: &str) -> Result<ElementId, LeafError> {
        self.dom
            .query(&Selector::tag(&self.config.view_tag).with_class(group))
            .ok_or_else(|| LeafError::ViewNotFound {
                group: group.to_string(),
            })
    }

    /// Multiplier from the view's `level` attribute; 0 when absent.
    pub(crate) fn view_depth(&self, view: ElementId) -> u64 {
        self.dom
            .attribute(view, ATTR_LEVEL)
            .and_then(|level| level.trim().parse::<u64>().ok())
            .unwrap_or(0)
    }

    pub(crate) fn depth(&self, view_depth: u64, slot: Slot) -> Result<u64, LeafError> {
        let max = self.config.max_level;
        let depth = view_depth
            .checked_mul(u64::from(slot))
            .ok_or(LeafError::OutOfRange {
                what: "depth",
                value: u64::MAX,
                max,
            })?;
        check_range("depth", depth, max)?;
        Ok(depth)
    }

    pub(crate) fn is_member(&self, group: &str, name: &str) -> bool {
        self.groups
            .get(group)
            .is_some_and(|record| record.table.contains_name(name))
    }

    pub(crate) fn page_selector(&self, group: &str, name: &str) -> Selector {
        Selector::tag(&self.config.page_tag)
            .with_class(name)
            .child_of(Selector::tag(&self.config.view_tag).with_class(group))
    }

    /// Records `slot` as both level and index of `name` and writes the
    /// matching attributes and `z-index`.
    pub(crate) fn apply_slot(
        &mut self,
        name: &str,
        slot: Slot,
        depth: u64,
    ) -> Result<(), LeafError> {
        let page = self
            .pages
            .get_mut(name)
            .ok_or_else(|| LeafError::PageNotFound {
                name: name.to_string(),
            })?;
        page.level = Some(slot);
        page.index = Some(slot);
        page.depth = Some(depth);
        let element = page.element;

        let slot = slot.to_string();
        self.dom.set_attribute(element, ATTR_LEVEL, &slot)?;
        self.dom.set_attribute(element, ATTR_INDEX, &slot)?;
        self.dom
            .set_style_property(element, Z_INDEX, &depth.to_string())?;
        Ok(())
    }
}
