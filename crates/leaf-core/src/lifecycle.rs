//! Moving pages in and out of groups.

use log::debug;
use smallvec::SmallVec;

use crate::dom::{Dom, DomError};
use crate::error::LeafError;
use crate::leaf::{Leaf, ATTR_GROUP, ATTR_INDEX, ATTR_LEVEL};
use crate::page::ResolveOptions;
use crate::slot_table::Slot;

impl<D: Dom> Leaf<D> {
    /// Rewrites level, index and `z-index` of every page in a group from the
    /// slot it occupies, lowest slot first.
    ///
    /// A group without recorded pages is logged and left alone.
    pub fn cascade<'a>(
        &mut self,
        group: impl Into<Option<&'a str>>,
    ) -> Result<&mut Self, LeafError> {
        self.ensure_booted()?;
        let group = self.group_name(group.into())?;
        let view = self.view(&group)?;
        let view_depth = self.view_depth(view);

        let Some(record) = self.groups.get(&group) else {
            debug!("cannot find group {group}");
            return Ok(self);
        };
        let entries: SmallVec<[(Slot, String); 8]> = record
            .table
            .iter()
            .map(|(slot, name)| (slot, name.to_string()))
            .collect();

        for (slot, name) in entries {
            let depth = self.depth(view_depth, slot)?;
            self.apply_slot(&name, slot, depth)?;
        }
        Ok(self)
    }

    /// Removes a page from its group, detaches it from the view and hides it.
    ///
    /// The view of `group` must exist. When the page is not in `group` but is
    /// in the group it records, that group is used instead. The group is cascaded before the page leaves,
    /// and the slot it vacated stays empty.
    pub fn tear<'a>(
        &mut self,
        name: &str,
        group: impl Into<Option<&'a str>>,
    ) -> Result<&mut Self, LeafError> {
        self.ensure_booted()?;
        if name.is_empty() {
            return Err(LeafError::NameNotSpecified);
        }
        let recorded = self
            .pages
            .get(name)
            .ok_or_else(|| LeafError::PageNotFound {
                name: name.to_string(),
            })?
            .group
            .clone();

        let mut group = self.group_name(group.into())?;
        let mut view = self.view(&group)?;
        if !self.is_member(&group, name) {
            if let Some(recorded) = recorded {
                if self.is_member(&recorded, name) {
                    view = self.view(&recorded)?;
                    group = recorded;
                }
            }
        }
        if !self.is_member(&group, name) {
            return Err(LeafError::NotInGroup {
                name: name.to_string(),
                group,
            });
        }

        self.cascade(group.as_str())?;

        if let Some(record) = self.groups.get_mut(&group) {
            record.table.clear_name(name);
            record.refresh();
        }

        let element = match self.pages.get_mut(name) {
            Some(page) => {
                page.group = None;
                page.level = None;
                page.index = None;
                page.element
            }
            None => {
                return Err(LeafError::PageNotFound {
                    name: name.to_string(),
                })
            }
        };
        self.dom.remove_attribute(element, ATTR_GROUP)?;
        self.dom.remove_attribute(element, ATTR_LEVEL)?;
        self.dom.remove_attribute(element, ATTR_INDEX)?;
        self.dom.remove_class(element, &group)?;

        match self.dom.remove_child(view, element) {
            Err(DomError::NotAChild { .. }) => {
                debug!("page {name} was not attached to view {group}");
            }
            other => other?,
        }

        self.hide(name)?;
        debug!("tore {name} from {group}");
        Ok(self)
    }

    /// Adds a torn page to a group at the group's first free slot, appends it
    /// to the view and hides it.
    pub fn tape<'a>(
        &mut self,
        name: &str,
        group: impl Into<Option<&'a str>>,
    ) -> Result<&mut Self, LeafError> {
        self.ensure_booted()?;
        if name.is_empty() {
            return Err(LeafError::NameNotSpecified);
        }
        let page = self.pages.get(name).ok_or_else(|| LeafError::PageNotFound {
            name: name.to_string(),
        })?;
        let element = page.element;
        let recorded = page.group.clone();

        let group = self.group_name(group.into())?;
        let view = self.view(&group)?;

        if let Some(recorded) = recorded {
            return Err(LeafError::NotTorn {
                name: name.to_string(),
                group: recorded,
            });
        }
        if self.is_member(&group, name)
            || self.dom.query(&self.page_selector(&group, name)).is_some()
        {
            return Err(LeafError::AlreadyInGroup {
                name: name.to_string(),
                group,
            });
        }

        self.groups.entry(group.clone()).or_default();
        self.cascade(group.as_str())?;

        if let Some(page) = self.pages.get_mut(name) {
            page.group = Some(group.clone());
        }
        self.dom.set_attribute(element, ATTR_GROUP, &group)?;
        self.dom.add_class(element, &group)?;

        self.resolve_group(ResolveOptions::new(name).with_group(group.as_str()))?;

        self.dom.append_child(view, element)?;
        self.hide(name)?;
        debug!("taped {name} into {group}");
        Ok(self)
    }

    /// Tears a page from its current group, tapes it into `group` and
    /// cascades the destination. A page that is already torn is only taped.
    pub fn transfer<'a>(
        &mut self,
        name: &str,
        group: impl Into<Option<&'a str>>,
    ) -> Result<&mut Self, LeafError> {
        self.ensure_booted()?;
        if name.is_empty() {
            return Err(LeafError::NameNotSpecified);
        }
        let target = self.group_name(group.into())?;
        self.view(&target)?;

        let current = self
            .pages
            .get(name)
            .ok_or_else(|| LeafError::PageNotFound {
                name: name.to_string(),
            })?
            .group
            .clone();

        if let Some(current) = current {
            self.tear(name, current.as_str())?;
        }
        self.tape(name, target.as_str())?;
        self.cascade(target.as_str())?;
        Ok(self)
    }
}
