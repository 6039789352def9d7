#![doc = r"Grouped page stacking: slot tables, index resolution and view lifecycle."]

pub mod collections;
pub mod config;
pub mod dom;
mod error;
mod leaf;
mod lifecycle;
mod memory_dom;
mod page;
pub mod resolver;
pub mod slot_table;
pub mod style;

pub use config::{LeafConfig, DEFAULT_MAX_LEVEL};
pub use dom::{Dom, DomError, ElementId, Selector};
pub use error::LeafError;
pub use leaf::Leaf;
pub use memory_dom::MemoryDom;
pub use page::{Page, PageOptions, ResolveOptions};
pub use resolver::{Displacement, Placement};
pub use slot_table::{Group, GroupState, Slot, SlotKey, SlotTable};

#[cfg(test)]
#[path = "tests/slot_table_tests.rs"]
mod slot_table_tests;

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod resolver_tests;

#[cfg(test)]
#[path = "tests/memory_dom_tests.rs"]
mod memory_dom_tests;

#[cfg(test)]
#[path = "tests/leaf_tests.rs"]
mod leaf_tests;
