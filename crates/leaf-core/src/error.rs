use std::fmt;

use crate::dom::DomError;

/// Errors raised by page, group and view operations.
///
/// Every variant is fatal to the call that produced it. Diagnostics that the
/// library treats as non-fatal (showing an unknown page, cascading an unknown
/// group) are logged instead of being returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafError {
    NotBooted,
    NameNotSpecified,
    GroupNotSpecified,
    PageNotFound { name: String },
    ViewNotFound { group: String },
    AlreadyInGroup { name: String, group: String },
    NotInGroup { name: String, group: String },
    /// The page still records a group and must be torn before it is taped.
    NotTorn { name: String, group: String },
    OutOfRange { what: &'static str, value: u64, max: u32 },
    GroupFull { group: String },
    StyleSheetMissing { name: String },
    Dom(DomError),
}

impl LeafError {
    /// True for the range family: out-of-bounds levels, indices or depths
    /// and exhausted groups.
    pub fn is_range(&self) -> bool {
        matches!(self, LeafError::OutOfRange { .. } | LeafError::GroupFull { .. })
    }
}

impl fmt::Display for LeafError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafError::NotBooted => write!(f, "leaf is not booted"),
            LeafError::NameNotSpecified => write!(f, "name not specified"),
            LeafError::GroupNotSpecified => write!(f, "group not specified"),
            LeafError::PageNotFound { name } => write!(f, "page {name} does not exist"),
            LeafError::ViewNotFound { group } => write!(f, "view for group {group} does not exist"),
            LeafError::AlreadyInGroup { name, group } => {
                write!(f, "page {name} is already in group {group}")
            }
            LeafError::NotInGroup { name, group } => {
                write!(f, "page {name} is not in group {group}")
            }
            LeafError::NotTorn { name, group } => {
                write!(f, "page {name} is not yet torn from group {group}")
            }
            LeafError::OutOfRange { what, value, max } => {
                write!(f, "{what} {value} exceeds maximum {max}")
            }
            LeafError::GroupFull { group } => write!(f, "group {group} is full"),
            LeafError::StyleSheetMissing { name } => {
                write!(f, "cannot find style sheet for style.{name}")
            }
            LeafError::Dom(err) => write!(f, "dom: {err}"),
        }
    }
}

impl std::error::Error for LeafError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeafError::Dom(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomError> for LeafError {
    fn from(err: DomError) -> Self {
        LeafError::Dom(err)
    }
}
