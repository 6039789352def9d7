//! Testing utilities and harness for leaf page registries

pub mod assertions;
pub mod harness;

pub use harness::*;

pub mod prelude {
    pub use crate::assertions;
    pub use crate::assertions::*;
    pub use crate::harness::*;
}
