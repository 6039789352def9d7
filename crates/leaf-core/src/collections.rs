//! Map type used for name-keyed tables.
//!
//! Page and group names are short strings hashed on every lookup, so the
//! default build uses `FxHashMap`. Enable the `std-hash` feature to fall back
//! to the SipHash maps from `std`.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::HashMap;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::FxHashMap as HashMap;
}
