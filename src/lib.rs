//! # oset
//!
//! An insertion-ordered hash set for Rust.
//!
//! ## Overview
//!
//! [`OrderedSet`] offers average O(1) membership test, insertion and
//! removal while iterating its elements in the order they were first
//! inserted, forwards or backwards. It includes:
//!
//! - **Ordered set**: hash table with short linear probing, threaded by a
//!   doubly linked list over an entry arena
//! - **Cursors**: bidirectional forward and reverse cursors, including a
//!   mutable cursor that removes elements while walking
//! - **Pluggable hashing**: per-type hash trait, `BuildHasher` adapter,
//!   closures, and a runtime hash registry
//! - **Instance accounting**: a tracked integer type for leak detection
//!
//! ## Feature Flags
//!
//! - `accounting`: the [`accounting`] module (enabled by default)
//! - `serde`: `Serialize`/`Deserialize` for sets and their configuration
//! - `fxhash`: `FxDispatch` backed by `rustc-hash`
//! - `ahash`: `AHashDispatch` backed by `ahash`
//!
//! ## Example
//!
//! ```rust
//! use oset::prelude::*;
//!
//! let mut set = OrderedSet::new();
//! set.add("b");
//! set.add("a");
//! set.add("b");
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["b", "a"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use oset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SetConfig;
    pub use crate::cursor::{Cursor, CursorMut, Direction};
    pub use crate::hash::{BuildHasherDispatch, ElementHash, ElementHasher, HashDispatch};
    pub use crate::set::OrderedSet;

    #[cfg(feature = "accounting")]
    pub use crate::accounting::{InstanceLedger, Tracked};
}

pub mod config;
pub mod cursor;
pub mod error;
pub mod hash;
pub mod set;

#[cfg(feature = "accounting")]
pub mod accounting;

pub use set::OrderedSet;
