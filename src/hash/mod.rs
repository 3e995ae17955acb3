//! Pluggable hashing for [`OrderedSet`](crate::OrderedSet).
//!
//! The set never hashes values itself. It asks a [`HashDispatch`]
//! implementation for a 64-bit hash and reduces it modulo the table
//! size to find the first slot of the probe window.
//!
//! - [`ElementHasher`] (the default) dispatches through the
//!   [`ElementHash`] trait, which is implemented for built-in scalars and
//!   strings using [`hash_integral`] and [`hash_bytes`]. A type without an
//!   `ElementHash` impl is rejected at compile time.
//! - [`BuildHasherDispatch`] adapts any [`BuildHasher`] so that every
//!   `std::hash::Hash` type can be stored. The `fxhash` and `ahash`
//!   features provide ready-made aliases.
//! - [`HashRegistry`] resolves hash functions per type at runtime and
//!   reports an error for types nobody registered.
//! - Any `Fn(&T) -> u64` closure is itself a dispatcher.
//!
//! Every dispatcher must be a pure function of the value and must agree
//! with equality: `a == b` implies equal hashes.
//!
//! # Examples
//!
//! ```rust
//! use oset::hash::{ElementHash, hash_integral};
//!
//! assert_eq!(42_u64.element_hash(), hash_integral(42));
//! assert_eq!("abc".element_hash(), String::from("abc").element_hash());
//! ```
//!
//! A type without a hash does not build with the default dispatcher:
//!
//! ```compile_fail
//! use oset::OrderedSet;
//!
//! #[derive(PartialEq, Eq)]
//! struct Point { x: i32, y: i32 }
//!
//! let mut set = OrderedSet::new();
//! set.add(Point { x: 1, y: 2 });
//! ```

mod registry;

pub use registry::HashRegistry;
pub use registry::RegisteredHasher;

use std::borrow::Cow;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;

// =============================================================================
// Reference hash functions
// =============================================================================

/// Mixes a 64-bit integer with the SplitMix64 finaliser.
///
/// # Examples
///
/// ```rust
/// use oset::hash::hash_integral;
///
/// assert_eq!(hash_integral(0), 0);
/// assert_ne!(hash_integral(1), hash_integral(2));
/// ```
#[inline]
#[must_use]
pub const fn hash_integral(value: u64) -> u64 {
    let mut mixed = value;
    mixed = (mixed ^ (mixed >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    mixed = (mixed ^ (mixed >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    mixed ^ (mixed >> 31)
}

/// Folds a byte string into a hash by shifting in one nibble per byte and
/// folding the top nibble of the low 32 bits back into bit 24.
///
/// # Examples
///
/// ```rust
/// use oset::hash::hash_bytes;
///
/// assert_eq!(hash_bytes(b""), 0);
/// assert_eq!(hash_bytes(b"a"), 0x61);
/// ```
#[inline]
#[must_use]
pub const fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0;
    let mut index = 0;
    while index < bytes.len() {
        hash = (hash << 4).wrapping_add(bytes[index] as u64);
        let high = hash & 0xF000_0000;
        if high != 0 {
            hash ^= high >> 24;
        }
        hash &= !high;
        index += 1;
    }
    hash
}

// =============================================================================
// ElementHash
// =============================================================================

/// Per-type hash used by the default dispatcher.
///
/// Implementations must agree with `Eq`.
pub trait ElementHash {
    /// Returns the hash of `self`.
    fn element_hash(&self) -> u64;
}

macro_rules! impl_element_hash_for_integral {
    ($($integral:ty),* $(,)?) => {
        $(
            impl ElementHash for $integral {
                #[inline]
                #[allow(
                    clippy::cast_sign_loss,
                    clippy::cast_possible_wrap,
                    clippy::cast_lossless,
                    clippy::unnecessary_cast
                )]
                fn element_hash(&self) -> u64 {
                    hash_integral(*self as u64)
                }
            }
        )*
    };
}

impl_element_hash_for_integral!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl ElementHash for u128 {
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn element_hash(&self) -> u64 {
        hash_integral((*self as u64) ^ hash_integral((*self >> 64) as u64))
    }
}

impl ElementHash for i128 {
    #[inline]
    #[allow(clippy::cast_sign_loss)]
    fn element_hash(&self) -> u64 {
        (*self as u128).element_hash()
    }
}

impl ElementHash for char {
    #[inline]
    fn element_hash(&self) -> u64 {
        hash_integral(u64::from(u32::from(*self)))
    }
}

impl ElementHash for bool {
    #[inline]
    fn element_hash(&self) -> u64 {
        hash_integral(u64::from(*self))
    }
}

impl ElementHash for str {
    #[inline]
    fn element_hash(&self) -> u64 {
        hash_bytes(self.as_bytes())
    }
}

impl ElementHash for String {
    #[inline]
    fn element_hash(&self) -> u64 {
        self.as_str().element_hash()
    }
}

impl ElementHash for Cow<'_, str> {
    #[inline]
    fn element_hash(&self) -> u64 {
        self.as_ref().element_hash()
    }
}

impl<T: ElementHash + ?Sized> ElementHash for &T {
    #[inline]
    fn element_hash(&self) -> u64 {
        (**self).element_hash()
    }
}

impl<T: ElementHash + ?Sized> ElementHash for Box<T> {
    #[inline]
    fn element_hash(&self) -> u64 {
        (**self).element_hash()
    }
}

impl<T: ElementHash + ?Sized> ElementHash for Rc<T> {
    #[inline]
    fn element_hash(&self) -> u64 {
        (**self).element_hash()
    }
}

impl<T: ElementHash + ?Sized> ElementHash for Arc<T> {
    #[inline]
    fn element_hash(&self) -> u64 {
        (**self).element_hash()
    }
}

// =============================================================================
// HashDispatch
// =============================================================================

/// The hashing seam of an ordered set.
///
/// # Examples
///
/// ```rust
/// use oset::OrderedSet;
///
/// // Any closure works as a dispatcher.
/// let mut set = OrderedSet::with_hasher(|value: &(i32, i32)| {
///     (value.0 as u64) << 32 | value.1 as u32 as u64
/// });
/// assert!(set.add((1, 2)));
/// assert!(set.contains(&(1, 2)));
/// ```
pub trait HashDispatch<T: ?Sized> {
    /// Returns the hash of `value`.
    fn hash_of(&self, value: &T) -> u64;
}

/// Default dispatcher, routing through [`ElementHash`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementHasher;

impl<T: ElementHash + ?Sized> HashDispatch<T> for ElementHasher {
    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        value.element_hash()
    }
}

impl<T: ?Sized, F: Fn(&T) -> u64> HashDispatch<T> for F {
    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        self(value)
    }
}

/// Dispatcher hashing any [`Hash`] type through a [`BuildHasher`].
///
/// # Examples
///
/// ```rust
/// use std::collections::hash_map::RandomState;
///
/// use oset::OrderedSet;
/// use oset::hash::BuildHasherDispatch;
///
/// let mut set = OrderedSet::with_hasher(BuildHasherDispatch::new(RandomState::new()));
/// set.add(vec![1, 2, 3]);
/// assert!(set.contains(&vec![1, 2, 3]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BuildHasherDispatch<S> {
    build_hasher: S,
}

impl<S> BuildHasherDispatch<S> {
    /// Wraps a [`BuildHasher`].
    #[inline]
    #[must_use]
    pub const fn new(build_hasher: S) -> Self {
        Self { build_hasher }
    }

    /// Returns the wrapped [`BuildHasher`].
    #[inline]
    #[must_use]
    pub const fn build_hasher(&self) -> &S {
        &self.build_hasher
    }
}

impl<T: Hash + ?Sized, S: BuildHasher> HashDispatch<T> for BuildHasherDispatch<S> {
    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        self.build_hasher.hash_one(value)
    }
}

/// Dispatcher backed by `rustc_hash`'s Fx hasher.
#[cfg(feature = "fxhash")]
pub type FxDispatch = BuildHasherDispatch<rustc_hash::FxBuildHasher>;

/// Dispatcher backed by `ahash`.
#[cfg(feature = "ahash")]
pub type AHashDispatch = BuildHasherDispatch<ahash::RandomState>;
