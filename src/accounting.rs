//! Instance accounting for leak and double-drop detection.
//!
//! [`Tracked`] behaves like an `i32` but reports every construction and
//! every drop to the [`InstanceLedger`] that created it. A container that
//! stores only tracked values and no outside copies must leave the
//! ledger's live count equal to its own length at every step; any
//! difference is a leaked or doubly dropped element.
//!
//! The ledger is an explicit context object. Tests create their own
//! ledger instead of sharing process-wide counters, so they can run in
//! parallel.
//!
//! # Examples
//!
//! ```rust
//! use oset::OrderedSet;
//! use oset::accounting::{Deltas, InstanceLedger};
//!
//! let ledger = InstanceLedger::new();
//! let mut set = OrderedSet::new();
//! for value in 0..3 {
//!     set.add(ledger.track(value));
//! }
//! assert_eq!(ledger.live(), 3);
//!
//! set.remove(&ledger.track(1));
//! assert_eq!(ledger.live(), 2);
//! assert_eq!(ledger.drain_deltas(), Deltas { increments: 4, decrements: 2 });
//!
//! drop(set);
//! assert_eq!(ledger.live(), 0);
//! ```

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::ParseIntError;
use std::ops::Deref;
use std::rc::Rc;

use crate::hash::{ElementHash, hash_integral};

#[derive(Debug, Default)]
struct Counters {
    live: Cell<i64>,
    increments: Cell<u64>,
    decrements: Cell<u64>,
}

impl Counters {
    fn record_construction(&self) {
        self.live.set(self.live.get() + 1);
        self.increments.set(self.increments.get() + 1);
    }

    fn record_drop(&self) {
        self.live.set(self.live.get() - 1);
        self.decrements.set(self.decrements.get() + 1);
    }
}

/// Construction and drop events recorded since the last drain or reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deltas {
    /// Number of values constructed, including clones.
    pub increments: u64,
    /// Number of values dropped.
    pub decrements: u64,
}

/// Accounting context shared by every [`Tracked`] value it creates.
///
/// Cloning the ledger yields another handle to the same counters.
#[derive(Debug, Clone, Default)]
pub struct InstanceLedger {
    counters: Rc<Counters>,
}

impl InstanceLedger {
    /// Creates a ledger with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes every counter.
    ///
    /// Values still alive keep reporting their drops, so the live count
    /// goes negative if they are dropped after a reset.
    pub fn reset(&self) {
        self.counters.live.set(0);
        self.counters.increments.set(0);
        self.counters.decrements.set(0);
    }

    /// Returns the number of tracked values currently alive.
    #[must_use]
    pub fn live(&self) -> i64 {
        self.counters.live.get()
    }

    /// Returns the construction and drop events since the previous call,
    /// and starts counting again from zero. The live count is unaffected.
    #[must_use]
    pub fn drain_deltas(&self) -> Deltas {
        Deltas {
            increments: self.counters.increments.replace(0),
            decrements: self.counters.decrements.replace(0),
        }
    }

    /// Creates a tracked value.
    #[must_use]
    pub fn track(&self, value: i32) -> Tracked {
        self.counters.record_construction();
        Tracked {
            value,
            ledger: self.clone(),
        }
    }

    /// Parses a tracked value from its decimal representation.
    ///
    /// Nothing is recorded if parsing fails.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseIntError`] of `i32` parsing.
    pub fn parse(&self, text: &str) -> Result<Tracked, ParseIntError> {
        text.trim().parse().map(|value| self.track(value))
    }
}

/// An `i32` that reports its constructions and drops to an
/// [`InstanceLedger`].
///
/// Equality, ordering and hashing look only at the integer.
pub struct Tracked {
    value: i32,
    ledger: InstanceLedger,
}

impl Tracked {
    /// Returns the wrapped integer.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.value
    }

    /// Replaces the wrapped integer. Assignment is not a construction and
    /// is not recorded.
    #[inline]
    pub const fn set(&mut self, value: i32) {
        self.value = value;
    }

    /// Returns the ledger this value reports to.
    #[inline]
    #[must_use]
    pub const fn ledger(&self) -> &InstanceLedger {
        &self.ledger
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.ledger.track(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.counters.record_drop();
    }
}

// Counters are shared through `Rc`, so tracked values stay on one thread.
static_assertions::assert_not_impl_any!(Tracked: Send, Sync);
static_assertions::assert_not_impl_any!(InstanceLedger: Send, Sync);

impl Deref for Tracked {
    type Target = i32;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<&Tracked> for i32 {
    fn from(tracked: &Tracked) -> Self {
        tracked.value
    }
}

impl From<Tracked> for i32 {
    fn from(tracked: Tracked) -> Self {
        tracked.value
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tracked {}

impl PartialEq<i32> for Tracked {
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

impl PartialOrd for Tracked {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tracked {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for Tracked {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.value.hash(state);
    }
}

impl ElementHash for Tracked {
    #[inline]
    #[allow(clippy::cast_sign_loss)]
    fn element_hash(&self) -> u64 {
        hash_integral(i64::from(self.value) as u64)
    }
}

impl fmt::Display for Tracked {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.value)
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Tracked").field(&self.value).finish()
    }
}
