//! Insertion-ordered hash set.
//!
//! This module provides [`OrderedSet`], a mutable set with average O(1)
//! membership test, insertion and removal that remembers the order in
//! which elements were first inserted.
//!
//! # Overview
//!
//! Every element lives in an entry of an internal arena. Two structures
//! index the arena:
//!
//! - a **bucket table** of arena indices, addressed by
//!   `hash(value) mod capacity` plus a short linear probe, used for lookup;
//! - a **doubly linked list** threaded through the entries in insertion
//!   order, used for iteration.
//!
//! The arena is the only owner of the entries. Growing the table rehashes
//! every entry but never touches the list, so growth cannot reorder
//! elements.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity              |
//! |-------------------|-------------------------|
//! | `add`             | O(1) average            |
//! | `remove`          | O(1) average            |
//! | `contains`        | O(1)                    |
//! | `len`             | O(1)                    |
//! | `clear`           | O(n + capacity)         |
//! | `iter`            | O(1) + O(n)             |
//! | `clone`           | O(n + capacity)         |
//!
//! # Examples
//!
//! ```rust
//! use oset::OrderedSet;
//!
//! let mut set = OrderedSet::new();
//! for value in [0, 5, 3, 9, 1] {
//!     set.add(value);
//! }
//!
//! let forward: Vec<i32> = set.iter().copied().collect();
//! assert_eq!(forward, vec![0, 5, 3, 9, 1]);
//!
//! let reverse: Vec<i32> = set.iter().rev().copied().collect();
//! assert_eq!(reverse, vec![1, 9, 3, 5, 0]);
//!
//! set.remove(&3);
//! set.add(3);
//! assert_eq!(set.to_string(), "{0, 5, 9, 1, 3}");
//! ```

mod arena;
mod iter;

pub use iter::{IntoIter, Iter};

pub(crate) use arena::{Arena, Entry, EntryIndex};

use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::ops::AddAssign;

use tracing::{debug, trace};

use crate::config::SetConfig;
use crate::cursor::{Cursor, CursorMut, Direction};
use crate::error::{ConfigError, HashError};
use crate::hash::{ElementHasher, HashDispatch, HashRegistry, RegisteredHasher};

// =============================================================================
// Probing
// =============================================================================

/// Returns the slots examined for `hash`, starting at its home slot and
/// wrapping around the end of the table.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn probe_sequence(hash: u64, capacity: usize, probe_limit: usize) -> impl Iterator<Item = usize> {
    let home = (hash % capacity as u64) as usize;
    (0..probe_limit.min(capacity)).map(move |offset| (home + offset) % capacity)
}

/// Returns the first empty slot of the probe window of `hash`.
#[inline]
fn vacant_slot(table: &[Option<EntryIndex>], hash: u64, probe_limit: usize) -> Option<usize> {
    probe_sequence(hash, table.len(), probe_limit).find(|&slot| table[slot].is_none())
}

// =============================================================================
// OrderedSet Definition
// =============================================================================

/// A hash set that iterates in insertion order.
///
/// # Type Parameters
///
/// * `T` - The element type. Must implement `Eq`.
/// * `H` - The hash dispatcher, [`ElementHasher`] by default.
///
/// # Examples
///
/// ```rust
/// use oset::OrderedSet;
///
/// let mut set = OrderedSet::new();
/// assert!(set.add("first".to_string()));
/// assert!(set.add("second".to_string()));
/// assert!(!set.add("first".to_string()));
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("second"));
/// assert_eq!(set.first().map(String::as_str), Some("first"));
/// ```
pub struct OrderedSet<T, H = ElementHasher> {
    entries: Arena<T>,
    table: Vec<Option<EntryIndex>>,
    head: Option<EntryIndex>,
    tail: Option<EntryIndex>,
    probe_limit: usize,
    config: SetConfig,
    hasher: H,
}

impl<T> OrderedSet<T> {
    /// Creates an empty set with the default configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use oset::OrderedSet;
    ///
    /// let set: OrderedSet<i32> = OrderedSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), 64);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config_and_hasher(SetConfig::default(), ElementHasher)
    }

    /// Creates an empty set with the given configuration.
    ///
    /// Out-of-range parameters are clamped to the nearest usable value;
    /// use [`OrderedSet::try_with_config`] to reject them instead.
    #[inline]
    #[must_use]
    pub fn with_config(config: SetConfig) -> Self {
        Self::with_config_and_hasher(config, ElementHasher)
    }

    /// Creates an empty set after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`SetConfig::validate`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use oset::OrderedSet;
    /// use oset::config::SetConfig;
    ///
    /// let rejected = OrderedSet::<u8>::try_with_config(SetConfig::new().with_probe_limit(0));
    /// assert!(rejected.is_err());
    /// ```
    pub fn try_with_config(config: SetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }
}

impl<T: 'static> OrderedSet<T, RegisteredHasher<T>> {
    /// Creates an empty set hashing through the function registered for
    /// `T` in `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Unregistered`] naming `T` if the registry has
    /// no function for it.
    pub fn with_registry(registry: &HashRegistry) -> Result<Self, HashError> {
        let hasher = registry.hasher_for::<T>()?;
        Ok(Self::with_hasher(hasher))
    }
}

impl<T, H> OrderedSet<T, H> {
    /// Creates an empty set using `hasher` to place elements.
    #[inline]
    #[must_use]
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_config_and_hasher(SetConfig::default(), hasher)
    }

    /// Creates an empty set with the given configuration and hasher.
    #[must_use]
    pub fn with_config_and_hasher(config: SetConfig, hasher: H) -> Self {
        let config = config.sanitized();
        Self::with_table(config, hasher, config.initial_capacity(), config.probe_limit())
    }

    fn with_table(config: SetConfig, hasher: H, capacity: usize, probe_limit: usize) -> Self {
        Self {
            entries: Arena::new(),
            table: vec![None; capacity],
            head: None,
            tail: None,
            probe_limit,
            config,
            hasher,
        }
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.len() == 0
    }

    /// Returns the current number of bucket slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Returns the number of slots currently probed per lookup.
    ///
    /// This starts at the configured probe limit and only widens when
    /// clustered hashes defeat table growth.
    #[inline]
    #[must_use]
    pub const fn probe_limit(&self) -> usize {
        self.probe_limit
    }

    /// Returns the configuration the set was built with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &SetConfig {
        &self.config
    }

    /// Returns the hash dispatcher.
    #[inline]
    #[must_use]
    pub const fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the oldest element.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.head.map(|index| &self.entries[index].value)
    }

    /// Returns the most recently inserted element.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tail.map(|index| &self.entries[index].value)
    }

    /// Removes every element. The capacity is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use oset::OrderedSet;
    ///
    /// let mut set: OrderedSet<i32> = (0..100).collect();
    /// let capacity = set.capacity();
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert!(set.begin() == set.end());
    /// assert_eq!(set.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        debug!(
            len = self.len(),
            capacity = self.capacity(),
            "clearing ordered set"
        );
        self.entries.clear();
        self.table.fill(None);
        self.head = None;
        self.tail = None;
    }

    /// Returns an iterator over the elements in insertion order.
    ///
    /// The iterator is double-ended; `iter().rev()` walks from the newest
    /// element to the oldest.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.entries, self.head, self.tail, self.len())
    }

    /// Returns a cursor on the oldest element, moving towards newer ones.
    #[inline]
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T, H> {
        Cursor::new(self, self.head, Direction::Forward)
    }

    /// Returns the past-the-end cursor of the forward range.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T, H> {
        Cursor::new(self, None, Direction::Forward)
    }

    /// Returns a cursor on the newest element, moving towards older ones.
    #[inline]
    #[must_use]
    pub fn rbegin(&self) -> Cursor<'_, T, H> {
        Cursor::new(self, self.tail, Direction::Reverse)
    }

    /// Returns the past-the-end cursor of the reverse range.
    #[inline]
    #[must_use]
    pub fn rend(&self) -> Cursor<'_, T, H> {
        Cursor::new(self, None, Direction::Reverse)
    }

    /// Mutable counterpart of [`OrderedSet::begin`].
    #[inline]
    #[must_use]
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, H> {
        let head = self.head;
        CursorMut::new(self, head, Direction::Forward)
    }

    /// Mutable counterpart of [`OrderedSet::end`].
    #[inline]
    #[must_use]
    pub fn end_mut(&mut self) -> CursorMut<'_, T, H> {
        CursorMut::new(self, None, Direction::Forward)
    }

    /// Mutable counterpart of [`OrderedSet::rbegin`].
    #[inline]
    #[must_use]
    pub fn rbegin_mut(&mut self) -> CursorMut<'_, T, H> {
        let tail = self.tail;
        CursorMut::new(self, tail, Direction::Reverse)
    }

    /// Mutable counterpart of [`OrderedSet::rend`].
    #[inline]
    #[must_use]
    pub fn rend_mut(&mut self) -> CursorMut<'_, T, H> {
        CursorMut::new(self, None, Direction::Reverse)
    }

    // -------------------------------------------------------------------------
    // Internals shared with cursors
    // -------------------------------------------------------------------------

    #[inline]
    pub(crate) const fn entries(&self) -> &Arena<T> {
        &self.entries
    }

    #[inline]
    pub(crate) const fn head(&self) -> Option<EntryIndex> {
        self.head
    }

    #[inline]
    pub(crate) const fn tail(&self) -> Option<EntryIndex> {
        self.tail
    }

    /// Removes the entry at `index` without hashing its value.
    ///
    /// The table slot is found by probing for the index itself, using the
    /// hash cached in the entry.
    pub(crate) fn remove_index(&mut self, index: EntryIndex) -> Option<Entry<T>> {
        let hash = self.entries.get(index)?.hash;
        let slot = probe_sequence(hash, self.table.len(), self.probe_limit)
            .find(|&slot| self.table[slot] == Some(index))?;
        self.table[slot] = None;
        self.unlink(index)
    }

    /// Detaches the entry at `index` from the list and the arena.
    fn unlink(&mut self, index: EntryIndex) -> Option<Entry<T>> {
        let entry = self.entries.remove(index)?;
        match entry.prev {
            Some(prev) => self.entries[prev].next = entry.next,
            None => self.head = entry.next,
        }
        match entry.next {
            Some(next) => self.entries[next].prev = entry.prev,
            None => self.tail = entry.prev,
        }
        Some(entry)
    }

    /// Finds the slot holding an element equal to `value`.
    fn find_slot<Q>(&self, value: &Q, hash: u64) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        probe_sequence(hash, self.table.len(), self.probe_limit).find(|&slot| {
            self.table[slot].is_some_and(|index| {
                let entry = &self.entries[index];
                entry.hash == hash && entry.value.borrow() == value
            })
        })
    }

    /// Allocates an entry for `value`, stores it in `slot` and links it
    /// after the current tail.
    fn push_back(&mut self, value: T, hash: u64, slot: usize) {
        let index = self.entries.insert(Entry::new(value, hash, self.tail));
        match self.tail {
            Some(tail) => self.entries[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.table[slot] = Some(index);
    }

    /// Rebuilds the bucket table until `hash` has a vacant slot in its
    /// probe window, returning that slot.
    ///
    /// Dense tables grow by the growth factor. Tables that are already
    /// sparse widen the probe window instead, since growth cannot separate
    /// clustered hashes.
    fn make_room(&mut self, hash: u64) -> usize {
        let mut capacity = self.table.len();
        let mut probe_limit = self.probe_limit;
        loop {
            let sparse_threshold = self.config.sparse_ratio().saturating_mul(self.len() + 1);
            if capacity > sparse_threshold && probe_limit < capacity {
                probe_limit = probe_limit.saturating_mul(2).min(capacity);
            } else {
                capacity = capacity.saturating_mul(self.config.growth_factor());
            }
            if let Some((table, slot)) = self.rebuilt_table(capacity, probe_limit, hash) {
                debug!(
                    old_capacity = self.table.len(),
                    new_capacity = capacity,
                    old_probe_limit = self.probe_limit,
                    new_probe_limit = probe_limit,
                    len = self.len(),
                    "rebuilt ordered set bucket table"
                );
                self.table = table;
                self.probe_limit = probe_limit;
                return slot;
            }
        }
    }

    /// Places every live entry, in list order, into a fresh table of
    /// `capacity` slots. Returns `None` if any entry, or the pending
    /// `hash`, finds its probe window full.
    fn rebuilt_table(
        &self,
        capacity: usize,
        probe_limit: usize,
        hash: u64,
    ) -> Option<(Vec<Option<EntryIndex>>, usize)> {
        let mut table = vec![None; capacity];
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let entry = &self.entries[index];
            let slot = vacant_slot(&table, entry.hash, probe_limit)?;
            table[slot] = Some(index);
            cursor = entry.next;
        }
        let slot = vacant_slot(&table, hash, probe_limit)?;
        trace!(capacity, probe_limit, len = self.len(), "rehashed entries");
        Some((table, slot))
    }
}

impl<T: Eq, H> OrderedSet<T, H> {
    /// Adds `value` at the end of the insertion order.
    ///
    /// Returns `false`, leaving the set untouched and dropping `value`, if
    /// an equal element is already present. Re-adding an element that was
    /// removed appends it at the current end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use oset::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// assert!(set.add(1));
    /// assert!(!set.add(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, value: T) -> bool
    where
        H: HashDispatch<T>,
    {
        let hash = self.hasher.hash_of(&value);
        if self.find_slot(&value, hash).is_some() {
            return false;
        }
        let slot = match vacant_slot(&self.table, hash, self.probe_limit) {
            Some(slot) => slot,
            None => self.make_room(hash),
        };
        self.push_back(value, hash, slot);
        true
    }

    /// Returns `true` if the set contains an element equal to `value`.
    ///
    /// The argument may be any borrowed form of the element type, as long
    /// as the dispatcher hashes it the same way.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use oset::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// set.add("hello".to_string());
    /// assert!(set.contains("hello"));
    /// assert!(!set.contains("world"));
    /// ```
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashDispatch<Q>,
    {
        self.find_slot(value, self.hasher.hash_of(value)).is_some()
    }

    /// Returns the stored element equal to `value`.
    #[must_use]
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashDispatch<Q>,
    {
        self.find_slot(value, self.hasher.hash_of(value))
            .and_then(|slot| self.table[slot])
            .map(|index| &self.entries[index].value)
    }

    /// Removes the element equal to `value`.
    ///
    /// Returns `false` without mutation if no such element exists. The
    /// relative order of the remaining elements is preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use oset::OrderedSet;
    ///
    /// let mut set: OrderedSet<i32> = [1, 2, 3].into();
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashDispatch<Q>,
    {
        self.take(value).is_some()
    }

    /// Removes the element equal to `value` and returns it.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashDispatch<Q>,
    {
        let slot = self.find_slot(value, self.hasher.hash_of(value))?;
        let index = self.table[slot].take()?;
        self.unlink(index).map(|entry| entry.value)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T, H: Default> Default for OrderedSet<T, H> {
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

impl<T: Clone + Eq, H: HashDispatch<T> + Clone> Clone for OrderedSet<T, H> {
    /// Deep-copies every element into freshly allocated tables, keeping
    /// the insertion order.
    fn clone(&self) -> Self {
        let mut copy = Self::with_table(
            self.config,
            self.hasher.clone(),
            self.table.len(),
            self.probe_limit,
        );
        copy.entries.reserve(self.len());
        copy.extend(self.iter().cloned());
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.config = source.config;
        self.hasher = source.hasher.clone();
        self.table = vec![None; source.table.len()];
        self.probe_limit = source.probe_limit;
        self.entries.reserve(source.len());
        self.extend(source.iter().cloned());
    }
}

impl<T: fmt::Debug, H> fmt::Debug for OrderedSet<T, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, H> fmt::Display for OrderedSet<T, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

/// Two sets are equal when they hold the same elements, in any order.
impl<T: Eq, H: HashDispatch<T>> PartialEq for OrderedSet<T, H> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Eq, H: HashDispatch<T>> Eq for OrderedSet<T, H> {}

impl<T: Eq, H: HashDispatch<T>> Extend<T> for OrderedSet<T, H> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<'a, T: Eq + Copy + 'a, H: HashDispatch<T>> Extend<&'a T> for OrderedSet<T, H> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Eq, H: HashDispatch<T> + Default> FromIterator<T> for OrderedSet<T, H> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T: Eq, H: HashDispatch<T> + Default, const N: usize> From<[T; N]> for OrderedSet<T, H> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

/// `set += value` is shorthand for [`OrderedSet::add`].
impl<T: Eq, H: HashDispatch<T>> AddAssign<T> for OrderedSet<T, H> {
    fn add_assign(&mut self, value: T) {
        self.add(value);
    }
}

impl<'a, T, H> IntoIterator for &'a OrderedSet<T, H> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, H> IntoIterator for OrderedSet<T, H> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.len();
        IntoIter::new(self.entries, self.head, self.tail, remaining)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, H> serde::Serialize for OrderedSet<T, H> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedSetVisitor<T, H> {
    marker: std::marker::PhantomData<(T, H)>,
}

#[cfg(feature = "serde")]
impl<T, H> OrderedSetVisitor<T, H> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T, H> serde::de::Visitor<'de> for OrderedSetVisitor<T, H>
where
    T: serde::Deserialize<'de> + Eq,
    H: HashDispatch<T> + Default,
{
    type Value = OrderedSet<T, H>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        // Duplicates in the input collapse onto their first occurrence.
        let mut set = OrderedSet::default();
        while let Some(element) = seq.next_element()? {
            set.add(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, H> serde::Deserialize<'de> for OrderedSet<T, H>
where
    T: serde::Deserialize<'de> + Eq,
    H: HashDispatch<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(OrderedSetVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
