//! Slot arena owning the entries of an ordered set.
//!
//! Entries never move once inserted, so their index is a stable handle
//! for both the bucket table and the list links. Vacated slots are
//! chained into a free list and reused by later insertions.

use std::ops::{Index, IndexMut};

/// Stable handle of an entry inside an [`Arena`].
pub(crate) type EntryIndex = usize;

/// One stored element plus its insertion-order links.
#[derive(Debug, Clone)]
pub(crate) struct Entry<T> {
    pub(crate) value: T,
    pub(crate) hash: u64,
    pub(crate) prev: Option<EntryIndex>,
    pub(crate) next: Option<EntryIndex>,
}

impl<T> Entry<T> {
    #[inline]
    pub(crate) const fn new(value: T, hash: u64, prev: Option<EntryIndex>) -> Self {
        Self {
            value,
            hash,
            prev,
            next: None,
        }
    }
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(Entry<T>),
    Vacant { next_free: Option<EntryIndex> },
}

#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<EntryIndex>,
    len: usize,
}

impl<T> Arena<T> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn insert(&mut self, entry: Entry<T>) -> EntryIndex {
        self.len += 1;
        match self.free_head {
            Some(index) => {
                if let Slot::Vacant { next_free } = self.slots[index] {
                    self.free_head = next_free;
                }
                self.slots[index] = Slot::Occupied(entry);
                index
            }
            None => {
                self.slots.push(Slot::Occupied(entry));
                self.slots.len() - 1
            }
        }
    }

    /// Removes the entry at `index`, or returns `None` if the slot is vacant.
    pub(crate) fn remove(&mut self, index: EntryIndex) -> Option<Entry<T>> {
        let slot = self.slots.get_mut(index)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let vacated = std::mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(index);
        self.len -= 1;
        match vacated {
            Slot::Occupied(entry) => Some(entry),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    pub(crate) fn get(&self, index: EntryIndex) -> Option<&Entry<T>> {
        match self.slots.get(index) {
            Some(Slot::Occupied(entry)) => Some(entry),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: EntryIndex) -> Option<&mut Entry<T>> {
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(entry)) => Some(entry),
            _ => None,
        }
    }

    /// Drops every entry. Allocated slot storage is kept.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<EntryIndex> for Arena<T> {
    type Output = Entry<T>;

    #[inline]
    fn index(&self, index: EntryIndex) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("no entry at arena index {index}"))
    }
}

impl<T> IndexMut<EntryIndex> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, index: EntryIndex) -> &mut Self::Output {
        self.get_mut(index)
            .unwrap_or_else(|| panic!("no entry at arena index {index}"))
    }
}
