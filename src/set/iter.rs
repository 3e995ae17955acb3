//! Insertion-order iterators.

use std::iter::FusedIterator;

use super::{Arena, EntryIndex};

/// Borrowing iterator over an [`OrderedSet`](crate::OrderedSet), oldest
/// element first.
///
/// Created by [`OrderedSet::iter`](crate::OrderedSet::iter).
pub struct Iter<'a, T> {
    entries: &'a Arena<T>,
    front: Option<EntryIndex>,
    back: Option<EntryIndex>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) const fn new(
        entries: &'a Arena<T>,
        front: Option<EntryIndex>,
        back: Option<EntryIndex>,
        remaining: usize,
    ) -> Self {
        Self {
            entries,
            front,
            back,
            remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entries = self.entries;
        let entry = &entries[self.front?];
        self.front = entry.next;
        self.remaining -= 1;
        Some(&entry.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entries = self.entries;
        let entry = &entries[self.back?];
        self.back = entry.prev;
        self.remaining -= 1;
        Some(&entry.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Owning iterator over an [`OrderedSet`](crate::OrderedSet), oldest
/// element first.
///
/// Elements not yet yielded are dropped together with the iterator.
pub struct IntoIter<T> {
    entries: Arena<T>,
    front: Option<EntryIndex>,
    back: Option<EntryIndex>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(super) const fn new(
        entries: Arena<T>,
        front: Option<EntryIndex>,
        back: Option<EntryIndex>,
        remaining: usize,
    ) -> Self {
        Self {
            entries,
            front,
            back,
            remaining,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.entries.remove(self.front?)?;
        self.front = entry.next;
        self.remaining -= 1;
        Some(entry.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.entries.remove(self.back?)?;
        self.back = entry.prev;
        self.remaining -= 1;
        Some(entry.value)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use crate::OrderedSet;
    use rstest::rstest;

    #[rstest]
    fn test_iter_meets_in_the_middle() {
        let set: OrderedSet<i32> = (1..=5).collect();
        let mut iter = set.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[rstest]
    fn test_into_iter_yields_owned_values_in_order() {
        let set: OrderedSet<String> = ["c", "a", "b"].map(String::from).into();
        let values: Vec<String> = set.into_iter().collect();
        assert_eq!(values, vec!["c", "a", "b"]);
    }

    #[rstest]
    fn test_into_iter_reverse_and_partial_consumption() {
        let set: OrderedSet<i32> = (0..4).collect();
        let mut iter = set.into_iter();
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.size_hint(), (2, Some(2)));
        assert_eq!(iter.rev().collect::<Vec<_>>(), vec![2, 1]);
    }

    #[rstest]
    fn test_iter_on_empty_set() {
        let set: OrderedSet<u8> = OrderedSet::new();
        assert_eq!(set.iter().next(), None);
        assert_eq!(set.iter().next_back(), None);
        assert_eq!(set.into_iter().len(), 0);
    }
}
