//! Bidirectional cursors over the insertion order of an [`OrderedSet`].
//!
//! A cursor is a position in the insertion-order list plus a
//! [`Direction`]. Forward cursors come from [`OrderedSet::begin`] and
//! [`OrderedSet::end`]; reverse cursors from [`OrderedSet::rbegin`] and
//! [`OrderedSet::rend`]. The direction decides which neighbour
//! [`Cursor::move_next`] steps to, so the same code walks a range in
//! either order.
//!
//! Every range ends at a sentinel position that holds no element. Moving
//! forward from the sentinel stays on it; moving back from the sentinel
//! lands on the last element of the range.
//!
//! # Examples
//!
//! ```rust
//! use oset::OrderedSet;
//!
//! let set: OrderedSet<i32> = [0, 5, 3, 9, 1].into();
//!
//! let mut cursor = set.rbegin();
//! let mut reversed: Vec<&i32> = Vec::new();
//! while cursor != set.rend() {
//!     reversed.extend(cursor.current());
//!     cursor.move_next();
//! }
//! assert_eq!(reversed, vec![&1, &9, &3, &5, &0]);
//!
//! let mut back = set.end();
//! back.move_prev();
//! assert_eq!(back.current(), Some(&1));
//! ```
//!
//! [`CursorMut`] can also remove the element under it, which is how
//! elements are dropped while walking the set:
//!
//! ```rust
//! use oset::OrderedSet;
//!
//! let mut set: OrderedSet<i32> = (1..=6).collect();
//! let mut cursor = set.begin_mut();
//! while let Some(&value) = cursor.current() {
//!     if value % 2 == 0 {
//!         cursor.remove_current();
//!     } else {
//!         cursor.move_next();
//!     }
//! }
//! assert_eq!(set.to_string(), "{1, 3, 5}");
//! ```

use std::fmt;

use crate::set::{Arena, EntryIndex};
use crate::OrderedSet;

/// Which list link a cursor follows when it moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From the oldest element to the newest.
    Forward,
    /// From the newest element to the oldest.
    Reverse,
}

impl Direction {
    /// Returns the opposite direction.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// Position one step ahead of `position` in `direction`.
fn following<T>(
    entries: &Arena<T>,
    position: Option<EntryIndex>,
    direction: Direction,
) -> Option<EntryIndex> {
    let entry = &entries[position?];
    match direction {
        Direction::Forward => entry.next,
        Direction::Reverse => entry.prev,
    }
}

/// Position one step behind `position` in `direction`. Behind the
/// sentinel is the last element of the range.
fn preceding<T, H>(
    set: &OrderedSet<T, H>,
    position: Option<EntryIndex>,
    direction: Direction,
) -> Option<EntryIndex> {
    match position {
        Some(index) => following(set.entries(), Some(index), direction.reversed()),
        None => match direction {
            Direction::Forward => set.tail(),
            Direction::Reverse => set.head(),
        },
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// Read-only bidirectional cursor.
///
/// Two cursors are equal when they point at the same position of the same
/// set and move in the same direction.
pub struct Cursor<'a, T, H> {
    set: &'a OrderedSet<T, H>,
    position: Option<EntryIndex>,
    direction: Direction,
}

impl<'a, T, H> Cursor<'a, T, H> {
    pub(crate) const fn new(
        set: &'a OrderedSet<T, H>,
        position: Option<EntryIndex>,
        direction: Direction,
    ) -> Self {
        Self {
            set,
            position,
            direction,
        }
    }

    /// Returns the element under the cursor, or `None` at the sentinel.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        let set = self.set;
        self.position.map(|index| &set.entries()[index].value)
    }

    /// Returns the element [`Cursor::move_next`] would land on.
    #[must_use]
    pub fn peek_next(&self) -> Option<&'a T> {
        let set = self.set;
        following(set.entries(), self.position, self.direction)
            .map(|index| &set.entries()[index].value)
    }

    /// Returns the element [`Cursor::move_prev`] would land on.
    #[must_use]
    pub fn peek_prev(&self) -> Option<&'a T> {
        let set = self.set;
        preceding(set, self.position, self.direction).map(|index| &set.entries()[index].value)
    }

    /// Steps one element in the cursor's direction.
    pub fn move_next(&mut self) {
        self.position = following(self.set.entries(), self.position, self.direction);
    }

    /// Steps one element against the cursor's direction.
    pub fn move_prev(&mut self) {
        self.position = preceding(self.set, self.position, self.direction);
    }

    /// Returns the direction the cursor moves in.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if the cursor is on the sentinel.
    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.position.is_none()
    }
}

impl<T, H> Clone for Cursor<'_, T, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, H> Copy for Cursor<'_, T, H> {}

impl<T, H> PartialEq for Cursor<'_, T, H> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.set, other.set)
            && self.position == other.position
            && self.direction == other.direction
    }
}

impl<T, H> Eq for Cursor<'_, T, H> {}

impl<T: fmt::Debug, H> fmt::Debug for Cursor<'_, T, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Cursor")
            .field("current", &self.current())
            .field("direction", &self.direction)
            .finish()
    }
}

// =============================================================================
// CursorMut
// =============================================================================

/// Bidirectional cursor with exclusive access to the set.
///
/// Elements stay immutable, since changing a stored value would move its
/// hash. The cursor can instead remove the element under it.
pub struct CursorMut<'a, T, H> {
    set: &'a mut OrderedSet<T, H>,
    position: Option<EntryIndex>,
    direction: Direction,
}

impl<'a, T, H> CursorMut<'a, T, H> {
    pub(crate) const fn new(
        set: &'a mut OrderedSet<T, H>,
        position: Option<EntryIndex>,
        direction: Direction,
    ) -> Self {
        Self {
            set,
            position,
            direction,
        }
    }

    /// Returns the element under the cursor, or `None` at the sentinel.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.position.map(|index| &self.set.entries()[index].value)
    }

    /// Returns the element [`CursorMut::move_next`] would land on.
    #[must_use]
    pub fn peek_next(&self) -> Option<&T> {
        following(self.set.entries(), self.position, self.direction)
            .map(|index| &self.set.entries()[index].value)
    }

    /// Returns the element [`CursorMut::move_prev`] would land on.
    #[must_use]
    pub fn peek_prev(&self) -> Option<&T> {
        preceding(self.set, self.position, self.direction)
            .map(|index| &self.set.entries()[index].value)
    }

    /// Steps one element in the cursor's direction.
    pub fn move_next(&mut self) {
        self.position = following(self.set.entries(), self.position, self.direction);
    }

    /// Steps one element against the cursor's direction.
    pub fn move_prev(&mut self) {
        self.position = preceding(self.set, self.position, self.direction);
    }

    /// Returns the direction the cursor moves in.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if the cursor is on the sentinel.
    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.position.is_none()
    }

    /// Removes the element under the cursor and moves to the next one in
    /// the cursor's direction. Returns `None` at the sentinel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use oset::OrderedSet;
    ///
    /// let mut set: OrderedSet<char> = ['a', 'b', 'c'].into();
    /// let mut cursor = set.rbegin_mut();
    /// assert_eq!(cursor.remove_current(), Some('c'));
    /// assert_eq!(cursor.current(), Some(&'b'));
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn remove_current(&mut self) -> Option<T> {
        let index = self.position?;
        let next = following(self.set.entries(), Some(index), self.direction);
        let entry = self.set.remove_index(index)?;
        self.position = next;
        Some(entry.value)
    }

    /// Returns a read-only cursor at the same position.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T, H> {
        Cursor::new(self.set, self.position, self.direction)
    }
}

impl<T: fmt::Debug, H> fmt::Debug for CursorMut<'_, T, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CursorMut")
            .field("current", &self.current())
            .field("direction", &self.direction)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scenario() -> OrderedSet<i32> {
        [0, 5, 3, 9, 1].into()
    }

    fn walk(mut cursor: Cursor<'_, i32, crate::hash::ElementHasher>) -> Vec<i32> {
        let mut values = Vec::new();
        while let Some(&value) = cursor.current() {
            values.push(value);
            cursor.move_next();
        }
        values
    }

    #[rstest]
    fn test_forward_and_reverse_walks() {
        let set = scenario();
        assert_eq!(walk(set.begin()), vec![0, 5, 3, 9, 1]);
        assert_eq!(walk(set.rbegin()), vec![1, 9, 3, 5, 0]);
    }

    #[rstest]
    fn test_stepping_past_last_reaches_sentinel() {
        let set = scenario();
        let mut cursor = set.begin();
        for _ in 0..5 {
            cursor.move_next();
        }
        assert!(cursor.is_end());
        assert_eq!(cursor, set.end());
        cursor.move_next();
        assert_eq!(cursor, set.end());
    }

    #[rstest]
    fn test_move_prev_from_sentinel_lands_on_range_end() {
        let set = scenario();
        let mut forward = set.end();
        forward.move_prev();
        assert_eq!(forward.current(), Some(&1));

        let mut reverse = set.rend();
        reverse.move_prev();
        assert_eq!(reverse.current(), Some(&0));
    }

    #[rstest]
    fn test_move_prev_undoes_move_next() {
        let set = scenario();
        let mut cursor = set.begin();
        cursor.move_next();
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&3));
        cursor.move_prev();
        assert_eq!(cursor.current(), Some(&5));

        let mut reverse = set.rbegin();
        reverse.move_next();
        assert_eq!(reverse.current(), Some(&9));
        reverse.move_prev();
        assert_eq!(reverse.current(), Some(&1));
    }

    #[rstest]
    fn test_peek_does_not_move() {
        let set = scenario();
        let cursor = set.begin();
        assert_eq!(cursor.peek_next(), Some(&5));
        assert_eq!(cursor.peek_prev(), None);
        assert_eq!(cursor.current(), Some(&0));
        assert_eq!(set.end().peek_prev(), Some(&1));
        assert_eq!(set.end().peek_next(), None);
    }

    #[rstest]
    fn test_equality_requires_same_direction() {
        let set: OrderedSet<i32> = [1].into();
        assert_ne!(set.begin(), set.rbegin());
        assert_ne!(set.end(), set.rend());
        assert_eq!(set.begin(), set.begin());
    }

    #[rstest]
    fn test_equality_requires_same_set() {
        let first: OrderedSet<i32> = OrderedSet::new();
        let second: OrderedSet<i32> = OrderedSet::new();
        assert_eq!(first.begin(), first.end());
        assert_ne!(first.end(), second.end());
    }

    #[rstest]
    fn test_empty_set_begin_equals_end() {
        let set: OrderedSet<i32> = OrderedSet::new();
        assert_eq!(set.begin(), set.end());
        assert_eq!(set.rbegin(), set.rend());
        assert_eq!(set.begin().current(), None);
    }

    #[rstest]
    fn test_remove_current_follows_direction() {
        let mut set = scenario();
        let mut cursor = set.begin_mut();
        cursor.move_next();
        assert_eq!(cursor.remove_current(), Some(5));
        assert_eq!(cursor.current(), Some(&3));
        assert_eq!(cursor.as_cursor().peek_prev(), Some(&0));

        let mut reverse = set.rbegin_mut();
        reverse.move_next();
        assert_eq!(reverse.remove_current(), Some(9));
        assert_eq!(reverse.current(), Some(&3));

        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![0, 3, 1]);
        assert!(!set.contains(&5));
        assert!(!set.contains(&9));
    }

    #[rstest]
    fn test_remove_current_at_sentinel_is_none() {
        let mut set = scenario();
        let mut cursor = set.end_mut();
        assert_eq!(cursor.remove_current(), None);
        let mut reverse = set.rend_mut();
        reverse.move_prev();
        assert_eq!(reverse.remove_current(), Some(0));
        assert!(reverse.is_end());
        assert_eq!(set.len(), 4);
    }

    #[rstest]
    fn test_direction_reversed() {
        assert_eq!(Direction::Forward.reversed(), Direction::Reverse);
        assert_eq!(Direction::Reverse.reversed(), Direction::Forward);
    }
}
