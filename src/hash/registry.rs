//! Runtime per-type hash registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use super::{ElementHash, HashDispatch};
use crate::error::HashError;

/// A table of hash functions keyed by element type.
///
/// Types are looked up when a set is built from the registry, so a
/// missing registration is reported once, before any element is stored.
///
/// # Examples
///
/// ```rust
/// use oset::OrderedSet;
/// use oset::error::HashError;
/// use oset::hash::HashRegistry;
///
/// let registry = HashRegistry::with_defaults();
/// let mut set = OrderedSet::<i32, _>::with_registry(&registry).unwrap();
/// set.add(7);
/// assert!(set.contains(&7));
///
/// let missing = OrderedSet::<Vec<u8>, _>::with_registry(&registry);
/// assert!(matches!(missing, Err(HashError::Unregistered { .. })));
/// ```
#[derive(Default)]
pub struct HashRegistry {
    functions: HashMap<TypeId, Box<dyn Any>>,
}

macro_rules! register_element_hash {
    ($registry:expr, $($element:ty),* $(,)?) => {
        $(
            $registry.register::<$element>(<$element as ElementHash>::element_hash);
        )*
    };
}

impl HashRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the reference hashes of built-in
    /// integers, `char`, `bool` and `String`.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        register_element_hash!(
            registry, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool,
            String,
        );
        registry
    }

    /// Registers `function` as the hash of `T`, returning the function it
    /// replaced.
    pub fn register<T: 'static>(&mut self, function: fn(&T) -> u64) -> Option<fn(&T) -> u64> {
        self.functions
            .insert(TypeId::of::<T>(), Box::new(function))
            .and_then(|previous| previous.downcast::<fn(&T) -> u64>().ok())
            .map(|previous| *previous)
    }

    /// Returns `true` if `T` has a registered hash.
    #[must_use]
    pub fn is_registered<T: 'static>(&self) -> bool {
        self.functions.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Resolves the hash of `T` into a dispatcher.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Unregistered`] naming `T` if no function was
    /// registered for it.
    pub fn hasher_for<T: 'static>(&self) -> Result<RegisteredHasher<T>, HashError> {
        self.functions
            .get(&TypeId::of::<T>())
            .and_then(|function| function.downcast_ref::<fn(&T) -> u64>())
            .map(|function| RegisteredHasher {
                function: *function,
            })
            .ok_or(HashError::Unregistered {
                type_name: std::any::type_name::<T>(),
            })
    }

    /// Hashes a single value with the registered function of its type.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Unregistered`] if `T` has no registered hash.
    pub fn hash<T: 'static>(&self, value: &T) -> Result<u64, HashError> {
        self.hasher_for::<T>()
            .map(|hasher| hasher.hash_of(value))
    }
}

impl fmt::Debug for HashRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HashRegistry")
            .field("registered", &self.functions.len())
            .finish()
    }
}

/// Dispatcher resolved from a [`HashRegistry`].
pub struct RegisteredHasher<T> {
    function: fn(&T) -> u64,
}

impl<T> RegisteredHasher<T> {
    /// Wraps a hash function directly, bypassing the registry.
    #[must_use]
    pub const fn from_fn(function: fn(&T) -> u64) -> Self {
        Self { function }
    }
}

impl<T> HashDispatch<T> for RegisteredHasher<T> {
    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        (self.function)(value)
    }
}

impl<T> Clone for RegisteredHasher<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RegisteredHasher<T> {}

impl<T> fmt::Debug for RegisteredHasher<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegisteredHasher")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
