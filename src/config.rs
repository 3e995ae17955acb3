//! Tuning parameters for [`OrderedSet`](crate::OrderedSet).
//!
//! The bucket table starts with [`DEFAULT_CAPACITY`] slots and probes at
//! most [`DEFAULT_PROBE_LIMIT`] consecutive slots per lookup. When an
//! insertion finds every slot of its probe window occupied, the table is
//! multiplied by the growth factor and every entry is rehashed.
//!
//! A table that is already very sparse but still cannot place an element
//! is suffering from clustered hashes rather than load, so growing it
//! again would not help. Once the capacity exceeds `sparse_ratio` times
//! the element count, the probe window is widened instead.
//!
//! # Examples
//!
//! ```rust
//! use oset::OrderedSet;
//! use oset::config::SetConfig;
//!
//! let config = SetConfig::new().with_initial_capacity(8).with_probe_limit(2);
//! let mut set: OrderedSet<u32> = OrderedSet::with_config(config);
//! assert_eq!(set.capacity(), 8);
//!
//! for value in 0..100 {
//!     set.add(value);
//! }
//! assert!(set.capacity() >= 100);
//! ```

use static_assertions::const_assert;

use crate::error::ConfigError;

/// Number of bucket slots a new set starts with.
pub const DEFAULT_CAPACITY: usize = 64;

/// Number of consecutive slots examined from an element's home slot.
pub const DEFAULT_PROBE_LIMIT: usize = 4;

/// Factor by which the bucket table grows.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Capacity-to-length ratio above which a full probe window widens the
/// probe instead of growing the table.
pub const DEFAULT_SPARSE_RATIO: usize = 16;

const_assert!(DEFAULT_CAPACITY > 0);
const_assert!(DEFAULT_PROBE_LIMIT > 0);
const_assert!(DEFAULT_PROBE_LIMIT <= DEFAULT_CAPACITY);
const_assert!(DEFAULT_GROWTH_FACTOR >= 2);
const_assert!(DEFAULT_SPARSE_RATIO >= 2);

/// Tuning parameters for the bucket table of an ordered set.
///
/// # Examples
///
/// ```rust
/// use oset::config::{DEFAULT_CAPACITY, SetConfig};
///
/// let config = SetConfig::default();
/// assert_eq!(config.initial_capacity(), DEFAULT_CAPACITY);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SetConfig {
    initial_capacity: usize,
    probe_limit: usize,
    growth_factor: usize,
    sparse_ratio: usize,
}

impl SetConfig {
    /// Creates a configuration holding the default constants.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            probe_limit: DEFAULT_PROBE_LIMIT,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            sparse_ratio: DEFAULT_SPARSE_RATIO,
        }
    }

    /// Sets the number of bucket slots a new set starts with.
    #[inline]
    #[must_use]
    pub const fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the number of consecutive slots probed per lookup.
    #[inline]
    #[must_use]
    pub const fn with_probe_limit(mut self, probe_limit: usize) -> Self {
        self.probe_limit = probe_limit;
        self
    }

    /// Sets the factor the bucket table is multiplied by when it grows.
    #[inline]
    #[must_use]
    pub const fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Sets the capacity-to-length ratio above which probing widens
    /// instead of the table growing.
    #[inline]
    #[must_use]
    pub const fn with_sparse_ratio(mut self, sparse_ratio: usize) -> Self {
        self.sparse_ratio = sparse_ratio;
        self
    }

    /// Returns the initial number of bucket slots.
    #[inline]
    #[must_use]
    pub const fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the initial probe limit.
    #[inline]
    #[must_use]
    pub const fn probe_limit(&self) -> usize {
        self.probe_limit
    }

    /// Returns the growth factor.
    #[inline]
    #[must_use]
    pub const fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Returns the sparse ratio.
    #[inline]
    #[must_use]
    pub const fn sparse_ratio(&self) -> usize {
        self.sparse_ratio
    }

    /// Checks that every parameter is usable.
    ///
    /// A probe limit larger than the initial capacity is accepted; the
    /// set clamps it to the table size.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking capacity, probe
    /// limit, growth factor and sparse ratio in that order.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.probe_limit == 0 {
            return Err(ConfigError::ZeroProbeLimit);
        }
        if self.growth_factor < 2 {
            return Err(ConfigError::GrowthFactorTooSmall {
                factor: self.growth_factor,
            });
        }
        if self.sparse_ratio < 2 {
            return Err(ConfigError::SparseRatioTooSmall {
                ratio: self.sparse_ratio,
            });
        }
        Ok(())
    }

    /// Replaces out-of-range parameters with their nearest usable value.
    pub(crate) fn sanitized(self) -> Self {
        let initial_capacity = self.initial_capacity.max(1);
        Self {
            initial_capacity,
            probe_limit: self.probe_limit.clamp(1, initial_capacity),
            growth_factor: self.growth_factor.max(2),
            sparse_ratio: self.sparse_ratio.max(2),
        }
    }
}

impl Default for SetConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_default_config_is_valid() {
        let config = SetConfig::default();
        assert_eq!(config.initial_capacity(), 64);
        assert_eq!(config.probe_limit(), 4);
        assert_eq!(config.growth_factor(), 2);
        assert_eq!(config.sparse_ratio(), 16);
        assert_eq!(config.validate(), Ok(()));
    }

    #[rstest]
    #[case(SetConfig::new().with_initial_capacity(0), ConfigError::ZeroCapacity)]
    #[case(SetConfig::new().with_probe_limit(0), ConfigError::ZeroProbeLimit)]
    #[case(
        SetConfig::new().with_growth_factor(1),
        ConfigError::GrowthFactorTooSmall { factor: 1 }
    )]
    #[case(
        SetConfig::new().with_sparse_ratio(1),
        ConfigError::SparseRatioTooSmall { ratio: 1 }
    )]
    fn test_validate_rejects(#[case] config: SetConfig, #[case] expected: ConfigError) {
        assert_eq!(config.validate(), Err(expected));
    }

    #[rstest]
    fn test_validate_reports_capacity_first() {
        let config = SetConfig::new()
            .with_initial_capacity(0)
            .with_probe_limit(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[rstest]
    fn test_sanitized_clamps_probe_limit_to_capacity() {
        let config = SetConfig::new()
            .with_initial_capacity(2)
            .with_probe_limit(10)
            .sanitized();
        assert_eq!(config.initial_capacity(), 2);
        assert_eq!(config.probe_limit(), 2);
    }

    #[rstest]
    fn test_sanitized_repairs_zero_values() {
        let config = SetConfig::new()
            .with_initial_capacity(0)
            .with_probe_limit(0)
            .with_growth_factor(0)
            .with_sparse_ratio(0)
            .sanitized();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.initial_capacity(), 1);
        assert_eq!(config.probe_limit(), 1);
    }
}
