//! Error types for set configuration and hash dispatch.
//!
//! Duplicate insertion and removal of a missing value are not errors:
//! those operations report `false`. The types here cover the two ways
//! a set can be misconfigured before it stores anything.

/// Represents an error when a hash is requested for a type that has no
/// registered hash function.
///
/// # Examples
///
/// ```rust
/// use oset::error::HashError;
///
/// let error = HashError::Unregistered { type_name: "f64" };
/// assert_eq!(format!("{error}"), "no hash registered for type f64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// No hash function was registered for the named type.
    Unregistered {
        /// The name of the type, as reported by `std::any::type_name`.
        type_name: &'static str,
    },
}

impl std::fmt::Display for HashError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unregistered { type_name } => {
                write!(formatter, "no hash registered for type {type_name}")
            }
        }
    }
}

impl std::error::Error for HashError {}

/// Represents an invalid set of tuning parameters.
///
/// # Examples
///
/// ```rust
/// use oset::config::SetConfig;
/// use oset::error::ConfigError;
///
/// let result = SetConfig::new().with_initial_capacity(0).validate();
/// assert_eq!(result, Err(ConfigError::ZeroCapacity));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The bucket table must have at least one slot.
    ZeroCapacity,
    /// At least one slot must be probed per lookup.
    ZeroProbeLimit,
    /// Growth must at least double the table.
    GrowthFactorTooSmall {
        /// The rejected factor.
        factor: usize,
    },
    /// The sparse ratio must leave room for growth before probing widens.
    SparseRatioTooSmall {
        /// The rejected ratio.
        ratio: usize,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroCapacity => write!(formatter, "initial capacity must be non-zero"),
            Self::ZeroProbeLimit => write!(formatter, "probe limit must be non-zero"),
            Self::GrowthFactorTooSmall { factor } => {
                write!(formatter, "growth factor must be at least 2, got {factor}")
            }
            Self::SparseRatioTooSmall { ratio } => {
                write!(formatter, "sparse ratio must be at least 2, got {ratio}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Unified error type for everything that can go wrong while building a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    /// The hash capability could not be resolved.
    Hash(HashError),
    /// The tuning parameters were rejected.
    Config(ConfigError),
}

impl std::fmt::Display for SetError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash(error) => write!(formatter, "{error}"),
            Self::Config(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for SetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Hash(error) => Some(error),
            Self::Config(error) => Some(error),
        }
    }
}

impl From<HashError> for SetError {
    fn from(error: HashError) -> Self {
        Self::Hash(error)
    }
}

impl From<ConfigError> for SetError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}
