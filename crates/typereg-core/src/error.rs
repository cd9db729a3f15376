//! Error types for registry operations.
//!
//! Every failure is reported synchronously to the caller of the offending
//! operation. Nothing is retried: all operations are deterministic given the
//! contents of the registry. A failed mutating call leaves the registry as it
//! was.

use thiserror::Error;

use crate::TypeDescriptor;

/// Result alias used throughout the registries.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised by registry lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A required lookup found no matching entry.
    #[error("key not found: {key}")]
    NotFound {
        /// The queried type.
        key: &'static str,
    },

    /// A lookup by ancestor type matched two or more stored entries.
    #[error("multiple values for key: {key}")]
    Ambiguous {
        /// The queried type.
        key: &'static str,
        /// The stored types that matched, sorted by name.
        candidates: Vec<&'static str>,
    },

    /// An entry already exists for this exact concrete type.
    #[error("key already exists: {key}")]
    Duplicate {
        /// The concrete type that was already present.
        key: &'static str,
    },

    /// A type outside the declared upper bound was supplied.
    #[error("type '{type_name}' is outside bound '{bound}'")]
    InvalidBound {
        /// The rejected type.
        type_name: &'static str,
        /// The bound it failed to satisfy.
        bound: &'static str,
    },
}

impl RegistryError {
    /// Create a not-found error for the given key.
    pub fn not_found(key: &TypeDescriptor) -> Self {
        Self::NotFound { key: key.name() }
    }

    /// Create an ambiguous-lookup error. Candidates are sorted so the
    /// error does not depend on store iteration order.
    pub fn ambiguous(key: &TypeDescriptor, mut candidates: Vec<&'static str>) -> Self {
        candidates.sort_unstable();
        Self::Ambiguous {
            key: key.name(),
            candidates,
        }
    }

    /// Create a duplicate-key error for the given concrete type.
    pub fn duplicate(key: &TypeDescriptor) -> Self {
        Self::Duplicate { key: key.name() }
    }

    /// Create an invalid-bound error.
    pub fn invalid_bound(type_name: &TypeDescriptor, bound: &TypeDescriptor) -> Self {
        Self::InvalidBound {
            type_name: type_name.name(),
            bound: bound.name(),
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an ambiguous-lookup error.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }

    /// Check if this is a duplicate-key error.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Check if this is an invalid-bound error.
    pub fn is_invalid_bound(&self) -> bool {
        matches!(self, Self::InvalidBound { .. })
    }
}
