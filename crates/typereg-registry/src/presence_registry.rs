//! Registry of type tokens.
//!
//! [`PresenceRegistry`] stores types, not instances. A query asks whether a
//! stored type is-a `key` and answers with that stored type.
//!
//! ```
//! use typereg_core::builtins::Number;
//! use typereg_registry::{LocalPresenceRegistry, PresenceLookup};
//!
//! let registry = LocalPresenceRegistry::new();
//! assert!(registry.add::<i32>().unwrap());
//! assert!(!registry.add::<i32>().unwrap());
//!
//! assert_eq!(registry.get::<Number>().unwrap().name(), "i32");
//! ```

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;
use typereg_core::{AnyType, RegistryError, Result, TypeDescriptor, Typed};

use crate::backend::{Backend, Local};
use crate::resolver::{Resolver, check_bound};

/// Read access to a presence registry.
pub trait PresenceLookup {
    /// Resolve `key` to the unique stored type that is-a `key`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Ambiguous`] if several stored types match, or
    /// [`RegistryError::InvalidBound`] if `key` is outside the registry bound.
    fn get_or_none_by(&self, key: &'static TypeDescriptor) -> Result<Option<&'static TypeDescriptor>>;

    /// Number of stored types.
    fn len(&self) -> usize;

    /// Number of memoized lookup outcomes.
    fn cache_count(&self) -> usize;

    /// Snapshot of the stored types.
    fn values(&self) -> Vec<&'static TypeDescriptor>;

    /// Check if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Like [`get_or_none_by`](Self::get_or_none_by) but fails with
    /// [`RegistryError::NotFound`] when nothing matches.
    fn get_by(&self, key: &'static TypeDescriptor) -> Result<&'static TypeDescriptor> {
        self.get_or_none_by(key)?
            .ok_or_else(|| RegistryError::not_found(key))
    }

    /// The stored type that is-a `K`.
    fn get<K: Typed>(&self) -> Result<&'static TypeDescriptor> {
        self.get_by(K::descriptor())
    }

    /// The stored type that is-a `K`, if any.
    fn get_or_none<K: Typed>(&self) -> Result<Option<&'static TypeDescriptor>> {
        self.get_or_none_by(K::descriptor())
    }

    /// Check whether a stored type is-a `K`.
    fn contains<K: Typed>(&self) -> Result<bool> {
        self.contains_by(K::descriptor())
    }

    /// Check whether a stored type is-a `key`.
    fn contains_by(&self, key: &'static TypeDescriptor) -> Result<bool> {
        Ok(self.get_or_none_by(key)?.is_some())
    }
}

/// A set of types, looked up by any ancestor type.
///
/// `R` bounds every stored type and every key; `B` selects the storage
/// backend.
pub struct PresenceRegistry<R: Typed = AnyType, B: Backend = Local> {
    resolver: Resolver<&'static TypeDescriptor, B>,
    bound: PhantomData<fn() -> R>,
}

/// Single-threaded registry accepting any type.
pub type LocalPresenceRegistry = PresenceRegistry<AnyType, Local>;

/// Single-threaded registry accepting descendants of `R`.
pub type RootedPresenceRegistry<R> = PresenceRegistry<R, Local>;

/// Thread-safe registry accepting any type.
#[cfg(feature = "concurrent")]
pub type ConcurrentPresenceRegistry = PresenceRegistry<AnyType, crate::backend::Concurrent>;

/// Thread-safe registry accepting descendants of `R`.
#[cfg(feature = "concurrent")]
pub type RootedConcurrentPresenceRegistry<R> = PresenceRegistry<R, crate::backend::Concurrent>;

impl<R: Typed, B: Backend> Default for PresenceRegistry<R, B> {
    fn default() -> Self {
        Self {
            resolver: Resolver::new(),
            bound: PhantomData,
        }
    }
}

impl<R: Typed, B: Backend> PresenceRegistry<R, B> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry pre-sized for `capacity` types.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            resolver: Resolver::with_capacity(capacity),
            bound: PhantomData,
        }
    }

    /// The upper bound of this registry.
    pub fn bound(&self) -> &'static TypeDescriptor {
        R::descriptor()
    }

    /// Insert `T`. Returns `true` if it was not already present.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidBound`] if `T` is outside the bound.
    pub fn add<T: Typed>(&self) -> Result<bool> {
        self.add_descriptor(T::descriptor())
    }

    /// [`add`](Self::add) with a runtime type.
    pub fn add_descriptor(&self, descriptor: &'static TypeDescriptor) -> Result<bool> {
        check_bound::<R>(descriptor)?;
        let inserted = self.resolver.insert_if_absent(descriptor);
        if inserted {
            trace!(type_name = descriptor.name(), "add");
        }
        Ok(inserted)
    }

    /// Remove the stored type that is-a `K`. Returns `true` if something was
    /// removed.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Ambiguous`] if several stored types match (nothing is
    /// removed), or [`RegistryError::InvalidBound`].
    pub fn remove<K: Typed>(&self) -> Result<bool> {
        self.remove_by(K::descriptor())
    }

    /// [`remove`](Self::remove) with a runtime key.
    pub fn remove_by(&self, key: &'static TypeDescriptor) -> Result<bool> {
        check_bound::<R>(key)?;
        let removed = self.resolver.remove(key)?;
        if let Some(descriptor) = removed {
            trace!(key = key.name(), type_name = descriptor.name(), "remove");
        }
        Ok(removed.is_some())
    }

    /// Remove every type and every memoized outcome.
    pub fn clear(&self) {
        self.resolver.clear();
    }
}

impl<R: Typed, B: Backend> PresenceLookup for PresenceRegistry<R, B> {
    fn get_or_none_by(&self, key: &'static TypeDescriptor) -> Result<Option<&'static TypeDescriptor>> {
        check_bound::<R>(key)?;
        self.resolver.resolve(key)
    }

    fn len(&self) -> usize {
        self.resolver.len()
    }

    fn cache_count(&self) -> usize {
        self.resolver.cache_count()
    }

    fn values(&self) -> Vec<&'static TypeDescriptor> {
        self.resolver.entries()
    }
}

impl<R: Typed, B: Backend> fmt::Debug for PresenceRegistry<R, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values: Vec<_> = self.resolver.entries().iter().map(|d| d.name()).collect();
        values.sort_unstable();
        f.debug_struct("PresenceRegistry")
            .field("bound", &R::descriptor().name())
            .field("values", &values)
            .field("cache_count", &self.resolver.cache_count())
            .finish()
    }
}
