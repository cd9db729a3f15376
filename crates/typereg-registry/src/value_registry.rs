//! Registry of instances keyed by their concrete type.
//!
//! [`ValueRegistry`] holds at most one instance per concrete type and answers
//! lookups by any ancestor of a stored type:
//!
//! ```
//! use typereg_core::builtins::{CharSequence, Number};
//! use typereg_registry::{LocalValueRegistry, ValueLookup};
//!
//! let registry = LocalValueRegistry::new();
//! registry.put(String::from("hello")).unwrap();
//! registry.put(42i32).unwrap();
//!
//! let text = registry.get::<CharSequence>().unwrap();
//! assert_eq!(text.downcast_ref::<String>().unwrap(), "hello");
//! assert_eq!(*registry.get_exact::<i32>().unwrap(), 42);
//!
//! registry.put(7i64).unwrap();
//! assert!(registry.get::<Number>().unwrap_err().is_ambiguous());
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::trace;
use typereg_core::{AnyType, RegistryError, Result, TypeDescriptor, Typed};

use crate::backend::{Backend, Local};
use crate::instance::Instance;
use crate::resolver::{Resolver, check_bound};

/// Read access to a value registry.
///
/// Libraries can hand out `&impl ValueLookup` to expose lookups while keeping
/// mutation private.
pub trait ValueLookup {
    /// Resolve `key` to the unique stored instance that is-a `key`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Ambiguous`] if several instances match, or
    /// [`RegistryError::InvalidBound`] if `key` is outside the registry bound.
    fn get_or_none_by(&self, key: &'static TypeDescriptor) -> Result<Option<Instance>>;

    /// The instance stored under exactly this concrete type.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidBound`] if `key` is outside the registry bound.
    fn exact_by(&self, key: &TypeDescriptor) -> Result<Option<Instance>>;

    /// Number of stored instances.
    fn len(&self) -> usize;

    /// Number of memoized lookup outcomes.
    fn cache_count(&self) -> usize;

    /// Snapshot of the stored instances.
    fn values(&self) -> Vec<Instance>;

    /// Check if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Like [`get_or_none_by`](Self::get_or_none_by) but fails with
    /// [`RegistryError::NotFound`] when nothing matches.
    fn get_by(&self, key: &'static TypeDescriptor) -> Result<Instance> {
        self.get_or_none_by(key)?
            .ok_or_else(|| RegistryError::not_found(key))
    }

    /// Resolve the instance that is-a `K`.
    fn get<K: Typed>(&self) -> Result<Instance> {
        self.get_by(K::descriptor())
    }

    /// Resolve the instance that is-a `K`, if any.
    fn get_or_none<K: Typed>(&self) -> Result<Option<Instance>> {
        self.get_or_none_by(K::descriptor())
    }

    /// The instance whose concrete type is exactly `T`.
    ///
    /// Never ambiguous; never touches the resolution cache.
    fn get_exact<T: Typed>(&self) -> Result<Arc<T>> {
        self.get_exact_or_none::<T>()?
            .ok_or_else(|| RegistryError::not_found(T::descriptor()))
    }

    /// The instance whose concrete type is exactly `T`, if any.
    fn get_exact_or_none<T: Typed>(&self) -> Result<Option<Arc<T>>> {
        Ok(self
            .exact_by(T::descriptor())?
            .and_then(|instance| instance.downcast::<T>()))
    }

    /// Check whether an instance that is-a `K` is stored.
    fn contains<K: Typed>(&self) -> Result<bool> {
        self.contains_by(K::descriptor())
    }

    /// Check whether an instance that is-a `key` is stored.
    fn contains_by(&self, key: &'static TypeDescriptor) -> Result<bool> {
        Ok(self.get_or_none_by(key)?.is_some())
    }

    /// Snapshot of the stored concrete types.
    fn keys(&self) -> Vec<&'static TypeDescriptor> {
        self.values().iter().map(Instance::descriptor).collect()
    }

    /// Snapshot of `(concrete type, instance)` pairs.
    fn entries(&self) -> Vec<(&'static TypeDescriptor, Instance)> {
        self.values()
            .into_iter()
            .map(|instance| (instance.descriptor(), instance))
            .collect()
    }
}

/// Instances keyed by concrete type, looked up by any ancestor type.
///
/// `R` bounds every stored type and every key; `B` selects the storage
/// backend. See the aliases [`LocalValueRegistry`], [`RootedValueRegistry`]
/// and their concurrent counterparts.
pub struct ValueRegistry<R: Typed = AnyType, B: Backend = Local> {
    resolver: Resolver<Instance, B>,
    bound: PhantomData<fn() -> R>,
}

/// Single-threaded registry accepting any type.
pub type LocalValueRegistry = ValueRegistry<AnyType, Local>;

/// Single-threaded registry accepting descendants of `R`.
pub type RootedValueRegistry<R> = ValueRegistry<R, Local>;

/// Thread-safe registry accepting any type.
#[cfg(feature = "concurrent")]
pub type ConcurrentValueRegistry = ValueRegistry<AnyType, crate::backend::Concurrent>;

/// Thread-safe registry accepting descendants of `R`.
#[cfg(feature = "concurrent")]
pub type RootedConcurrentValueRegistry<R> = ValueRegistry<R, crate::backend::Concurrent>;

impl<R: Typed, B: Backend> Default for ValueRegistry<R, B> {
    fn default() -> Self {
        Self {
            resolver: Resolver::new(),
            bound: PhantomData,
        }
    }
}

impl<R: Typed, B: Backend> ValueRegistry<R, B> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry pre-sized for `capacity` instances.
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

    /// Store `value` under its concrete type, returning the instance it
    /// replaced.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidBound`] if `T` is outside the bound.
    pub fn put<T: Typed>(&self, value: T) -> Result<Option<Instance>> {
        self.put_instance(Instance::new(value))
    }

    /// [`put`](Self::put) for an already shared value.
    pub fn put_shared<T: Typed>(&self, value: Arc<T>) -> Result<Option<Instance>> {
        self.put_instance(Instance::from_arc(value))
    }

    /// [`put`](Self::put) for a type-erased instance.
    pub fn put_instance(&self, instance: Instance) -> Result<Option<Instance>> {
        check_bound::<R>(instance.descriptor())?;
        trace!(type_name = instance.type_name(), "put");
        Ok(self.resolver.insert(instance))
    }

    /// Store `value` under its concrete type, which must be vacant.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Duplicate`] if an instance of `T` is already stored
    /// (the registry is left unchanged), or [`RegistryError::InvalidBound`].
    pub fn add<T: Typed>(&self, value: T) -> Result<()> {
        self.add_instance(Instance::new(value))
    }

    /// [`add`](Self::add) for an already shared value.
    pub fn add_shared<T: Typed>(&self, value: Arc<T>) -> Result<()> {
        self.add_instance(Instance::from_arc(value))
    }

    /// [`add`](Self::add) for a type-erased instance.
    pub fn add_instance(&self, instance: Instance) -> Result<()> {
        let descriptor = instance.descriptor();
        check_bound::<R>(descriptor)?;
        if self.resolver.insert_if_absent(instance) {
            trace!(type_name = descriptor.name(), "add");
            Ok(())
        } else {
            Err(RegistryError::duplicate(descriptor))
        }
    }

    /// Resolve `K`, or store the value produced by `supplier` and return it.
    ///
    /// Not atomic: with the concurrent backend, callers racing on the same
    /// miss may all run their supplier and all store the result. The registry
    /// ends with one instance for the concrete type (the last writer's), and
    /// each caller receives the instance it stored. Suppliers should be
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Lookup errors for `K`, or [`RegistryError::InvalidBound`] if the
    /// supplied value is not a `K` (nothing is stored then).
    pub fn get_or_put<K: Typed, T: Typed>(&self, supplier: impl FnOnce() -> T) -> Result<Instance> {
        self.get_or_put_by(K::descriptor(), || Instance::new(supplier()))
    }

    /// [`get_or_put`](Self::get_or_put) with a runtime key.
    pub fn get_or_put_by(
        &self,
        key: &'static TypeDescriptor,
        supplier: impl FnOnce() -> Instance,
    ) -> Result<Instance> {
        if let Some(found) = self.get_or_none_by(key)? {
            return Ok(found);
        }
        let instance = supplier();
        if !instance.is_a(key) {
            return Err(RegistryError::invalid_bound(instance.descriptor(), key));
        }
        self.put_instance(instance.clone())?;
        Ok(instance)
    }

    /// Remove the instance that is-a `K`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Ambiguous`] if several instances match (nothing is
    /// removed), or [`RegistryError::InvalidBound`].
    pub fn remove<K: Typed>(&self) -> Result<Option<Instance>> {
        self.remove_by(K::descriptor())
    }

    /// [`remove`](Self::remove) with a runtime key.
    pub fn remove_by(&self, key: &'static TypeDescriptor) -> Result<Option<Instance>> {
        check_bound::<R>(key)?;
        let removed = self.resolver.remove(key)?;
        if let Some(instance) = &removed {
            trace!(key = key.name(), type_name = instance.type_name(), "remove");
        }
        Ok(removed)
    }

    /// Remove every instance and every memoized outcome.
    pub fn clear(&self) {
        self.resolver.clear();
    }
}

impl<R: Typed, B: Backend> ValueLookup for ValueRegistry<R, B> {
    fn get_or_none_by(&self, key: &'static TypeDescriptor) -> Result<Option<Instance>> {
        check_bound::<R>(key)?;
        self.resolver.resolve(key)
    }

    fn exact_by(&self, key: &TypeDescriptor) -> Result<Option<Instance>> {
        check_bound::<R>(key)?;
        Ok(self.resolver.exact(key.hash()))
    }

    fn len(&self) -> usize {
        self.resolver.len()
    }

    fn cache_count(&self) -> usize {
        self.resolver.cache_count()
    }

    fn values(&self) -> Vec<Instance> {
        self.resolver.entries()
    }
}

impl<R: Typed, B: Backend> fmt::Debug for ValueRegistry<R, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueRegistry")
            .field("bound", &R::descriptor().name())
            .field("len", &self.resolver.len())
            .field("cache_count", &self.resolver.cache_count())
            .finish()
    }
}
