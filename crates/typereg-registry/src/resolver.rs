//! Ancestor resolution with an invalidation-coherent cache.
//!
//! Both registry families delegate to [`Resolver`]. Given a query type `Q` it
//! finds the unique stored entry whose concrete type is `Q` or a descendant of
//! `Q`:
//!
//! 1. A cached outcome for `Q` is returned as is, including a cached
//!    "not found".
//! 2. On a miss every stored entry is tested against `Q`.
//! 3. No match caches [`CacheSlot::NotFound`]; one match caches
//!    [`CacheSlot::Found`].
//! 4. Two or more matches fail with an ambiguous-lookup error and cache
//!    nothing.
//!
//! Any mutation of the store clears the whole cache: one insert or removal can
//! change the outcome of every query whose ancestor set contains the mutated
//! type, so the cache is never patched selectively.
//!
//! With the [`Concurrent`](crate::Concurrent) backend the scan, the cache write
//! and another thread's invalidation are not ordered. A scan that started
//! before a concurrent mutation can write its outcome after that mutation
//! cleared the cache. Such a stale `Found` or `NotFound` stays cached until the
//! next mutation of this registry; [`Resolver::exact`] is unaffected.

use tracing::{debug, trace};
use typereg_core::{RegistryError, Result, TypeDescriptor, TypeHash, Typed};

use crate::backend::{Backend, Table};
use crate::instance::Instance;

/// Something a registry stores: it knows its own concrete type.
pub trait Entry: Clone + Send + Sync + 'static {
    /// Descriptor of the concrete type.
    fn descriptor(&self) -> &'static TypeDescriptor;
}

impl Entry for Instance {
    #[inline]
    fn descriptor(&self) -> &'static TypeDescriptor {
        Instance::descriptor(self)
    }
}

impl Entry for &'static TypeDescriptor {
    #[inline]
    fn descriptor(&self) -> &'static TypeDescriptor {
        *self
    }
}

/// Memoized outcome of a query.
///
/// A key absent from the cache is a miss; `NotFound` is a confirmed absence.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheSlot<E> {
    /// The query resolved to this entry.
    Found(E),
    /// The query matched nothing.
    NotFound,
}

impl<E> CacheSlot<E> {
    /// Convert to the resolved entry, if any.
    pub fn into_option(self) -> Option<E> {
        match self {
            CacheSlot::Found(entry) => Some(entry),
            CacheSlot::NotFound => None,
        }
    }
}

/// Result of scanning the store for a query.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionResult<T> {
    /// Found exactly one match.
    Found(T),
    /// Found several matches; the caller has to disambiguate.
    Ambiguous(Vec<T>),
    /// No stored entry matched.
    NotFound,
}

impl<T> ResolutionResult<T> {
    /// Check if resolution found exactly one match.
    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionResult::Found(_))
    }

    /// Check if resolution was ambiguous.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ResolutionResult::Ambiguous(_))
    }

    /// Check if nothing matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolutionResult::NotFound)
    }
}

/// Backing store plus resolution cache, shared by both registry families.
pub struct Resolver<E: Entry, B: Backend> {
    store: B::Table<E>,
    cache: B::Table<CacheSlot<E>>,
}

impl<E: Entry, B: Backend> Default for Resolver<E, B> {
    fn default() -> Self {
        Self {
            store: Default::default(),
            cache: Default::default(),
        }
    }
}

impl<E: Entry, B: Backend> Resolver<E, B> {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver whose store is pre-sized for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: <B::Table<E> as Table<E>>::with_capacity(capacity),
            cache: Default::default(),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of memoized outcomes.
    pub fn cache_count(&self) -> usize {
        self.cache.len()
    }

    /// Snapshot of the stored entries.
    pub fn entries(&self) -> Vec<E> {
        self.store.snapshot()
    }

    /// Look up the entry stored under this exact concrete type.
    ///
    /// Never reads or fills the cache.
    pub fn exact(&self, hash: TypeHash) -> Option<E> {
        self.store.get(hash)
    }

    /// Resolve `key` to the unique entry that is-a `key`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Ambiguous`] if several stored entries match.
    pub fn resolve(&self, key: &'static TypeDescriptor) -> Result<Option<E>> {
        if let Some(slot) = self.cache.get(key.hash()) {
            return Ok(slot.into_option());
        }

        trace!(key = key.name(), "resolution cache miss");
        match self.scan(key) {
            ResolutionResult::Found(entry) => {
                self.cache.insert(key.hash(), CacheSlot::Found(entry.clone()));
                Ok(Some(entry))
            }
            ResolutionResult::NotFound => {
                self.cache.insert(key.hash(), CacheSlot::NotFound);
                Ok(None)
            }
            ResolutionResult::Ambiguous(matches) => {
                let candidates: Vec<_> = matches.iter().map(|e| e.descriptor().name()).collect();
                debug!(key = key.name(), ?candidates, "ambiguous lookup");
                Err(RegistryError::ambiguous(key, candidates))
            }
        }
    }

    /// Test every stored entry against `key`, bypassing the cache.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn scan(&self, key: &TypeDescriptor) -> ResolutionResult<E> {
        let mut matches = Vec::new();
        self.store.scan(&mut |entry| {
            if entry.descriptor().is_a(key) {
                matches.push(entry.clone());
            }
        });

        match matches.len() {
            0 => ResolutionResult::NotFound,
            1 => ResolutionResult::Found(matches.remove(0)),
            _ => ResolutionResult::Ambiguous(matches),
        }
    }

    /// Store `entry` under its concrete type, returning what it replaced.
    pub fn insert(&self, entry: E) -> Option<E> {
        let previous = self.store.insert(entry.descriptor().hash(), entry);
        self.invalidate();
        previous
    }

    /// Store `entry` only if its concrete type is vacant.
    ///
    /// The cache is cleared only when something was inserted.
    pub fn insert_if_absent(&self, entry: E) -> bool {
        let inserted = self.store.insert_if_absent(entry.descriptor().hash(), entry);
        if inserted {
            self.invalidate();
        }
        inserted
    }

    /// Resolve `key` and remove the entry it resolves to.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Ambiguous`] if several stored entries match; nothing
    /// is removed in that case.
    pub fn remove(&self, key: &'static TypeDescriptor) -> Result<Option<E>> {
        let Some(found) = self.resolve(key)? else {
            return Ok(None);
        };
        let removed = self.store.remove(found.descriptor().hash());
        self.invalidate();
        Ok(removed)
    }

    /// Drop every memoized outcome.
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    /// Empty both the store and the cache.
    pub fn clear(&self) {
        self.store.clear();
        self.cache.clear();
    }
}

/// Reject descriptors that are not `R` or a descendant of `R`.
pub(crate) fn check_bound<R: Typed>(descriptor: &TypeDescriptor) -> Result<()> {
    let bound = R::descriptor();
    if descriptor.is_a(bound) {
        Ok(())
    } else {
        debug!(type_name = descriptor.name(), bound = bound.name(), "rejected type outside bound");
        Err(RegistryError::invalid_bound(descriptor, bound))
    }
}
