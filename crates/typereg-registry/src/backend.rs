//! Storage backends.
//!
//! A registry keeps two tables keyed by [`TypeHash`]: the backing store and
//! the resolution cache. A [`Backend`] picks the table implementation for
//! both:
//!
//! - [`Local`]: `RefCell<FxHashMap>`, single-threaded (`Send`, not `Sync`)
//! - [`Concurrent`]: `DashMap`, shareable across threads
//!
//! Tables only offer single-key operations plus iteration. No operation spans
//! more than one key atomically, and the registries never add a lock on top.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use typereg_core::TypeHash;

/// A mutable map from [`TypeHash`] to `V` with interior mutability.
///
/// Values are handed out by clone; no references into the table escape.
pub trait Table<V: Clone>: Default {
    /// Create a table pre-sized for `capacity` entries.
    fn with_capacity(capacity: usize) -> Self;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Check if the table has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a clone of the value under `key`.
    fn get(&self, key: TypeHash) -> Option<V>;

    /// Insert `value`, returning the value it replaced.
    fn insert(&self, key: TypeHash, value: V) -> Option<V>;

    /// Insert `value` only if `key` is vacant. Returns `true` if inserted.
    fn insert_if_absent(&self, key: TypeHash, value: V) -> bool;

    /// Remove and return the value under `key`.
    fn remove(&self, key: TypeHash) -> Option<V>;

    /// Remove every entry.
    fn clear(&self);

    /// Visit every value. `visit` must not touch this table.
    fn scan(&self, visit: &mut dyn FnMut(&V));

    /// Clone every value into a vector.
    fn snapshot(&self) -> Vec<V> {
        let mut values = Vec::with_capacity(self.len());
        self.scan(&mut |value| values.push(value.clone()));
        values
    }
}

/// Selects the table implementation used by a registry.
pub trait Backend: 'static {
    /// Table type for values of type `V`.
    type Table<V: Clone + Send + Sync + 'static>: Table<V>;
}

/// Single-threaded backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Local;

impl Backend for Local {
    type Table<V: Clone + Send + Sync + 'static> = LocalTable<V>;
}

/// [`Table`] over a `RefCell<FxHashMap>`.
#[derive(Debug)]
pub struct LocalTable<V> {
    map: RefCell<FxHashMap<TypeHash, V>>,
}

impl<V> Default for LocalTable<V> {
    fn default() -> Self {
        Self {
            map: RefCell::new(FxHashMap::default()),
        }
    }
}

impl<V: Clone> Table<V> for LocalTable<V> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            map: RefCell::new(FxHashMap::with_capacity_and_hasher(capacity, Default::default())),
        }
    }

    fn len(&self) -> usize {
        self.map.borrow().len()
    }

    fn get(&self, key: TypeHash) -> Option<V> {
        self.map.borrow().get(&key).cloned()
    }

    fn insert(&self, key: TypeHash, value: V) -> Option<V> {
        self.map.borrow_mut().insert(key, value)
    }

    fn insert_if_absent(&self, key: TypeHash, value: V) -> bool {
        let mut map = self.map.borrow_mut();
        if map.contains_key(&key) {
            return false;
        }
        map.insert(key, value);
        true
    }

    fn remove(&self, key: TypeHash) -> Option<V> {
        self.map.borrow_mut().remove(&key)
    }

    fn clear(&self) {
        self.map.borrow_mut().clear();
    }

    fn scan(&self, visit: &mut dyn FnMut(&V)) {
        for value in self.map.borrow().values() {
            visit(value);
        }
    }
}

#[cfg(feature = "concurrent")]
pub use concurrent::{Concurrent, ConcurrentTable};

#[cfg(feature = "concurrent")]
mod concurrent {
    use dashmap::DashMap;
    use dashmap::mapref::entry::Entry;
    use rustc_hash::FxBuildHasher;
    use typereg_core::TypeHash;

    use super::{Backend, Table};

    /// Thread-safe backend.
    ///
    /// Single-key operations are atomic. Iteration is safe under concurrent
    /// mutation but is not a snapshot: entries inserted or removed while a scan
    /// runs may or may not be observed.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Concurrent;

    impl Backend for Concurrent {
        type Table<V: Clone + Send + Sync + 'static> = ConcurrentTable<V>;
    }

    /// [`Table`] over a sharded `DashMap`.
    #[derive(Debug)]
    pub struct ConcurrentTable<V> {
        map: DashMap<TypeHash, V, FxBuildHasher>,
    }

    impl<V> Default for ConcurrentTable<V> {
        fn default() -> Self {
            Self {
                map: DashMap::with_hasher(FxBuildHasher),
            }
        }
    }

    impl<V: Clone> Table<V> for ConcurrentTable<V> {
        fn with_capacity(capacity: usize) -> Self {
            Self {
                map: DashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            }
        }

        fn len(&self) -> usize {
            self.map.len()
        }

        fn get(&self, key: TypeHash) -> Option<V> {
            self.map.get(&key).map(|entry| entry.value().clone())
        }

        fn insert(&self, key: TypeHash, value: V) -> Option<V> {
            self.map.insert(key, value)
        }

        fn insert_if_absent(&self, key: TypeHash, value: V) -> bool {
            match self.map.entry(key) {
                Entry::Occupied(_) => false,
                Entry::Vacant(slot) => {
                    slot.insert(value);
                    true
                }
            }
        }

        fn remove(&self, key: TypeHash) -> Option<V> {
            self.map.remove(&key).map(|(_, value)| value)
        }

        fn clear(&self) {
            self.map.clear();
        }

        fn scan(&self, visit: &mut dyn FnMut(&V)) {
            for entry in self.map.iter() {
                visit(entry.value());
            }
        }
    }
}
