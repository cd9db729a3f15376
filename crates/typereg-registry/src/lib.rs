//! Polymorphic type registries.
//!
//! Two registry families share one resolution core:
//!
//! - [`ValueRegistry`]: at most one value per concrete type, retrieved by the
//!   concrete type or any of its ancestors
//! - [`PresenceRegistry`]: a set of types, queried the same way
//!
//! A lookup for `Q` answers with the unique stored entry that is-a `Q`.
//! Outcomes, including "not found", are memoized until the next mutation.
//! Each family comes in single-threaded ([`Local`]) and thread-safe
//! ([`Concurrent`]) flavors, optionally bounded by a root type `R`.

mod backend;
mod instance;
mod presence_registry;
mod resolver;
mod value_registry;

pub use backend::{Backend, Local, LocalTable, Table};
#[cfg(feature = "concurrent")]
pub use backend::{Concurrent, ConcurrentTable};
pub use instance::Instance;
pub use presence_registry::{
    LocalPresenceRegistry, PresenceLookup, PresenceRegistry, RootedPresenceRegistry,
};
#[cfg(feature = "concurrent")]
pub use presence_registry::{ConcurrentPresenceRegistry, RootedConcurrentPresenceRegistry};
pub use resolver::{CacheSlot, Entry, ResolutionResult, Resolver};
pub use value_registry::{LocalValueRegistry, RootedValueRegistry, ValueLookup, ValueRegistry};
#[cfg(feature = "concurrent")]
pub use value_registry::{ConcurrentValueRegistry, RootedConcurrentValueRegistry};
