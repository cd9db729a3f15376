//! Polymorphic type registries.
//!
//! Store values (or bare types) under their concrete type and look them up by
//! the concrete type or any declared ancestor of it:
//!
//! ```
//! use typereg::prelude::*;
//! use typereg::builtins::{CharSequence, Number};
//!
//! let registry = LocalValueRegistry::new();
//! registry.put(String::from("hello")).unwrap();
//! registry.put(42i32).unwrap();
//!
//! let text = registry.get::<CharSequence>().unwrap();
//! assert_eq!(text.downcast_ref::<String>().map(String::as_str), Some("hello"));
//! assert_eq!(registry.get_exact::<i32>().unwrap().as_ref(), &42);
//! assert!(registry.get::<Number>().is_ok());
//! ```
//!
//! Hierarchies for your own types are declared with [`impl_typed!`]:
//!
//! ```
//! use typereg::prelude::*;
//!
//! struct Plugin;
//! struct AudioPlugin;
//!
//! impl_typed! {
//!     Plugin: "app::Plugin";
//!     AudioPlugin: "app::AudioPlugin" => [Plugin];
//! }
//!
//! let plugins = RootedPresenceRegistry::<Plugin>::new();
//! plugins.add::<AudioPlugin>().unwrap();
//! assert_eq!(plugins.get::<Plugin>().unwrap().name(), "app::AudioPlugin");
//! assert!(plugins.add::<String>().unwrap_err().is_invalid_bound());
//! ```

pub mod logging;

pub use typereg_core::{
    ANY_TYPE_NAME, Ancestors, AnyType, ParentFn, RegistryError, Result, TypeDescriptor, TypeHash,
    Typed, builtins, descriptor_of, impl_typed,
};
pub use typereg_glob::{GlobError, GlobMatcher, glob_to_regex};
pub use typereg_registry::*;

pub mod prelude {
    pub use crate::{
        AnyType, Instance, LocalPresenceRegistry, LocalValueRegistry, PresenceLookup,
        RegistryError, RootedPresenceRegistry, RootedValueRegistry, TypeDescriptor, Typed,
        ValueLookup, impl_typed,
    };
    #[cfg(feature = "concurrent")]
    pub use crate::{
        ConcurrentPresenceRegistry, ConcurrentValueRegistry, RootedConcurrentPresenceRegistry,
        RootedConcurrentValueRegistry,
    };
}
