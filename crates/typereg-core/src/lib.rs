//! Type identity for the typereg registries.
//!
//! - [`TypeHash`]: deterministic identity computed from a qualified name
//! - [`TypeDescriptor`] / [`Typed`]: declared hierarchies with an `is_a` test
//! - [`builtins`]: a hierarchy for standard library types
//! - [`RegistryError`]: the errors every registry operation can report

pub mod builtins;
mod descriptor;
mod error;
mod type_hash;

pub use descriptor::{
    ANY_TYPE_NAME, Ancestors, AnyType, ParentFn, TypeDescriptor, Typed, descriptor_of,
};
pub use error::{RegistryError, Result};
pub use type_hash::TypeHash;
