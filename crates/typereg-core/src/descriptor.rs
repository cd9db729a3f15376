//! Declared type hierarchies.
//!
//! Rust has no runtime subclass test, so every registrable type describes
//! itself with a `'static` [`TypeDescriptor`]: its qualified name, its
//! [`TypeHash`], and its direct parents. Parents are stored as function
//! pointers so a hierarchy can be declared in any order, across crates, without
//! static initialization ordering concerns.
//!
//! A type may have several parents (a base type plus interfaces), so the
//! hierarchy is a DAG. Every type implicitly descends from [`AnyType`].
//!
//! # Examples
//!
//! ```
//! use typereg_core::{impl_typed, Typed};
//!
//! pub struct Shape;
//! pub struct Drawable;
//! pub struct Circle(f32);
//!
//! impl_typed! {
//!     Shape: "demo::Shape";
//!     Drawable: "demo::Drawable";
//!     Circle: "demo::Circle" => [Shape, Drawable];
//! }
//!
//! assert!(Circle::descriptor().is_a(Shape::descriptor()));
//! assert!(Circle::descriptor().is_a(Drawable::descriptor()));
//! assert!(!Shape::descriptor().is_a(Circle::descriptor()));
//! ```

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::TypeHash;

/// Accessor for a parent descriptor.
pub type ParentFn = fn() -> &'static TypeDescriptor;

/// Qualified name of the implicit root of every hierarchy.
pub const ANY_TYPE_NAME: &str = "Any";

const ANY_TYPE_HASH: TypeHash = TypeHash::from_name(ANY_TYPE_NAME);

/// Static description of a registrable type.
///
/// Identity is the [`TypeHash`] of the qualified name: two descriptors with the
/// same name are the same type.
pub struct TypeDescriptor {
    name: &'static str,
    hash: TypeHash,
    parents: &'static [ParentFn],
}

impl TypeDescriptor {
    /// Create a descriptor with the given direct parents.
    pub const fn new(name: &'static str, parents: &'static [ParentFn]) -> Self {
        Self {
            name,
            hash: TypeHash::from_name(name),
            parents,
        }
    }

    /// Create a descriptor with no declared parents.
    pub const fn root(name: &'static str) -> Self {
        Self::new(name, &[])
    }

    /// Qualified name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Identity hash.
    #[inline]
    pub const fn hash(&self) -> TypeHash {
        self.hash
    }

    /// True for the descriptor of [`AnyType`].
    #[inline]
    pub fn is_any(&self) -> bool {
        self.hash == ANY_TYPE_HASH
    }

    /// Direct parents, in declaration order.
    pub fn parents(&self) -> impl Iterator<Item = &'static TypeDescriptor> + '_ {
        self.parents.iter().map(|parent| parent())
    }

    /// Every transitive ancestor, breadth-first, each reported once.
    ///
    /// The descriptor itself is never reported, even if a malformed
    /// declaration makes it its own ancestor.
    pub fn ancestors(&self) -> Ancestors {
        let mut queue = VecDeque::with_capacity(self.parents.len());
        queue.extend(self.parents());
        Ancestors {
            queue,
            seen: vec![self.hash],
        }
    }

    /// Check whether this type is `other` or a descendant of `other`.
    ///
    /// [`AnyType`] is an ancestor of everything.
    pub fn is_a(&self, other: &TypeDescriptor) -> bool {
        if other.is_any() || self.hash == other.hash {
            return true;
        }
        self.ancestors().any(|ancestor| ancestor.hash == other.hash)
    }

    /// Check whether this type is `other` or an ancestor of `other`.
    #[inline]
    pub fn is_ancestor_of(&self, other: &TypeDescriptor) -> bool {
        other.is_a(self)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("hash", &self.hash)
            .field("parents", &self.parents().map(|p| p.name).collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Breadth-first walk over the ancestors of a descriptor.
///
/// Created by [`TypeDescriptor::ancestors`].
pub struct Ancestors {
    queue: VecDeque<&'static TypeDescriptor>,
    seen: Vec<TypeHash>,
}

impl Iterator for Ancestors {
    type Item = &'static TypeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(next) = self.queue.pop_front() {
            if self.seen.contains(&next.hash) {
                continue;
            }
            self.seen.push(next.hash);
            self.queue.extend(next.parents());
            return Some(next);
        }
        None
    }
}

/// A Rust type that can be stored in, or used as a key of, a registry.
///
/// Abstract supertypes are modelled as marker types that implement `Typed`
/// and are listed as parents of their implementors. Use [`impl_typed!`] to
/// implement it.
///
/// [`impl_typed!`]: crate::impl_typed
pub trait Typed: Any + Send + Sync {
    /// The static descriptor of this type.
    fn descriptor() -> &'static TypeDescriptor;
}

/// Shorthand for `T::descriptor()`.
#[inline]
pub fn descriptor_of<T: Typed>() -> &'static TypeDescriptor {
    T::descriptor()
}

/// The implicit root of every hierarchy.
///
/// Used as the bound of unrooted registries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyType;

impl Typed for AnyType {
    fn descriptor() -> &'static TypeDescriptor {
        static DESCRIPTOR: TypeDescriptor = TypeDescriptor::root(ANY_TYPE_NAME);
        &DESCRIPTOR
    }
}

/// Implement [`Typed`] for one or more types.
///
/// Each line names the type, its qualified name, and optionally its direct
/// parents (which must implement `Typed` themselves).
///
/// ```
/// use typereg_core::{impl_typed, Typed};
///
/// pub struct Animal;
/// pub struct Dog;
///
/// impl_typed! {
///     Animal: "zoo::Animal";
///     Dog: "zoo::Dog" => [Animal];
/// }
///
/// assert_eq!(Dog::descriptor().name(), "zoo::Dog");
/// ```
#[macro_export]
macro_rules! impl_typed {
    ($($ty:ty : $name:literal $(=> [$($parent:ty),* $(,)?])?);+ $(;)?) => {
        $(
            impl $crate::Typed for $ty {
                fn descriptor() -> &'static $crate::TypeDescriptor {
                    const PARENTS: &[$crate::ParentFn] =
                        &[$($(<$parent as $crate::Typed>::descriptor),*)?];
                    static DESCRIPTOR: $crate::TypeDescriptor =
                        $crate::TypeDescriptor::new($name, PARENTS);
                    &DESCRIPTOR
                }
            }
        )+
    };
}
