//! Deterministic hash-based type identity.
//!
//! This module provides [`TypeHash`], a 64-bit hash that uniquely identifies a
//! registrable type. Hashes are computed from the qualified type name, which
//! means:
//!
//! - The hash is known at compile time (`const fn`)
//! - No registration order dependencies
//! - Same name = same hash, independent of the Rust type that carries it
//!
//! # Hash Computation
//!
//! Uses XXHash64 mixed with a domain constant so type hashes never collide with
//! raw XXHash values computed elsewhere from the same bytes.
//!
//! # Examples
//!
//! ```
//! use typereg_core::TypeHash;
//!
//! let int_hash = TypeHash::from_name("Int");
//! let same_hash = TypeHash::from_name("Int");
//! assert_eq!(int_hash, same_hash);
//! assert_ne!(int_hash, TypeHash::from_name("Long"));
//! ```

use std::fmt;
use xxhash_rust::const_xxh64::xxh64;

/// Domain marker mixed into every type hash.
const TYPE_DOMAIN: u64 = 0x2fac10b63a6cc57c;

/// A deterministic 64-bit hash identifying a type.
///
/// Computed from the qualified name. The same input always produces the same
/// hash, so descriptors can be declared in any order and compared cheaply.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Create a type hash from a qualified type name.
    ///
    /// The same name always produces the same hash.
    ///
    /// # Examples
    ///
    /// ```
    /// use typereg_core::TypeHash;
    ///
    /// const NUMBER: TypeHash = TypeHash::from_name("Number");
    /// assert_eq!(NUMBER, TypeHash::from_name("Number"));
    /// ```
    #[inline]
    pub const fn from_name(name: &str) -> Self {
        TypeHash(TYPE_DOMAIN ^ xxh64(name.as_bytes(), 0))
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_hash_determinism() {
        let hash1 = TypeHash::from_name("Int");
        let hash2 = TypeHash::from_name("Int");
        assert_eq!(hash1, hash2);

        let hash3 = TypeHash::from_name("game::Player");
        let hash4 = TypeHash::from_name("game::Player");
        assert_eq!(hash3, hash4);
    }

    #[test]
    fn type_hash_uniqueness() {
        let int_hash = TypeHash::from_name("Int");
        let long_hash = TypeHash::from_name("Long");
        let number_hash = TypeHash::from_name("Number");

        assert_ne!(int_hash, long_hash);
        assert_ne!(int_hash, number_hash);
        assert_ne!(long_hash, number_hash);
    }

    #[test]
    fn const_and_runtime_agree() {
        const AT_COMPILE_TIME: TypeHash = TypeHash::from_name("CharSequence");
        let name = String::from("CharSequence");
        assert_eq!(AT_COMPILE_TIME, TypeHash::from_name(&name));
    }

    #[test]
    fn debug_format() {
        let hash = TypeHash(0x1234);
        assert_eq!(format!("{:?}", hash), "TypeHash(0x0000000000001234)");
    }
}
