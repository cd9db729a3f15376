//! Type-erased shared values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use typereg_core::{TypeDescriptor, Typed};

/// A stored value together with the descriptor of its concrete type.
///
/// Cloning an `Instance` clones the `Arc`, never the value: the registry and
/// every caller holding the instance share one allocation.
#[derive(Clone)]
pub struct Instance {
    descriptor: &'static TypeDescriptor,
    value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    /// Wrap a value.
    pub fn new<T: Typed>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap an already shared value without copying it.
    pub fn from_arc<T: Typed>(value: Arc<T>) -> Self {
        Self {
            descriptor: T::descriptor(),
            value,
        }
    }

    /// Descriptor of the concrete type.
    #[inline]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    /// Name of the concrete type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.descriptor.name()
    }

    /// Check whether the concrete type is `key` or a descendant of it.
    #[inline]
    pub fn is_a(&self, key: &TypeDescriptor) -> bool {
        self.descriptor.is_a(key)
    }

    /// Check whether the value is exactly a `T`.
    pub fn is<T: Typed>(&self) -> bool {
        (*self.value).is::<T>()
    }

    /// Borrow the value as a `T`.
    pub fn downcast_ref<T: Typed>(&self) -> Option<&T> {
        (*self.value).downcast_ref::<T>()
    }

    /// Get a shared handle to the value as a `T`.
    pub fn downcast<T: Typed>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// Check whether two instances share the same allocation.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl<T: Typed> From<Arc<T>> for Instance {
    fn from(value: Arc<T>) -> Self {
        Self::from_arc(value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.descriptor.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typereg_core::builtins::{CharSequence, Number};

    #[test]
    fn downcast_to_concrete_type() {
        let instance = Instance::new(String::from("hello"));
        assert!(instance.is::<String>());
        assert!(!instance.is::<i32>());
        assert_eq!(instance.downcast_ref::<String>().map(String::as_str), Some("hello"));
        assert_eq!(instance.downcast::<String>().as_deref().map(String::as_str), Some("hello"));
        assert!(instance.downcast::<i32>().is_none());
    }

    #[test]
    fn descriptor_follows_concrete_type() {
        let instance = Instance::new(42i64);
        assert_eq!(instance.type_name(), "i64");
        assert!(instance.is_a(Number::descriptor()));
        assert!(!instance.is_a(CharSequence::descriptor()));
    }

    #[test]
    fn shares_allocation() {
        let shared = Arc::new(7u8);
        let instance = Instance::from(Arc::clone(&shared));
        let clone = instance.clone();
        assert!(instance.ptr_eq(&clone));
        assert_eq!(Arc::strong_count(&shared), 3);
        let back = instance.downcast::<u8>().unwrap();
        assert!(Arc::ptr_eq(&shared, &back));
    }

    #[test]
    fn debug_shows_type_name() {
        let instance = Instance::new(1.5f64);
        assert_eq!(format!("{instance:?}"), "Instance { type: \"f64\", .. }");
    }
}
