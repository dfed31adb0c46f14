//! Host values carried inside a [`Value`] without a JSON representation.
use alloc::{boxed::Box, sync::Arc};
use core::{
    any::{Any, TypeId},
    fmt,
};

use crate::{error::DecodeError, value::Value};

/// A shared, type-erased host value plus a runtime tag naming its type.
///
/// Cloning an `Opaque` clones the handle, not the value. Downcasts never
/// panic: [`Opaque::downcast`] reports a [`DecodeError::TypeMismatch`] when
/// the stored value is not a `T`.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    /// Wraps `value`, recording its type name.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: core::any::type_name::<T>(),
            inner: Arc::new(value),
        }
    }

    /// Adopts an already-boxed value. The concrete type is no longer known
    /// statically, so the tag records only that it came from a box.
    pub(crate) fn from_boxed(value: Box<dyn Any + Send + Sync>) -> Self {
        Self {
            type_name: "dyn Any",
            inner: Arc::from(value),
        }
    }

    /// The name of the stored type, as recorded when the value was wrapped.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The [`TypeId`] of the stored value.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    /// Whether the stored value is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrows the stored value as a `T`, if that is its type.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Clones the stored value out as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TypeMismatch`] when the stored value is not a
    /// `T`.
    pub fn downcast<T: Any + Clone>(&self) -> Result<T, DecodeError> {
        self.downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| DecodeError::type_mismatch::<T>(&Value::Opaque(self.clone())))
    }

    /// Returns `true` when both handles point at the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque<{}>", self.type_name)
    }
}
