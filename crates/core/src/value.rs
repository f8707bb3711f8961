//! Type-erased bucket values
//!
//! Pools are generic over their value type. When one pool has to hold
//! values of different concrete types, use [`AnyValue`]: it stores any
//! `Send + Sync + 'static` value behind a shared pointer and hands it back
//! through a checked downcast.
//!
//! ## Reading back
//!
//! The caller must know (or test for) the concrete type on read:
//! - [`AnyValue::downcast_ref`] borrows, returning `None` on mismatch
//! - [`AnyValue::downcast`] returns a shared pointer or [`Error::WrongType`]
//!
//! Cloning an `AnyValue` is a reference-count bump; the stored value itself
//! is never copied.

use crate::error::{Error, Result};
use std::any::{type_name, Any};
use std::sync::Arc;

/// A shared, type-erased value
#[derive(Clone)]
pub struct AnyValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl AnyValue {
    /// Wrap a concrete value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Explicit "no value" marker
    ///
    /// Writing a null is a real write: the bucket gets a fresh timestamp.
    /// Only the timestamp tells it apart from a bucket never written.
    pub fn null() -> Self {
        Self::new(())
    }

    /// True if this is the [`AnyValue::null`] marker
    pub fn is_null(&self) -> bool {
        self.is::<()>()
    }

    /// Name of the stored concrete type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// True if the stored value is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrow the stored value as a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Shared pointer to the stored value as a `T`
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the stored value is not a `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        Arc::clone(&self.inner)
            .downcast::<T>()
            .map_err(|_| Error::WrongType {
                expected: type_name::<T>(),
                actual: self.type_name,
            })
    }
}

impl std::fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyValue")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}
