//! A handle that resolves its service on first use.

use crate::error::InjectError;
use crate::global;
use crate::injector::Injector;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Resolves `T` on first access and keeps the result.
///
/// Useful for fields of long-lived objects created before their services
/// are registered. By default the handle resolves from the default injector;
/// use [`LazyHandle::with_injector`] to pin it to a specific one.
///
/// Dereferencing panics if `T` cannot be resolved. Use [`get`] or
/// [`try_get`] to handle that case.
///
/// Two threads racing on the first access may both resolve; only one result
/// is kept.
///
/// [`get`]: LazyHandle::get
/// [`try_get`]: LazyHandle::try_get
pub struct LazyHandle<T: ?Sized> {
  instance: OnceCell<Arc<T>>,
  injector: Option<Arc<Injector>>,
}

impl<T: ?Sized> Default for LazyHandle<T> {
  fn default() -> Self {
    Self {
      instance: OnceCell::new(),
      injector: None,
    }
  }
}

impl<T: ?Sized + Any + Send + Sync> LazyHandle<T> {
  /// A handle resolving from the default injector.
  pub fn new() -> Self {
    Self::default()
  }

  /// A handle resolving from `injector`.
  pub fn with_injector(injector: Arc<Injector>) -> Self {
    Self {
      instance: OnceCell::new(),
      injector: Some(injector),
    }
  }

  /// Returns the service, resolving it if this is the first access.
  pub fn get(&self) -> Result<Arc<T>, InjectError> {
    self.cached_or_resolve().map(Arc::clone)
  }

  /// Like [`get`](LazyHandle::get), with failures mapped to `None`. A miss
  /// is not remembered; the next access resolves again.
  pub fn try_get(&self) -> Option<Arc<T>> {
    self.get().ok()
  }

  /// Returns `true` if the service has already been resolved.
  pub fn is_resolved(&self) -> bool {
    self.instance.get().is_some()
  }

  /// Forgets the resolved service; the next access resolves again.
  pub fn reset(&mut self) {
    self.instance.take();
  }

  fn cached_or_resolve(&self) -> Result<&Arc<T>, InjectError> {
    if let Some(instance) = self.instance.get() {
      return Ok(instance);
    }
    let resolved = match &self.injector {
      Some(injector) => injector.get::<T>(),
      None => global::get::<T>(),
    }?;
    Ok(self.instance.get_or_init(|| resolved))
  }
}

impl<T: ?Sized + Any + Send + Sync> Deref for LazyHandle<T> {
  type Target = T;

  fn deref(&self) -> &T {
    match self.cached_or_resolve() {
      Ok(instance) => &**instance,
      Err(error) => panic!("{error}"),
    }
  }
}

impl<T: ?Sized> fmt::Debug for LazyHandle<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LazyHandle")
      .field("service", &std::any::type_name::<T>())
      .field("resolved", &self.instance.get().is_some())
      .finish()
  }
}
