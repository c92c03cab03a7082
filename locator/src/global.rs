//! The process-wide default injector and its convenience accessors.
//!
//! Passing an [`Injector`] explicitly is preferred; these functions exist for
//! call sites where threading one through is impractical. Install the
//! default once at startup with [`set_default_injector`].

use crate::error::InjectError;
use crate::injector::Injector;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;

static DEFAULT_INJECTOR: Lazy<RwLock<Option<Arc<Injector>>>> = Lazy::new(|| RwLock::new(None));

/// Installs (or with `None`, removes) the default injector.
///
/// # Examples
///
/// ```
/// use fibre_locator::{default_injector, set_default_injector, Injector};
/// use std::sync::Arc;
///
/// set_default_injector(Some(Arc::new(Injector::new())));
/// assert!(default_injector().is_some());
/// ```
pub fn set_default_injector(injector: Option<Arc<Injector>>) {
  *DEFAULT_INJECTOR.write() = injector;
}

/// Returns the current default injector, if one was installed.
pub fn default_injector() -> Option<Arc<Injector>> {
  DEFAULT_INJECTOR.read().clone()
}

/// Resolves `T` from the default injector.
pub fn get<T: ?Sized + Any + Send + Sync>() -> Result<Arc<T>, InjectError> {
  default_injector()
    .ok_or(InjectError::NoDefaultInjector)?
    .get::<T>()
}

/// Resolves `T` from the default injector, or `None` if there is no default
/// injector or `T` cannot be resolved.
pub fn try_get<T: ?Sized + Any + Send + Sync>() -> Option<Arc<T>> {
  default_injector()?.resolve::<T>()
}

/// Resolves every binding of `T` from the default injector.
///
/// Only a missing default injector is an error; an unregistered `T` yields
/// an empty vector.
pub fn get_all<T: ?Sized + Any + Send + Sync>() -> Result<Vec<Arc<T>>, InjectError> {
  default_injector()
    .map(|injector| injector.resolve_all::<T>())
    .ok_or(InjectError::NoDefaultInjector)
}

/// Like [`get_all`], with an empty vector when no default injector is set.
pub fn try_get_all<T: ?Sized + Any + Send + Sync>() -> Vec<Arc<T>> {
  default_injector()
    .map(|injector| injector.resolve_all::<T>())
    .unwrap_or_default()
}
