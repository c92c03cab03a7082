//! Error types surfaced by the injector.

use std::error::Error as StdError;

/// The error type builders may fail with.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors returned by the fallible resolution accessors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InjectError {
  /// No binding produced an instance: the type is unregistered, every
  /// builder failed or returned nothing, or the call was recursive.
  #[error("could not find dependency {service} in injector")]
  DependencyNotFound { service: &'static str },
  /// A default-injector accessor was used before one was installed.
  #[error("no default injector set")]
  NoDefaultInjector,
}

impl InjectError {
  pub(crate) fn not_found<T: ?Sized>() -> Self {
    InjectError::DependencyNotFound {
      service: std::any::type_name::<T>(),
    }
  }
}

/// A builder failure, handed to the injector's error handler.
///
/// Never returned to the caller of `resolve`/`resolve_all`; resolution moves
/// on to the next binding instead.
#[derive(Debug, thiserror::Error)]
#[error("builder for {service} failed: {source}")]
pub struct BuildError {
  service: &'static str,
  #[source]
  source: BoxError,
}

impl BuildError {
  pub(crate) fn new(service: &'static str, source: BoxError) -> Self {
    Self { service, source }
  }

  /// Type name of the service whose builder failed.
  pub fn service(&self) -> &'static str {
    self.service
  }

  /// Returns `true` if the builder panicked rather than returning an error.
  pub fn is_panic(&self) -> bool {
    self.source.is::<BuilderPanicked>()
  }
}

/// Stand-in source error for a builder that panicked.
#[derive(Debug, Clone, thiserror::Error)]
#[error("builder panicked: {message}")]
pub struct BuilderPanicked {
  pub message: String,
}
