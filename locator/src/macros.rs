//! Public macros for ergonomic service resolution.

/// Resolves a service from the default injector.
///
/// # Panics
///
/// Panics if there is no default injector or the service cannot be
/// resolved. For a non-panicking version, use [`maybe_resolve!`] or
/// [`get`](crate::get) directly.
///
/// # Examples
///
/// ```
/// use fibre_locator::{resolve, set_default_injector, Injector};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///   fn greet(&self) -> String;
/// }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter {
///   fn greet(&self) -> String {
///     "Hello!".to_string()
///   }
/// }
///
/// let injector = Arc::new(Injector::new());
/// injector.bind::<String, _>(|_| Ok(Some(Arc::new("hello".to_string()))));
/// injector.bind::<dyn Greeter, _>(|_| Ok(Some(Arc::new(EnglishGreeter))));
/// set_default_injector(Some(injector));
///
/// assert_eq!(*resolve!(String), "hello");
/// assert_eq!(resolve!(trait Greeter).greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  // Trait objects: resolve!(trait MyTrait)
  (trait $trait_ident:ident) => {
    $crate::get::<dyn $trait_ident>().unwrap_or_else(|error| {
      panic!(
        "Failed to resolve required trait service {}: {}",
        ::std::any::type_name::<dyn $trait_ident>(),
        error
      )
    })
  };

  ($type:ty) => {
    $crate::get::<$type>().unwrap_or_else(|error| {
      panic!(
        "Failed to resolve required service {}: {}",
        ::std::any::type_name::<$type>(),
        error
      )
    })
  };
}

/// Resolves a service from the default injector, returning an `Option`.
#[macro_export]
macro_rules! maybe_resolve {
  (trait $trait_ident:ident) => {
    $crate::try_get::<dyn $trait_ident>()
  };

  ($type:ty) => {
    $crate::try_get::<$type>()
  };
}

/// Resolves a service from the given injector, panicking if it is missing.
///
/// ```
/// use fibre_locator::{resolve_from, Injector};
/// use std::sync::Arc;
///
/// let injector = Injector::new();
/// injector.bind_instance(Arc::new(42_u32));
///
/// assert_eq!(*resolve_from!(injector, u32), 42);
/// ```
#[macro_export]
macro_rules! resolve_from {
  ($injector:expr, trait $trait_ident:ident) => {
    $injector
      .get::<dyn $trait_ident>()
      .unwrap_or_else(|error| panic!("Failed to resolve required trait service: {}", error))
  };

  ($injector:expr, $type:ty) => {
    $injector
      .get::<$type>()
      .unwrap_or_else(|error| panic!("Failed to resolve required service: {}", error))
  };
}

/// Resolves a service from the given injector, returning an `Option`.
#[macro_export]
macro_rules! maybe_resolve_from {
  ($injector:expr, trait $trait_ident:ident) => {
    $injector.resolve::<dyn $trait_ident>()
  };

  ($injector:expr, $type:ty) => {
    $injector.resolve::<$type>()
  };
}
