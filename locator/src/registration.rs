//! Bindings declared at item level and replayed into an injector later.
//!
//! The [`bind_static!`](crate::bind_static!) and
//! [`bind_static_fn!`](crate::bind_static_fn!) macros queue a registration
//! at link time; nothing is bound until
//! [`Injector::bind_static_mappings`] is called. The order in which queued
//! registrations are replayed is unspecified.

use crate::injector::Injector;
use tracing::debug;

/// A queued registration callback.
pub struct StaticBinding {
  register: fn(&Injector),
}

impl StaticBinding {
  pub const fn new(register: fn(&Injector)) -> Self {
    Self { register }
  }
}

inventory::collect!(StaticBinding);

impl Injector {
  /// Replays every statically declared binding into this injector.
  ///
  /// Calling it twice binds everything twice.
  pub fn bind_static_mappings(&self) {
    let mut count = 0_usize;
    for binding in inventory::iter::<StaticBinding> {
      (binding.register)(self);
      count += 1;
    }
    debug!(count, "bound static mappings");
  }
}

/// Queues `bind_impl::<Iface, Impl>()` for [`Injector::bind_static_mappings`].
///
/// ```
/// use fibre_locator::{bind_static, implements, Injector};
///
/// trait Clock: Send + Sync {}
/// #[derive(Default)]
/// struct SystemClock;
/// impl Clock for SystemClock {}
/// implements!(dyn Clock => SystemClock);
///
/// bind_static!(dyn Clock => SystemClock);
///
/// fn main() {
///   let injector = Injector::new();
///   assert!(injector.resolve::<dyn Clock>().is_none());
///   injector.bind_static_mappings();
///   assert!(injector.resolve::<dyn Clock>().is_some());
/// }
/// ```
#[macro_export]
macro_rules! bind_static {
  ($iface:ty => $impl:ty) => {
    const _: () = {
      fn register(injector: &$crate::Injector) {
        injector.bind_impl::<$iface, $impl>();
      }
      $crate::__private::inventory::submit! {
        $crate::StaticBinding::new(register)
      }
    };
  };
}

/// Queues `bind::<Type>(builder)` for [`Injector::bind_static_mappings`].
///
/// The builder either takes the injector, or no arguments at all when it
/// has no dependencies to resolve.
///
/// ```
/// use fibre_locator::{bind_static_fn, Injector};
/// use std::sync::Arc;
///
/// struct Settings {
///   retries: u32,
/// }
///
/// struct Banner(&'static str);
///
/// bind_static_fn!(Settings, |_| Ok(Some(Arc::new(Settings { retries: 3 }))));
/// bind_static_fn!(Banner, || Ok(Some(Arc::new(Banner("ready")))));
///
/// fn main() {
///   let injector = Injector::new();
///   injector.bind_static_mappings();
///   assert_eq!(injector.get::<Settings>().unwrap().retries, 3);
///   assert_eq!(injector.get::<Banner>().unwrap().0, "ready");
/// }
/// ```
#[macro_export]
macro_rules! bind_static_fn {
  ($ty:ty, || $body:expr $(,)?) => {
    $crate::bind_static_fn!($ty, |_| $body);
  };
  ($ty:ty, $builder:expr $(,)?) => {
    const _: () = {
      fn register(injector: &$crate::Injector) {
        injector.bind::<$ty, _>($builder);
      }
      $crate::__private::inventory::submit! {
        $crate::StaticBinding::new(register)
      }
    };
  };
}
