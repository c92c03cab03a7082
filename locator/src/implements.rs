//! Upcasting from an implementation type to the interface it is bound under.

use std::sync::Arc;

/// Converts a shared implementation into a shared interface handle.
///
/// Every type implements this for itself. Implementations for trait objects
/// are one line each with the [`implements!`](crate::implements!) macro:
///
/// ```
/// use fibre_locator::{implements, Implements};
/// use std::sync::Arc;
///
/// trait Store: Send + Sync {}
///
/// struct MemoryStore;
/// impl Store for MemoryStore {}
///
/// implements!(dyn Store => MemoryStore);
///
/// let store: Arc<dyn Store> = Arc::new(MemoryStore).upcast();
/// ```
pub trait Implements<I: ?Sized> {
  fn upcast(self: Arc<Self>) -> Arc<I>;
}

impl<T: Send + Sync + 'static> Implements<T> for T {
  fn upcast(self: Arc<Self>) -> Arc<T> {
    self
  }
}

/// Declares that one or more concrete types implement an interface, so they
/// can be used with [`Injector::bind_impl`](crate::Injector::bind_impl).
///
/// ```
/// use fibre_locator::implements;
///
/// trait Sink: Send + Sync {}
/// struct Console;
/// struct Null;
/// impl Sink for Console {}
/// impl Sink for Null {}
///
/// implements!(dyn Sink => Console, Null);
/// ```
#[macro_export]
macro_rules! implements {
  ($iface:ty => $($impl:ty),+ $(,)?) => {
    $(
      impl $crate::Implements<$iface> for $impl {
        fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$iface> {
          self
        }
      }
    )+
  };
}
