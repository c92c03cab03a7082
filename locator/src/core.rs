//! Core, non-public data structures for the injector.

use crate::error::{BoxError, BuilderPanicked};
use crate::injector::Injector;
use once_cell::sync::OnceCell;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// A type-erased shared service handle. Always wraps an `Arc<T>` for the
/// service type `T` it was registered under.
pub(crate) type Instance = Arc<dyn Any + Send + Sync>;

type ErasedBuilder = Box<dyn Fn(&Injector) -> Result<Option<Instance>, BoxError> + Send + Sync>;

pub(crate) type Registry = HashMap<ServiceKey, TypeRecord>;

/// Identity of a service contract. Compared and hashed by `TypeId` only; the
/// type name is carried for diagnostics.
#[derive(Clone, Copy)]
pub(crate) struct ServiceKey {
  type_id: TypeId,
  name: &'static str,
}

impl ServiceKey {
  pub(crate) fn of<T: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
    }
  }

  pub(crate) fn name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for ServiceKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl fmt::Debug for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key({})", self.name)
  }
}

/// One registered way of producing an instance, plus its memoized result.
pub(crate) struct Binding {
  instance: OnceCell<Instance>,
  builder: ErasedBuilder,
}

impl Binding {
  pub(crate) fn new<T, F>(builder: F) -> Self
  where
    T: ?Sized + Any + Send + Sync,
    F: Fn(&Injector) -> Result<Option<Arc<T>>, BoxError> + Send + Sync + 'static,
  {
    Self {
      instance: OnceCell::new(),
      builder: Box::new(move |injector| {
        Ok(builder(injector)?.map(|service| Arc::new(service) as Instance))
      }),
    }
  }

  pub(crate) fn cached(&self) -> Option<&Instance> {
    self.instance.get()
  }

  /// Runs the builder. A panic is turned into an error so the caller can
  /// treat it like any other failed binding.
  pub(crate) fn build(&self, injector: &Injector) -> Result<Option<Instance>, BoxError> {
    match panic::catch_unwind(AssertUnwindSafe(|| (self.builder)(injector))) {
      Ok(result) => result,
      Err(payload) => Err(Box::new(BuilderPanicked {
        message: panic_message(payload.as_ref()),
      })),
    }
  }

  /// Memoizes `instance`. If the cell was filled in the meantime the earlier
  /// value wins and is returned.
  pub(crate) fn store(&self, instance: Instance) -> Instance {
    self.instance.get_or_init(|| instance).clone()
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&'static str>() {
    (*message).to_owned()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "non-string panic payload".to_owned()
  }
}

/// Every binding registered for one service type, in priority order.
#[derive(Default)]
pub(crate) struct TypeRecord {
  pub(crate) bindings: Vec<Arc<Binding>>,
  pub(crate) in_building: bool,
}

impl TypeRecord {
  pub(crate) fn with_binding(binding: Binding) -> Self {
    Self {
      bindings: vec![Arc::new(binding)],
      in_building: false,
    }
  }
}

/// Clears a record's `in_building` flag when dropped, so the flag never
/// outlives the resolve call that set it, whichever way that call exits.
pub(crate) struct BuildingGuard<'a> {
  types: &'a RefCell<Registry>,
  key: ServiceKey,
}

impl<'a> BuildingGuard<'a> {
  /// Sets the flag for `key`. Returns `None` if the record is missing or
  /// already being built.
  pub(crate) fn enter(types: &'a RefCell<Registry>, key: ServiceKey) -> Option<Self> {
    let mut registry = types.borrow_mut();
    let record = registry.get_mut(&key)?;
    if record.in_building {
      return None;
    }
    record.in_building = true;
    Some(Self { types, key })
  }
}

impl Drop for BuildingGuard<'_> {
  fn drop(&mut self) {
    // The record may have been replaced by a nested call; the fresh one
    // starts cleared, so resetting it is harmless.
    if let Ok(mut registry) = self.types.try_borrow_mut() {
      if let Some(record) = registry.get_mut(&self.key) {
        record.in_building = false;
      }
    }
  }
}
