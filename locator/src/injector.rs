//! The `Injector` registry and its resolution engine.

use crate::core::{Binding, BuildingGuard, Instance, Registry, ServiceKey, TypeRecord};
use crate::error::{BoxError, BuildError, InjectError};
use crate::implements::Implements;
use parking_lot::ReentrantMutex;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// What a builder returns: an instance, `Ok(None)` for "nothing to offer",
/// or an error. The latter two both make resolution move on to the next
/// binding.
pub type BuildResult<T> = Result<Option<Arc<T>>, BoxError>;

/// Callback receiving builder failures. See [`Injector::set_error_handler`].
pub type ErrorHandler = Arc<dyn Fn(&BuildError) + Send + Sync>;

struct State {
  types: RefCell<Registry>,
  error_handler: RefCell<Option<ErrorHandler>>,
}

/// A registry mapping service types to one or more builders.
///
/// Instances are built lazily on first resolution and memoized per binding,
/// so resolving a type twice hands out the same `Arc`. Every public method
/// holds the injector's reentrant lock for its whole duration, which lets a
/// builder call back into the same injector (to resolve its own dependencies,
/// or even to bind new services) without deadlocking.
///
/// A builder that resolves its *own* service type, directly or through a
/// cycle, gets `None` from the nested call instead of recursing forever.
///
/// # Builder failures are silent by default
///
/// A builder error (or panic) never reaches the caller of [`resolve`] or
/// [`resolve_all`]; the failing binding is skipped and the next one is tried.
/// Install an [`ErrorHandler`] with [`set_error_handler`] to observe them.
///
/// [`resolve`]: Injector::resolve
/// [`resolve_all`]: Injector::resolve_all
/// [`set_error_handler`]: Injector::set_error_handler
pub struct Injector {
  state: ReentrantMutex<State>,
}

impl Default for Injector {
  fn default() -> Self {
    Self {
      state: ReentrantMutex::new(State {
        types: RefCell::new(Registry::new()),
        error_handler: RefCell::new(None),
      }),
    }
  }
}

impl Injector {
  /// Creates a new, empty `Injector`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- Registration ---

  /// Appends a builder for `T`. Earlier bindings for `T` are kept and take
  /// priority in [`resolve`](Injector::resolve).
  ///
  /// ```
  /// use fibre_locator::Injector;
  /// use std::sync::Arc;
  ///
  /// let injector = Injector::new();
  /// injector.bind::<String, _>(|_| Ok(Some(Arc::new("hello".to_string()))));
  ///
  /// assert_eq!(*injector.get::<String>().unwrap(), "hello");
  /// ```
  pub fn bind<T, F>(&self, builder: F)
  where
    T: ?Sized + Any + Send + Sync,
    F: Fn(&Injector) -> BuildResult<T> + Send + Sync + 'static,
  {
    let state = self.state.lock();
    let key = ServiceKey::of::<T>();
    let mut types = state.types.borrow_mut();
    let record = types.entry(key).or_default();
    record.bindings.push(Arc::new(Binding::new(builder)));
    trace!(service = key.name(), bindings = record.bindings.len(), "bound service");
  }

  /// Binds an already constructed instance of `T`.
  pub fn bind_instance<T: ?Sized + Any + Send + Sync>(&self, instance: Arc<T>) {
    self.bind::<T, _>(move |_| Ok(Some(Arc::clone(&instance))));
  }

  /// Binds `Impl` (built with `Default`) and, unless `I` is `Impl` itself,
  /// binds `I` to whatever resolving `Impl` yields. Both types therefore
  /// share a single instance. If `Impl` cannot be resolved, the `I` binding
  /// fails with [`InjectError::DependencyNotFound`], which reaches the error
  /// handler like any other builder failure.
  ///
  /// ```
  /// use fibre_locator::{implements, Injector};
  /// use std::sync::Arc;
  ///
  /// trait Greeter: Send + Sync {
  ///   fn greet(&self) -> &str;
  /// }
  ///
  /// #[derive(Default)]
  /// struct English;
  /// impl Greeter for English {
  ///   fn greet(&self) -> &str {
  ///     "Hello!"
  ///   }
  /// }
  /// implements!(dyn Greeter => English);
  ///
  /// let injector = Injector::new();
  /// injector.bind_impl::<dyn Greeter, English>();
  ///
  /// assert_eq!(injector.get::<dyn Greeter>().unwrap().greet(), "Hello!");
  /// ```
  pub fn bind_impl<I, Impl>(&self)
  where
    I: ?Sized + Any + Send + Sync,
    Impl: Implements<I> + Default + Any + Send + Sync,
  {
    let _state = self.state.lock();
    self.bind::<Impl, _>(|_| Ok(Some(Arc::new(Impl::default()))));
    if TypeId::of::<I>() != TypeId::of::<Impl>() {
      self.bind::<I, _>(|injector| {
        let instance = injector.get::<Impl>()?;
        Ok(Some(<Impl as Implements<I>>::upcast(instance)))
      });
    }
  }

  /// Drops every binding and cached instance of `T`, then binds `builder` as
  /// its only binding. Handy for swapping in test doubles.
  pub fn replace<T, F>(&self, builder: F)
  where
    T: ?Sized + Any + Send + Sync,
    F: Fn(&Injector) -> BuildResult<T> + Send + Sync + 'static,
  {
    let state = self.state.lock();
    let key = ServiceKey::of::<T>();
    let previous = state
      .types
      .borrow_mut()
      .insert(key, TypeRecord::with_binding(Binding::new(builder)));
    debug!(
      service = key.name(),
      dropped = previous.map_or(0, |record| record.bindings.len()),
      "replaced service bindings"
    );
  }

  /// Replaces every binding of `T` with an already constructed instance.
  pub fn replace_instance<T: ?Sized + Any + Send + Sync>(&self, instance: Arc<T>) {
    self.replace::<T, _>(move |_| Ok(Some(Arc::clone(&instance))));
  }

  /// Like [`bind_impl`](Injector::bind_impl), after clearing every existing
  /// binding of both `I` and `Impl`.
  pub fn replace_impl<I, Impl>(&self)
  where
    I: ?Sized + Any + Send + Sync,
    Impl: Implements<I> + Default + Any + Send + Sync,
  {
    let state = self.state.lock();
    let previous = {
      let mut types = state.types.borrow_mut();
      [
        types.remove(&ServiceKey::of::<Impl>()),
        types.remove(&ServiceKey::of::<I>()),
      ]
    };
    // Released after the borrow ends: instance destructors may call back in.
    drop(previous);
    self.bind_impl::<I, Impl>();
  }

  // --- Resolution ---

  /// Resolves `T`, building it on first use.
  ///
  /// Returns the first binding's instance when it is already cached.
  /// Otherwise tries the bindings in registration order and memoizes the
  /// first one that produces an instance. Returns `None` when `T` is
  /// unregistered, when every binding fails, or when called while `T` is
  /// already being built further up the stack.
  pub fn resolve<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    let state = self.state.lock();
    let key = ServiceKey::of::<T>();

    let bindings = {
      let types = state.types.borrow();
      let record = types.get(&key)?;
      let first = record.bindings.first()?;
      if let Some(instance) = first.cached() {
        trace!(service = key.name(), "resolved cached instance");
        return downcast::<T>(instance);
      }
      record.bindings.clone()
    };

    let Some(_building) = BuildingGuard::enter(&state.types, key) else {
      debug!(service = key.name(), "recursive resolution rejected");
      return None;
    };

    bindings
      .iter()
      .find_map(|binding| self.instance_of(&state, key, binding))
      .and_then(|instance| downcast::<T>(&instance))
  }

  /// Resolves `T`, failing with [`InjectError::DependencyNotFound`] wherever
  /// [`resolve`](Injector::resolve) would return `None`.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<T>, InjectError> {
    self.resolve::<T>().ok_or_else(InjectError::not_found::<T>)
  }

  /// Resolves every binding of `T`, in registration order.
  ///
  /// Bindings whose builder fails or returns nothing are skipped. Returns an
  /// empty vector when `T` is unregistered or already being built.
  pub fn resolve_all<T: ?Sized + Any + Send + Sync>(&self) -> Vec<Arc<T>> {
    let state = self.state.lock();
    let key = ServiceKey::of::<T>();

    let bindings = match state.types.borrow().get(&key) {
      Some(record) => record.bindings.clone(),
      None => return Vec::new(),
    };
    if bindings.is_empty() {
      return Vec::new();
    }

    let Some(_building) = BuildingGuard::enter(&state.types, key) else {
      debug!(service = key.name(), "recursive resolution rejected");
      return Vec::new();
    };

    bindings
      .iter()
      .filter_map(|binding| self.instance_of(&state, key, binding))
      .filter_map(|instance| downcast::<T>(&instance))
      .collect()
  }

  /// Returns the binding's cached instance, building and caching it first
  /// if needed. `None` means this binding failed.
  fn instance_of(&self, state: &State, key: ServiceKey, binding: &Binding) -> Option<Instance> {
    if let Some(instance) = binding.cached() {
      return Some(Arc::clone(instance));
    }
    match binding.build(self) {
      Ok(Some(instance)) => {
        debug!(service = key.name(), "built service instance");
        Some(binding.store(instance))
      }
      Ok(None) => {
        debug!(service = key.name(), "builder produced no instance");
        None
      }
      Err(source) => {
        self.report(state, BuildError::new(key.name(), source));
        None
      }
    }
  }

  fn report(&self, state: &State, error: BuildError) {
    // Cloned out so the handler may itself touch the injector.
    let handler = state.error_handler.borrow().clone();
    match handler {
      Some(handler) => handler(&error),
      None => debug!(service = error.service(), %error, "discarding builder failure"),
    }
  }

  // --- Queries ---

  /// Returns `true` if at least one binding exists for `T`.
  pub fn contains<T: ?Sized + Any>(&self) -> bool {
    self.binding_count::<T>() > 0
  }

  /// Number of bindings registered for `T`.
  pub fn binding_count<T: ?Sized + Any>(&self) -> usize {
    let state = self.state.lock();
    let types = state.types.borrow();
    types
      .get(&ServiceKey::of::<T>())
      .map_or(0, |record| record.bindings.len())
  }

  // --- Error handling ---

  /// Installs the callback invoked, once per failure, whenever a builder
  /// returns an error or panics during resolution.
  pub fn set_error_handler(&self, handler: impl Fn(&BuildError) + Send + Sync + 'static) {
    let state = self.state.lock();
    *state.error_handler.borrow_mut() = Some(Arc::new(handler));
  }

  /// Returns the installed error handler, if any.
  pub fn error_handler(&self) -> Option<ErrorHandler> {
    let state = self.state.lock();
    let handler = state.error_handler.borrow().clone();
    handler
  }

  /// Removes the error handler; builder failures are discarded again.
  pub fn clear_error_handler(&self) {
    let state = self.state.lock();
    state.error_handler.borrow_mut().take();
  }
}

fn downcast<T: ?Sized + Any + Send + Sync>(instance: &Instance) -> Option<Arc<T>> {
  instance.downcast_ref::<Arc<T>>().cloned()
}

impl fmt::Debug for Injector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.state.lock();
    let types = state.types.borrow();
    let mut services: Vec<_> = types
      .iter()
      .map(|(key, record)| (key.name(), record.bindings.len()))
      .collect();
    services.sort_unstable();
    f.debug_struct("Injector").field("services", &services).finish()
  }
}
