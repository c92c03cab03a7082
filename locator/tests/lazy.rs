use fibre_locator::{implements, set_default_injector, InjectError, Injector, LazyHandle};
use serial_test::serial;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

trait NameService: Send + Sync {
  fn name(&self) -> String;
}

#[derive(Default)]
struct StaticName;
impl NameService for StaticName {
  fn name(&self) -> String {
    "Max".to_string()
  }
}

implements!(dyn NameService => StaticName);

// Resolved lazily, so it can be created before anything is registered.
struct Profile {
  names: LazyHandle<dyn NameService>,
}

fn install_with_name_service() -> Arc<Injector> {
  let injector = Arc::new(Injector::new());
  injector.bind_impl::<dyn NameService, StaticName>();
  set_default_injector(Some(Arc::clone(&injector)));
  injector
}

#[test]
#[serial]
fn test_deref_resolves_from_default_injector() {
  let profile = Profile {
    names: LazyHandle::new(),
  };
  assert!(!profile.names.is_resolved());

  install_with_name_service();

  assert_eq!(profile.names.name(), "Max");
  assert_eq!((*profile.names).name(), "Max");
  assert!(profile.names.is_resolved());
}

#[test]
#[serial]
fn test_get_returns_the_same_instance() {
  let injector = install_with_name_service();
  let handle = LazyHandle::<dyn NameService>::new();

  let first = handle.get().unwrap();
  let second = handle.get().unwrap();

  assert!(Arc::ptr_eq(&first, &second));
  assert!(Arc::ptr_eq(&first, &injector.get::<dyn NameService>().unwrap()));
}

#[test]
#[serial]
fn test_handle_keeps_instance_after_default_changes() {
  install_with_name_service();
  let handle = LazyHandle::<dyn NameService>::new();
  let first = handle.get().unwrap();

  set_default_injector(None);

  assert!(Arc::ptr_eq(&first, &handle.get().unwrap()));
}

#[test]
#[serial]
fn test_failures_are_not_memoized() {
  set_default_injector(None);
  let handle = LazyHandle::<dyn NameService>::new();

  assert_eq!(handle.get().err(), Some(InjectError::NoDefaultInjector));
  assert!(handle.try_get().is_none());
  assert!(!handle.is_resolved());

  install_with_name_service();
  assert_eq!(handle.try_get().unwrap().name(), "Max");
}

#[test]
#[serial]
#[should_panic(expected = "no default injector set")]
fn test_deref_panics_when_unresolvable() {
  set_default_injector(None);
  let handle = LazyHandle::<dyn NameService>::new();
  let _ = handle.name();
}

#[test]
fn test_reset_resolves_again() {
  static BUILDS: AtomicUsize = AtomicUsize::new(0);

  struct Counter {
    generation: usize,
  }

  let injector = Arc::new(Injector::new());
  injector.bind::<Counter, _>(|_| {
    Ok(Some(Arc::new(Counter {
      generation: BUILDS.fetch_add(1, Ordering::SeqCst),
    })))
  });
  let mut handle = LazyHandle::<Counter>::with_injector(Arc::clone(&injector));
  assert_eq!(handle.generation, 0);

  // The injector memoizes too, so a reset handle sees the same instance...
  handle.reset();
  assert!(!handle.is_resolved());
  assert_eq!(handle.generation, 0);

  // ...until the binding itself is replaced.
  injector.replace::<Counter, _>(|_| {
    Ok(Some(Arc::new(Counter {
      generation: BUILDS.fetch_add(1, Ordering::SeqCst),
    })))
  });
  assert_eq!(handle.generation, 0);
  handle.reset();
  assert_eq!(handle.generation, 1);
}

#[test]
fn test_handle_bound_to_explicit_injector() {
  let injector = Arc::new(Injector::new());
  let handle = LazyHandle::<String>::with_injector(Arc::clone(&injector));

  assert!(matches!(
    handle.get(),
    Err(InjectError::DependencyNotFound { .. })
  ));

  injector.bind_instance(Arc::new("configured".to_string()));
  assert_eq!(*handle.get().unwrap(), "configured");
}
