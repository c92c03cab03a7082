//! Tests for the resolution macros:
//! - `resolve!` / `maybe_resolve!` against the default injector
//! - `resolve_from!` / `maybe_resolve_from!` against an explicit injector

use fibre_locator::{
  maybe_resolve, maybe_resolve_from, resolve, resolve_from, set_default_injector, Injector,
};
use serial_test::serial;
use std::sync::Arc;

// --- Test Fixtures ---

struct MacroTestService {
  value: i32,
}
trait MacroTestTrait: Send + Sync {
  fn value(&self) -> i32;
}
impl MacroTestTrait for MacroTestService {
  fn value(&self) -> i32 {
    self.value
  }
}
struct UnregisteredService;

fn injector_with_services(base: i32) -> Injector {
  let injector = Injector::new();
  injector.bind::<MacroTestService, _>(move |_| Ok(Some(Arc::new(MacroTestService { value: base }))));
  injector.bind::<dyn MacroTestTrait, _>(move |_| {
    Ok(Some(Arc::new(MacroTestService { value: base + 1 })))
  });
  injector
}

// --- Default Injector Macro Tests ---

#[test]
#[serial]
fn test_resolve_with_default_injector() {
  set_default_injector(Some(Arc::new(injector_with_services(42))));

  assert_eq!(resolve!(MacroTestService).value, 42);
  assert_eq!(resolve!(trait MacroTestTrait).value(), 43);
}

#[test]
#[serial]
fn test_maybe_resolve_with_default_injector() {
  set_default_injector(Some(Arc::new(injector_with_services(10))));

  assert_eq!(maybe_resolve!(MacroTestService).unwrap().value, 10);
  assert_eq!(maybe_resolve!(trait MacroTestTrait).unwrap().value(), 11);
  assert!(maybe_resolve!(UnregisteredService).is_none());
  trait MissingTrait: Send + Sync {}
  assert!(maybe_resolve!(trait MissingTrait).is_none());

  set_default_injector(None);
  assert!(maybe_resolve!(MacroTestService).is_none());
}

#[test]
#[serial]
#[should_panic(expected = "Failed to resolve required service")]
fn test_resolve_panics_on_missing() {
  set_default_injector(Some(Arc::new(Injector::new())));
  resolve!(UnregisteredService);
}

#[test]
#[serial]
#[should_panic(expected = "no default injector set")]
fn test_resolve_panics_without_default_injector() {
  set_default_injector(None);
  resolve!(MacroTestService);
}

#[test]
#[serial]
#[should_panic(expected = "Failed to resolve required trait service")]
fn test_resolve_trait_panics_on_missing() {
  set_default_injector(Some(Arc::new(Injector::new())));
  trait MissingTrait: Send + Sync {}
  resolve!(trait MissingTrait);
}

// --- `_from` Macro Tests ---

#[test]
fn test_macros_with_explicit_injector() {
  let injector = injector_with_services(100);

  assert_eq!(
    maybe_resolve_from!(&injector, MacroTestService)
      .unwrap()
      .value,
    100
  );
  assert!(maybe_resolve_from!(&injector, UnregisteredService).is_none());
  assert_eq!(
    maybe_resolve_from!(injector, trait MacroTestTrait)
      .unwrap()
      .value(),
    101
  );

  assert_eq!(resolve_from!(&injector, MacroTestService).value, 100);
  assert_eq!(resolve_from!(&injector, trait MacroTestTrait).value(), 101);
}

#[test]
#[should_panic(expected = "Failed to resolve required trait service:")]
fn test_resolve_from_panics_on_missing() {
  let injector = Injector::new();
  trait MissingTrait: Send + Sync {}
  resolve_from!(&injector, trait MissingTrait);
}
