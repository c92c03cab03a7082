use fibre_locator::{bind_static, bind_static_fn, implements, Injector};
use std::sync::Arc;

// --- Test Fixtures ---

trait SampleInterface: Send + Sync {
  fn hello(&self) -> &'static str;
}

#[derive(Default)]
struct SampleImpl;
impl SampleInterface for SampleImpl {
  fn hello(&self) -> &'static str {
    "Hello"
  }
}

implements!(dyn SampleInterface => SampleImpl);

trait SampleInterface2: Send + Sync {
  fn hello(&self) -> &'static str;
}

struct SampleImpl2;
impl SampleInterface2 for SampleImpl2 {
  fn hello(&self) -> &'static str {
    "Hello again"
  }
}

struct StartupBanner {
  text: &'static str,
}

bind_static!(dyn SampleInterface => SampleImpl);
bind_static_fn!(StartupBanner, || Ok(Some(Arc::new(StartupBanner { text: "ready" }))));
bind_static_fn!(dyn SampleInterface2, |_| Ok(Some(Arc::new(SampleImpl2))));
bind_static_fn!(dyn SampleInterface2, |injector: &Injector| {
  // Builders registered this way can still use the injector.
  assert!(injector.contains::<dyn SampleInterface>());
  Ok(Some(Arc::new(SampleImpl2)))
});

fn same_instance<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
  Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}

#[test]
fn test_static_mappings_are_bound_on_demand() {
  let injector = Injector::new();
  assert!(injector.resolve::<dyn SampleInterface>().is_none());
  assert!(injector.resolve_all::<dyn SampleInterface2>().is_empty());

  injector.bind_static_mappings();

  let by_interface = injector.get::<dyn SampleInterface>().unwrap();
  let by_impl = injector.get::<SampleImpl>().unwrap();
  assert_eq!(by_interface.hello(), "Hello");
  assert!(same_instance(&by_interface, &by_impl));

  let all = injector.resolve_all::<dyn SampleInterface2>();
  assert_eq!(all.len(), 2);
  assert!(all.iter().all(|service| service.hello() == "Hello again"));

  // Registered with a builder that takes no arguments.
  assert_eq!(injector.get::<StartupBanner>().unwrap().text, "ready");
}

#[test]
fn test_static_mappings_do_not_leak_between_injectors() {
  let bound = Injector::new();
  let untouched = Injector::new();

  bound.bind_static_mappings();

  assert!(bound.contains::<dyn SampleInterface>());
  assert!(!untouched.contains::<dyn SampleInterface>());
}
