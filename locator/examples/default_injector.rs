use fibre_locator::{get, resolve, set_default_injector, Injector, LazyHandle};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct NameService {
  name: Mutex<String>,
}

// Resolves its dependency when constructed, unless one is passed in.
struct ConstructedEagerly {
  names: Arc<NameService>,
}

impl ConstructedEagerly {
  fn new(names: Option<Arc<NameService>>) -> Self {
    Self {
      names: names.unwrap_or_else(|| resolve!(NameService)),
    }
  }
}

// Resolves its dependency on first use. Handy when the object outlives, or
// is created before, the registration of its services.
#[derive(Default)]
struct ConstructedLazily {
  names: LazyHandle<NameService>,
}

fn main() {
  let lazy = ConstructedLazily::default();

  // All of the convenience accessors read the default injector, so set one.
  set_default_injector(Some(Arc::new(Injector::new())));
  let injector = fibre_locator::default_injector().expect("just installed");
  injector.replace_impl::<NameService, NameService>();

  *get::<NameService>().expect("bound above").name.lock().unwrap() = "Max".to_string();

  let eager = ConstructedEagerly::new(None);
  // Should print Max
  println!("{}", eager.names.name.lock().unwrap());

  // Should print Max as well
  println!("{}", lazy.names.name.lock().unwrap());
}
