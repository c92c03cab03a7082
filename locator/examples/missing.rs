use fibre_locator::{BuildError, Injector};
use std::sync::Arc;

struct UnregisteredService;

struct Database;

fn main() {
  let injector = Injector::new();

  // --- Using the fallible `get()` method ---
  println!("Attempting to resolve a service that was never registered...");
  match injector.get::<UnregisteredService>() {
    Ok(_) => panic!("Should not have found the service!"),
    Err(error) => println!("Correctly received an error: {}", error),
  }

  // --- Using the non-failing `resolve()` method ---
  assert!(injector.resolve::<UnregisteredService>().is_none());
  assert!(injector.resolve_all::<UnregisteredService>().is_empty());
  println!("`resolve` returned None and `resolve_all` an empty list.");

  // --- Builder failures are silent unless a handler is installed ---
  injector.bind::<Database, _>(|_| Err("database is unreachable".into()));
  injector.bind::<Database, _>(|_| Ok(Some(Arc::new(Database))));

  println!("\nWithout an error handler, the failing builder is skipped quietly:");
  assert!(injector.resolve::<Database>().is_some());

  let other = Injector::new();
  other.set_error_handler(|error: &BuildError| println!("Builder failed: {}", error));
  other.bind::<Database, _>(|_| Err("database is unreachable".into()));

  println!("\nWith an error handler, the failure is reported:");
  assert!(other.resolve::<Database>().is_none());
}
