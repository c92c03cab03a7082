//! # Fibre Locator
//!
//! A tiny, thread-safe service locator for Rust.
//!
//! An [`Injector`] maps a service type to an ordered list of builders.
//! Services are built lazily the first time they are resolved and memoized
//! per binding afterwards, so every caller shares the same `Arc`.
//!
//! ## Core Concepts
//!
//! - **Bindings**: [`Injector::bind`] appends a builder for a type;
//!   [`Injector::replace`] throws away every previous binding (and cached
//!   instance) of that type first.
//! - **Resolution**: [`Injector::resolve`] returns the first binding that
//!   builds successfully, [`Injector::get`] turns a miss into an
//!   [`InjectError`], and [`Injector::resolve_all`] returns every binding.
//! - **Interfaces**: [`Injector::bind_impl`] binds a concrete type and a trait
//!   object it [`Implements`], sharing one instance between both.
//! - **Recursion guard**: a builder that ends up resolving its own type gets
//!   `None` instead of recursing forever.
//! - **Failures**: builder errors and panics are skipped over. They are only
//!   visible through an error handler installed with
//!   [`Injector::set_error_handler`].
//! - **Default injector**: an optional process-wide injector used by
//!   [`get`], [`resolve!`], and [`LazyHandle`].
//!
//! ## Quick Start
//!
//! ```
//! use fibre_locator::{implements, Injector};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!   fn greet(&self) -> String;
//! }
//!
//! #[derive(Default)]
//! struct EnglishGreeter;
//!
//! impl Greeter for EnglishGreeter {
//!   fn greet(&self) -> String {
//!     "Hello, World!".to_string()
//!   }
//! }
//!
//! implements!(dyn Greeter => EnglishGreeter);
//!
//! struct Banner {
//!   greeter: Arc<dyn Greeter>,
//! }
//!
//! let injector = Injector::new();
//! injector.bind_impl::<dyn Greeter, EnglishGreeter>();
//!
//! // Builders receive the injector and can resolve their own dependencies.
//! injector.bind::<Banner, _>(|injector| {
//!   Ok(Some(Arc::new(Banner {
//!     greeter: injector.get::<dyn Greeter>()?,
//!   })))
//! });
//!
//! let banner = injector.get::<Banner>().unwrap();
//! assert_eq!(banner.greeter.greet(), "Hello, World!");
//! ```

mod core;
mod error;
mod global;
mod implements;
mod injector;
mod lazy;
mod macros;
#[cfg(feature = "static-bindings")]
mod registration;

pub use error::{BoxError, BuildError, BuilderPanicked, InjectError};
pub use global::{default_injector, get, get_all, set_default_injector, try_get, try_get_all};
pub use implements::Implements;
pub use injector::{BuildResult, ErrorHandler, Injector};
pub use lazy::LazyHandle;
#[cfg(feature = "static-bindings")]
pub use registration::StaticBinding;

#[doc(hidden)]
pub mod __private {
  #[cfg(feature = "static-bindings")]
  pub use inventory;
}
