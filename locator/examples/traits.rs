use fibre_locator::{implements, Injector};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
#[derive(Default)]
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

implements!(dyn Logger => ConsoleLogger);

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  let injector = Injector::new();

  // Binds both `ConsoleLogger` and `dyn Logger`; they share one instance.
  injector.bind_impl::<dyn Logger, ConsoleLogger>();

  // The builder resolves its own dependency from the injector it is given.
  injector.bind::<ReportService, _>(|injector| {
    Ok(Some(Arc::new(ReportService {
      logger: injector.get::<dyn Logger>()?,
    })))
  });

  println!("Resolving the high-level service...");
  let report_service = injector.get::<ReportService>().expect("report service");

  println!("Using the service...");
  report_service.generate_report();
}
