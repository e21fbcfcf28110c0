use fibre_inject::{injectable, Container, Token};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service whose logger is injected into a property.
#[derive(Default)]
struct ReportService {
  logger: Option<Arc<Arc<dyn Logger>>>,
}

injectable! {
  ReportService {
    logger: Arc<dyn Logger> => "logger",
  }
}

impl ReportService {
  fn generate_report(&self) {
    if let Some(logger) = &self.logger {
      logger.log("Starting report generation.");
      logger.log("Finished report generation.");
    }
  }
}

fn main() {
  let container = Container::new();

  // Trait objects are registered as `Arc<dyn Trait>` values.
  container
    .register_value("logger", Arc::new(ConsoleLogger) as Arc<dyn Logger>)
    .unwrap();
  container.register_type::<ReportService>().unwrap();

  println!("Resolving the high-level service...");
  let report_service = container
    .resolve::<ReportService>(&Token::of::<ReportService>())
    .unwrap();

  println!("Using the service...");
  report_service.generate_report();
}
