//! Training metrics and logging.
//!
//! ## Loggers
//!
//! - [`ConsoleLogger`]: Pretty-printed console output
//! - [`CsvLogger`]: CSV file logging for analysis
//! - [`MultiLogger`]: Combine multiple loggers

pub mod logger;

pub use logger::{ConsoleLogger, CsvLogger, MetricsLogger, MultiLogger, RoundSnapshot};
