//! Error types, categorization, and run statistics.

mod categorization;
mod stats;
mod types;

pub use categorization::categorize_fetch_error;
pub use stats::ProcessingStats;
pub use types::{ErrorType, FetchError, InitializationError};
