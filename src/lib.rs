/// Environment contracts
pub mod env;

/// Error types
pub mod error;

/// Environment implementations
pub mod gym;

mod util;

pub use error::{Result, TaxiError};
