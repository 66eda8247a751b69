//! Infrastructure error handling

mod conversions;

pub use conversions::{status_to_error, InfraError};
