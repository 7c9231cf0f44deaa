//! Application Layer - Translation logic and error taxonomy

pub mod aggregate;
pub mod errors;

pub use aggregate::aggregate;
pub use errors::AdapterError;
