//! Application layer - Fault injection around request handlers
//!
//! Defines the ports the injectors depend on (configuration store, handler,
//! reporter) and the services that resolve configuration, decide activation
//! and wrap handlers with delay or exception injection.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
