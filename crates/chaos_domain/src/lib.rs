//! Domain layer for handler fault injection
//!
//! Contains the configuration record that drives injection, the kinds of
//! faults that can be raised, and domain errors. This layer performs no I/O.

pub mod errors;
pub mod injected_error;
pub mod value_objects;

pub use errors::DomainError;
pub use injected_error::InjectedError;
pub use value_objects::*;
