//! Port definitions for application layer
//!
//! Ports are interfaces that define how the injectors interact with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod config_store;
mod handler;
mod reporter;

#[cfg(test)]
pub use config_store::MockConfigStorePort;
pub use config_store::ConfigStorePort;
pub use handler::{Handler, HandlerFn, handler_fn};
pub use reporter::{InjectionReporter, MemoryReporter, StdoutReporter};
