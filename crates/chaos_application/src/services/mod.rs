//! Application services
//!
//! - `ConfigResolver`: answers per-key lookups against the active record
//! - `ActivationGate`: per-invocation stochastic activation decision
//! - `DelayInjector` / `ExceptionInjector`: handler wrappers, built directly
//!   or through their tower layers

mod activation_gate;
mod config_resolver;
mod delay_injector;
mod exception_injector;

pub use activation_gate::ActivationGate;
pub use config_resolver::{ConfigResolver, Lookup};
pub use delay_injector::{DelayInjector, DelayLayer};
pub use exception_injector::{ExceptionInjector, ExceptionLayer};
