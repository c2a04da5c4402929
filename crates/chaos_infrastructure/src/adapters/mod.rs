//! Configuration store adapters

mod env_parameter_store;
mod in_memory_parameter_store;
mod parameter_extension_store;

pub use env_parameter_store::EnvParameterStore;
pub use in_memory_parameter_store::InMemoryParameterStore;
pub use parameter_extension_store::{PARAMETERS_TOKEN_HEADER, ParameterExtensionStore};
