//! Infrastructure layer - Adapters for external systems
//!
//! Implements the configuration store port against in-memory, environment
//! and HTTP parameter sources, adds a TTL cache in front of them, and wires
//! a resolver from loaded configuration.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod telemetry;
pub mod wiring;

pub use adapters::*;
pub use cache::{CacheStats, CachedConfigStore, CachedConfigStoreConfig};
pub use config::{CacheConfig, ChaosConfig, EnvStoreConfig, ExtensionConfig, StoreBackend};
pub use telemetry::{TelemetryConfig, TelemetryError, init_tracing};
pub use wiring::{build_resolver, build_store};
