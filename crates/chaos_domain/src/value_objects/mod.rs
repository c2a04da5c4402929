//! Value objects for the fault-injection domain

mod configuration_record;
mod exception_kind;

pub use configuration_record::{ConfigurationRecord, fields};
pub use exception_kind::ExceptionKind;
