//! Telemetry source implementations

mod memory;

pub use memory::InMemoryTelemetry;
