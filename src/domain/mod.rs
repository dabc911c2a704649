// Domain layer - Telemetry, projection, and catalog models
pub mod catalog;
pub mod projection;
pub mod telemetry;
