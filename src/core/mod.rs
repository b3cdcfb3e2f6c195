// Core business logic module

pub mod config;
pub mod system_monitor;
pub mod units;

// Re-export commonly used items
pub use config::{Config, RefreshIntervals};
pub use system_monitor::{MetricFilter, TelemetryContext, TelemetrySnapshot};
pub use units::{bytes_to_binary_gib, bytes_to_decimal_gb};
