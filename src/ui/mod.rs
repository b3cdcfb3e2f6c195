// UI and formatting module

pub mod formatters;
pub mod telemetry_formatters;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_gib, format_percent, format_size};
pub use telemetry_formatters::{format_snapshot, format_watch_line};
