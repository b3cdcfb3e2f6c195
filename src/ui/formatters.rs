use colored::*;

use crate::core::units::bytes_to_binary_gib;

/// Format a byte count in human-readable form (B, KB, MB, GB)
pub fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{}B", size)
    } else if size < 1024 * 1024 {
        format!("{:.1}KB", size as f64 / 1024.0)
    } else if size < 1024 * 1024 * 1024 {
        format!("{:.1}MB", size as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1}GB", size as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Whole GiB, e.g. "16 GiB"
pub fn format_gib(bytes: u64) -> String {
    format!("{:.0} GiB", bytes_to_binary_gib(bytes, true))
}

/// Percentage colored by severity
pub fn format_percent(percent: f64) -> ColoredString {
    let text = format!("{:.1}%", percent);
    if percent >= 90.0 {
        text.red().bold()
    } else if percent >= 70.0 {
        text.yellow()
    } else {
        text.green()
    }
}
