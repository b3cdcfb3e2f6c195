//! Byte count conversions.

/// Decimal gigabyte, 10^9 bytes
pub const GIGABYTE: u64 = 1_000_000_000;
/// Binary gibibyte, 2^30 bytes
pub const GIBIBYTE: u64 = 1_073_741_824;
/// Binary mebibyte, 2^20 bytes
pub const MEBIBYTE: u64 = 1_048_576;

/// Convert bytes to decimal gigabytes (GB).
///
/// With `rounded`, the result is rounded half-to-even to an integer value
/// (e.g. `11.0`), never truncated.
pub fn bytes_to_decimal_gb(bytes: u64, rounded: bool) -> f64 {
    convert(bytes, GIGABYTE, rounded)
}

/// Convert bytes to binary gibibytes (GiB).
///
/// With `rounded`, the result is rounded half-to-even to an integer value.
pub fn bytes_to_binary_gib(bytes: u64, rounded: bool) -> f64 {
    convert(bytes, GIBIBYTE, rounded)
}

/// Convert bytes to binary mebibytes (MiB), unrounded
pub fn bytes_to_mib(bytes: u64) -> f64 {
    bytes as f64 / MEBIBYTE as f64
}

fn convert(bytes: u64, unit: u64, rounded: bool) -> f64 {
    let result = bytes as f64 / unit as f64;
    if rounded {
        result.round_ties_even()
    } else {
        result
    }
}
