//! Decoders for vendor tool output.
//!
//! Both decoders keep a row when individual fields fail to parse: the failed
//! field is logged and defaulted, so a dashboard still gets the rest.

use std::str::FromStr;

use super::metrics::GpuSample;
use crate::core::units::bytes_to_mib;

/// Decoded output of one vendor tool invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpuReading {
    /// Display name of the first card, if the tool reported one
    pub name: Option<String>,
    pub samples: Vec<GpuSample>,
}

/// Columns requested from `nvidia-smi --query-gpu`, in order
pub const NVIDIA_QUERY_FIELDS: [&str; 7] = [
    "index",
    "name",
    "utilization.gpu",
    "memory.used",
    "memory.total",
    "power.draw",
    "temperature.gpu",
];

fn parse_or<T: FromStr>(raw: &str, field: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match raw.trim().parse::<T>() {
        Ok(v) => v,
        Err(e) => {
            log::error!("Failed to parse GPU {} from {:?}: {}", field, raw, e);
            default
        }
    }
}

/// One row of `--format=csv,noheader,nounits` output
struct NvidiaRow<'a> {
    index: &'a str,
    name: &'a str,
    utilization: &'a str,
    memory_used: &'a str,
    memory_total: &'a str,
    power_draw: &'a str,
    temperature: &'a str,
}

impl<'a> NvidiaRow<'a> {
    fn split(line: &'a str) -> Self {
        let fields: Vec<&str> = line.split(", ").collect();
        if fields.len() != NVIDIA_QUERY_FIELDS.len() {
            log::error!(
                "Expected {} GPU fields, got {} in {:?}",
                NVIDIA_QUERY_FIELDS.len(),
                fields.len(),
                line
            );
        }
        let at = |i: usize| fields.get(i).copied().unwrap_or("");
        Self {
            index: at(0),
            name: at(1),
            utilization: at(2),
            memory_used: at(3),
            memory_total: at(4),
            power_draw: at(5),
            temperature: at(6),
        }
    }

    fn to_sample(&self) -> GpuSample {
        let load: i64 = parse_or(self.utilization, "load", 0);
        // Windows output carries a CR on the last column
        let temperature = self.temperature.replace('\r', "");

        GpuSample {
            card_id: parse_or(self.index, "index", 0),
            load: load as f64 / 100.0,
            memory_used: parse_or(self.memory_used, "memory.used", 0.0),
            memory_total: parse_or(self.memory_total, "memory.total", 0.0),
            power: parse_or(self.power_draw, "power.draw", 0.0),
            temperature: parse_or(&temperature, "temperature", 0),
        }
    }
}

/// Decode `nvidia-smi` CSV (no header, no units) into per-card samples
pub fn decode_nvidia_csv(text: &str) -> GpuReading {
    let mut reading = GpuReading::default();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        let row = NvidiaRow::split(line);
        if reading.name.is_none() && !row.name.trim().is_empty() {
            reading.name = Some(row.name.trim().to_string());
        }
        let sample = row.to_sample();
        log::debug!("nvidia-smi: {}", sample);
        reading.samples.push(sample);
    }

    reading
}

/// Split one CSV line, honouring double quotes
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current)),
            '\r' => {}
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Column positions found in the `rocm-smi --csv` header
#[derive(Debug, Default)]
struct RocmColumns {
    device: Option<usize>,
    name: Option<usize>,
    load: Option<usize>,
    memory_used: Option<usize>,
    memory_total: Option<usize>,
    power: Option<usize>,
    temperature: Option<usize>,
}

impl RocmColumns {
    fn from_header(header: &[String]) -> Self {
        let lower: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |pred: &dyn Fn(&str) -> bool| lower.iter().position(|h| pred(h.as_str()));

        Self {
            device: find(&|h| h == "device"),
            name: find(&|h| h == "card series").or_else(|| find(&|h| h == "card model")),
            load: find(&|h| h.starts_with("gpu use")),
            memory_used: find(&|h| h.contains("vram total used memory")),
            memory_total: find(&|h| h.contains("vram total memory")),
            power: find(&|h| h.contains("power") && h.ends_with("(w)")),
            temperature: find(&|h| h.starts_with("temperature") && h.contains("edge"))
                .or_else(|| find(&|h| h.starts_with("temperature"))),
        }
    }
}

/// Decode `rocm-smi --csv` output.
///
/// Columns are located by header name since their order varies between
/// ROCm releases. VRAM byte counts are converted to MiB.
pub fn decode_rocm_csv(text: &str) -> GpuReading {
    let mut reading = GpuReading::default();
    let mut columns: Option<RocmColumns> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);

        if columns.is_none() {
            if fields.first().map(|f| f.trim()) == Some("device") {
                columns = Some(RocmColumns::from_header(&fields));
            }
            continue;
        }
        let Some(cols) = columns.as_ref() else {
            continue;
        };

        let at = |idx: Option<usize>| idx.and_then(|i| fields.get(i)).map(|s| s.as_str()).unwrap_or("");
        let device = at(cols.device).trim();
        if !device.starts_with("card") {
            continue;
        }

        let card_id = parse_or(device.trim_start_matches("card"), "index", reading.samples.len() as u32);
        let load: f64 = parse_or(at(cols.load), "load", 0.0);
        let used: u64 = parse_or(at(cols.memory_used), "memory.used", 0);
        let total: u64 = parse_or(at(cols.memory_total), "memory.total", 0);
        let temperature: f64 = parse_or(at(cols.temperature), "temperature", 0.0);

        let name = at(cols.name).trim();
        if reading.name.is_none() && !name.is_empty() {
            reading.name = Some(name.to_string());
        }

        let sample = GpuSample {
            card_id,
            load: load / 100.0,
            memory_used: bytes_to_mib(used),
            memory_total: bytes_to_mib(total),
            power: parse_or(at(cols.power), "power", 0.0),
            temperature: temperature.round() as i32,
        };
        log::debug!("rocm-smi: {}", sample);
        reading.samples.push(sample);
    }

    if columns.is_none() {
        log::error!("rocm-smi output had no CSV header");
    }

    reading
}
