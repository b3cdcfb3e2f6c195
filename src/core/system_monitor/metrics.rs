use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::fs_type::FileSystemType;

/// JSON rendering for records handed to a UI layer.
///
/// Encoding failures are logged and produce an empty string.
pub trait JsonReport: Serialize {
    fn to_json(&self, indent: bool) -> String {
        let encoded = if indent {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        encoded.unwrap_or_else(|e| {
            log::error!("Failed to encode {} as JSON: {}", std::any::type_name::<Self>(), e);
            String::new()
        })
    }
}

impl<T: Serialize + ?Sized> JsonReport for T {}

/// CPU identity, one per socket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuRecord {
    pub id: usize,
    pub name: String,
    pub vendor: String,
    pub count_physical: usize,
    pub count_logical: usize,
}

impl CpuRecord {
    /// Model name with Intel trademark noise removed.
    ///
    /// Non-Intel names are returned unchanged.
    pub fn model_name(&self) -> String {
        if self.vendor != "GenuineIntel" {
            return self.name.clone();
        }
        self.name
            .replace("(R)", "")
            .replace("(TM)", "")
            .replace("CPU @ ", "@")
            .replace("Core ", "")
    }
}

impl fmt::Display for CpuRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "socket #{}, name={}, vendor={}, countPhys={}, countLogical={}",
            self.id, self.name, self.vendor, self.count_physical, self.count_logical
        )
    }
}

/// Global CPU usage at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuLoadSample {
    pub usage_percent: f64,
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for CpuLoadSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cpu {:.1}% at {}",
            self.usage_percent,
            self.timestamp.format("%H:%M:%S")
        )
    }
}

/// Usage of one mounted partition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskRecord {
    pub mount_point: String,
    pub device: String,
    pub fs_type: FileSystemType,
    pub is_virtual_disk: bool,
    pub free: u64,
    pub used: u64,
    pub total: u64,
    /// 0-100, two decimals
    pub used_percent: f64,
}

impl fmt::Display for DiskRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {}{}, {} / {} bytes used ({:.2}%)",
            self.mount_point,
            self.device,
            self.fs_type,
            if self.is_virtual_disk { " virtual" } else { "" },
            self.used,
            self.total,
            self.used_percent
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuVendor {
    #[default]
    None,
    Nvidia,
    Amd,
}

impl GpuVendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            GpuVendor::None => "none",
            GpuVendor::Nvidia => "nvidia",
            GpuVendor::Amd => "amd",
        }
    }
}

impl fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuIdentity {
    pub vendor: GpuVendor,
    pub name: String,
}

impl fmt::Display for GpuIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.vendor)
    }
}

/// One card's readings from a vendor tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuSample {
    pub card_id: u32,
    /// 0.0-1.0
    pub load: f64,
    /// MiB
    pub memory_used: f64,
    /// MiB
    pub memory_total: f64,
    /// Watts
    pub power: f64,
    /// Celsius
    pub temperature: i32,
}

impl fmt::Display for GpuSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gfx card #{}, {}%, {:.0} MiB, {:.0} MiB, {}W, {}°C",
            self.card_id,
            (self.load * 100.0).round() as i64,
            self.memory_used,
            self.memory_total,
            self.power,
            self.temperature
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    pub hostname: String,
    pub os_name: String,
    pub os_version: String,
    pub kernel_version: String,
    pub arch: String,
    pub uptime_secs: u64,
    /// Unix seconds
    pub boot_time: u64,
}

impl fmt::Display for HostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} (kernel {}, {}), up {}s",
            self.hostname,
            self.os_name,
            self.os_version,
            self.kernel_version,
            self.arch,
            self.uptime_secs
        )
    }
}

/// Virtual memory snapshot, all sizes in bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub free: u64,
    pub used_percent: f64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_free: u64,
}

impl fmt::Display for MemoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={} available={} used={} free={} usedPercent={:.2}% swapTotal={} swapUsed={}",
            self.total,
            self.available,
            self.used,
            self.free,
            self.used_percent,
            self.swap_total,
            self.swap_used
        )
    }
}

/// Cumulative counters of one network interface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub interface: String,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errors_in: u64,
    pub errors_out: u64,
}

impl fmt::Display for NetworkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: sent={}B recv={}B packetsSent={} packetsRecv={} errin={} errout={}",
            self.interface,
            self.bytes_sent,
            self.bytes_recv,
            self.packets_sent,
            self.packets_recv,
            self.errors_in,
            self.errors_out
        )
    }
}

/// Everything a dashboard draws in one frame.
///
/// Families that have never produced a value are `None` or empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TelemetrySnapshot {
    pub timestamp: i64,
    pub hostname: Option<String>,
    pub cpu: Vec<CpuRecord>,
    pub cpu_load: Option<CpuLoadSample>,
    pub memory: Option<MemoryRecord>,
    pub disks: Vec<DiskRecord>,
    pub network: Vec<NetworkRecord>,
    pub host: Option<HostRecord>,
    pub gpu: Option<GpuIdentity>,
    pub gpu_samples: Vec<GpuSample>,
}
