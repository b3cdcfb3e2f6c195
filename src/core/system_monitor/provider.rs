use super::metrics::{CpuRecord, HostRecord, MemoryRecord, NetworkRecord};
use crate::error::Result;

/// Usage of a mounted partition as reported by the OS
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionUsage {
    pub mount_point: String,
    pub device: String,
    /// Provider spelling, e.g. "NTFS" or "ext4"
    pub fs_name: String,
    pub total: u64,
    pub free: u64,
    pub used: u64,
}

/// Source of OS-level facts.
///
/// Every call may block on a system call. Implementations are provided in
/// the platform layer; tests substitute fakes.
pub trait TelemetryProvider: Send + Sync {
    /// One record per CPU socket
    fn cpu_info(&self) -> Result<Vec<CpuRecord>>;

    /// Global CPU usage, 0-100
    fn cpu_percent(&self) -> Result<f64>;

    fn disk_partitions(&self) -> Result<Vec<PartitionUsage>>;

    fn virtual_memory(&self) -> Result<MemoryRecord>;

    fn network_counters(&self) -> Result<Vec<NetworkRecord>>;

    fn host_info(&self) -> Result<HostRecord>;
}
