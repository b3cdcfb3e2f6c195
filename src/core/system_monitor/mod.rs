//! System monitoring core functionality.
//!
//! This module provides the per-family caching of CPU, memory, GPU, disk,
//! network and host metrics, and the decision logic behind GPU sampling and
//! virtual disk detection.

mod cache;
mod collector;
mod fs_type;
mod gpu;
mod gpu_decode;
mod history;
mod metrics;
mod provider;
mod virtual_disk;

pub use cache::{CacheSlot, Clock, Freshness, ManualClock, SystemClock};
pub use collector::{MetricFilter, TelemetryContext, TelemetryContextBuilder};
pub use fs_type::FileSystemType;
pub use gpu::{GpuPipeline, GpuProbe, GpuTool, GpuVendor};
pub use gpu_decode::{decode_nvidia_csv, decode_rocm_csv, GpuReading, NVIDIA_QUERY_FIELDS};
pub use history::{MetricsHistory, DEFAULT_HISTORY_SIZE};
pub use metrics::{
    CpuLoadSample, CpuRecord, DiskRecord, GpuIdentity, GpuSample, HostRecord, JsonReport,
    MemoryRecord, NetworkRecord, TelemetrySnapshot,
};
pub use provider::{PartitionUsage, TelemetryProvider};
pub use virtual_disk::{
    get_virtual_disk_classifier, DiskIoCounters, DriveApi, DriveType, DriveTypeClassifier,
    NullDiskClassifier, VirtualDiskClassifier,
};
