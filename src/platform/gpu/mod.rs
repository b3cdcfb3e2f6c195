//! GPU-specific platform code.
//!
//! Vendor tools are driven as external processes:
//! NVIDIA via `nvidia-smi`, AMD via `rocm-smi`.

mod amd;
mod nvidia;

pub use amd::{RocmSmi, ROCM_QUERY_ARGS, ROCM_SMI};
pub use nvidia::{NvidiaSmi, NVIDIA_SMI};

use crate::core::system_monitor::{GpuProbe, GpuTool};

/// Vendor tools in order of preference:
/// 1. NVIDIA
/// 2. AMD
pub fn default_gpu_tools() -> Vec<Box<dyn GpuTool>> {
    vec![Box::new(NvidiaSmi::new()), Box::new(RocmSmi::new())]
}

/// Probe over the default vendor tools
pub fn default_gpu_probe() -> GpuProbe {
    GpuProbe::new(default_gpu_tools())
}
