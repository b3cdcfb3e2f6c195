use crate::core::system_monitor::{decode_nvidia_csv, GpuReading, GpuTool, GpuVendor, NVIDIA_QUERY_FIELDS};
use crate::error::Result;
use crate::platform::process::{CommandRunner, SystemCommandRunner};

pub const NVIDIA_SMI: &str = "nvidia-smi";

/// NVIDIA GPU tool backed by `nvidia-smi`
pub struct NvidiaSmi<R = SystemCommandRunner> {
    runner: R,
}

impl NvidiaSmi {
    pub fn new() -> Self {
        Self::with_runner(SystemCommandRunner)
    }
}

impl Default for NvidiaSmi {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> NvidiaSmi<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    fn query_arg() -> String {
        format!("--query-gpu={}", NVIDIA_QUERY_FIELDS.join(","))
    }
}

impl<R: CommandRunner> GpuTool for NvidiaSmi<R> {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Nvidia
    }

    fn detect_presence(&self) -> bool {
        self.runner.succeeds(NVIDIA_SMI, &[])
    }

    fn query_metrics(&self) -> Result<GpuReading> {
        let query = Self::query_arg();
        let output = self
            .runner
            .stdout(NVIDIA_SMI, &[query.as_str(), "--format=csv,noheader,nounits"])?;
        Ok(decode_nvidia_csv(&output))
    }
}
