use crate::core::system_monitor::{decode_rocm_csv, GpuReading, GpuTool, GpuVendor};
use crate::error::Result;
use crate::platform::process::{CommandRunner, SystemCommandRunner};

pub const ROCM_SMI: &str = "rocm-smi";

/// Arguments for one `rocm-smi` CSV sampling pass
pub const ROCM_QUERY_ARGS: [&str; 7] = [
    "--showproductname",
    "--showuse",
    "--showmeminfo",
    "vram",
    "--showpower",
    "--showtemp",
    "--csv",
];

/// AMD GPU tool backed by `rocm-smi`
pub struct RocmSmi<R = SystemCommandRunner> {
    runner: R,
}

impl RocmSmi {
    pub fn new() -> Self {
        Self::with_runner(SystemCommandRunner)
    }
}

impl Default for RocmSmi {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> RocmSmi<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> GpuTool for RocmSmi<R> {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Amd
    }

    fn detect_presence(&self) -> bool {
        self.runner.succeeds(ROCM_SMI, &[])
    }

    fn query_metrics(&self) -> Result<GpuReading> {
        let output = self.runner.stdout(ROCM_SMI, &ROCM_QUERY_ARGS)?;
        Ok(decode_rocm_csv(&output))
    }
}
