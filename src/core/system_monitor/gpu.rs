//! GPU vendor detection and sampling.

use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};

use super::gpu_decode::GpuReading;
use super::metrics::{GpuIdentity, GpuSample};
use crate::error::{Result, TelemetryError};

// Re-export GpuVendor for convenience
pub use super::metrics::GpuVendor;

/// Trait for GPU vendor tools
///
/// One implementation per vendor; implementations live in the platform layer.
pub trait GpuTool: Send + Sync {
    /// Vendor this tool reports on
    fn vendor(&self) -> GpuVendor;

    /// True if the vendor tool runs successfully on this host
    fn detect_presence(&self) -> bool;

    /// Query and decode per-card metrics
    fn query_metrics(&self) -> Result<GpuReading>;
}

/// Detects the GPU vendor by trying each tool in order.
///
/// A detected vendor is remembered for the probe's lifetime; a failed
/// detection is not, so a later call probes again.
pub struct GpuProbe {
    tools: Vec<Box<dyn GpuTool>>,
    vendor: RwLock<GpuVendor>,
    name: OnceCell<String>,
    probe_lock: Mutex<()>,
}

impl GpuProbe {
    /// Tools are tried in the given order
    pub fn new(tools: Vec<Box<dyn GpuTool>>) -> Self {
        Self {
            tools,
            vendor: RwLock::new(GpuVendor::None),
            name: OnceCell::new(),
            probe_lock: Mutex::new(()),
        }
    }

    pub fn detect_gpu(&self) -> bool {
        if self.vendor() != GpuVendor::None {
            return true;
        }

        // Tools run outside the vendor lock; readers keep seeing the last value
        let _probing = self.probe_lock.lock();
        if self.vendor() != GpuVendor::None {
            return true;
        }

        for tool in &self.tools {
            if tool.detect_presence() {
                log::debug!("Detected {} GPU", tool.vendor());
                *self.vendor.write() = tool.vendor();
                return true;
            }
        }

        log::error!("Could not find NVIDIA or AMD GPUs using the vendor SMI tools");
        false
    }

    pub fn vendor(&self) -> GpuVendor {
        *self.vendor.read()
    }

    /// Display name of the first card seen, empty until the first sample
    pub fn name(&self) -> &str {
        self.name.get().map(String::as_str).unwrap_or("")
    }

    pub fn identity(&self) -> GpuIdentity {
        GpuIdentity {
            vendor: self.vendor(),
            name: self.name().to_string(),
        }
    }

    fn remember_name(&self, name: Option<String>) {
        if let Some(name) = name {
            let _ = self.name.set(name);
        }
    }

    fn tool_for(&self, vendor: GpuVendor) -> Option<&dyn GpuTool> {
        self.tools
            .iter()
            .find(|t| t.vendor() == vendor)
            .map(|t| t.as_ref())
    }
}

/// Samples all cards of the detected vendor
pub struct GpuPipeline {
    probe: GpuProbe,
}

impl GpuPipeline {
    pub fn new(probe: GpuProbe) -> Self {
        Self { probe }
    }

    pub fn probe(&self) -> &GpuProbe {
        &self.probe
    }

    /// One sampling pass.
    ///
    /// Errors when no GPU is detected or the vendor tool fails; callers keep
    /// serving their previous samples in that case.
    pub fn sample_gpu(&self) -> Result<Vec<GpuSample>> {
        if !self.probe.detect_gpu() {
            return Err(TelemetryError::gpu_not_available("no supported GPU detected"));
        }

        let vendor = self.probe.vendor();
        let tool = self.probe.tool_for(vendor).ok_or_else(|| {
            TelemetryError::gpu_not_available(format!("no tool registered for {}", vendor))
        })?;

        let reading = tool.query_metrics().map_err(|e| {
            log::error!("Failed to retrieve {} GPU data: {}", vendor, e);
            e
        })?;

        self.probe.remember_name(reading.name);
        Ok(reading.samples)
    }
}
