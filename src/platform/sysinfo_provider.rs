//! OS telemetry through `sysinfo`.

use parking_lot::Mutex;
use sysinfo::{Disks, Networks, System};

use crate::core::system_monitor::{
    CpuRecord, HostRecord, MemoryRecord, NetworkRecord, PartitionUsage, TelemetryProvider,
};
use crate::error::{Result, TelemetryError};

struct CpuUsageState {
    system: System,
    primed: bool,
}

/// [`TelemetryProvider`] backed by `sysinfo`.
///
/// CPU usage is computed between two refreshes, so its `System` is kept
/// across calls. Memory has a `System` of its own so a CPU refresh never
/// holds up a memory read.
pub struct SysinfoProvider {
    cpu_usage: Mutex<CpuUsageState>,
    memory: Mutex<System>,
}

impl SysinfoProvider {
    pub fn new() -> Self {
        Self {
            cpu_usage: Mutex::new(CpuUsageState {
                system: System::new(),
                primed: false,
            }),
            memory: Mutex::new(System::new()),
        }
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryProvider for SysinfoProvider {
    fn cpu_info(&self) -> Result<Vec<CpuRecord>> {
        let mut system = System::new();
        system.refresh_cpu_all();

        let cpus = system.cpus();
        let first = cpus
            .first()
            .ok_or_else(|| TelemetryError::provider("no CPUs reported"))?;

        Ok(vec![CpuRecord {
            id: 0,
            name: first.brand().trim().to_string(),
            vendor: first.vendor_id().to_string(),
            count_physical: System::physical_core_count().unwrap_or(0),
            count_logical: cpus.len(),
        }])
    }

    fn cpu_percent(&self) -> Result<f64> {
        let mut state = self.cpu_usage.lock();
        if !state.primed {
            // Usage needs two refreshes at least this far apart
            state.system.refresh_cpu_usage();
            std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
            state.primed = true;
        }
        state.system.refresh_cpu_usage();

        if state.system.cpus().is_empty() {
            return Err(TelemetryError::provider("no CPUs reported"));
        }
        Ok(state.system.global_cpu_usage() as f64)
    }

    fn disk_partitions(&self) -> Result<Vec<PartitionUsage>> {
        let disks = Disks::new_with_refreshed_list();

        Ok(disks
            .list()
            .iter()
            .map(|disk| {
                let total = disk.total_space();
                let free = disk.available_space();
                PartitionUsage {
                    mount_point: disk.mount_point().to_string_lossy().to_string(),
                    device: disk.name().to_string_lossy().to_string(),
                    fs_name: disk.file_system().to_string_lossy().to_string(),
                    total,
                    free,
                    used: total.saturating_sub(free),
                }
            })
            .collect())
    }

    fn virtual_memory(&self) -> Result<MemoryRecord> {
        let mut sys = self.memory.lock();
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(TelemetryError::provider("total memory reported as zero"));
        }
        let used = sys.used_memory();

        Ok(MemoryRecord {
            total,
            available: sys.available_memory(),
            used,
            free: sys.free_memory(),
            used_percent: used as f64 / total as f64 * 100.0,
            swap_total: sys.total_swap(),
            swap_used: sys.used_swap(),
            swap_free: sys.free_swap(),
        })
    }

    fn network_counters(&self) -> Result<Vec<NetworkRecord>> {
        let networks = Networks::new_with_refreshed_list();

        let mut interfaces: Vec<NetworkRecord> = networks
            .iter()
            .map(|(name, data)| NetworkRecord {
                interface: name.to_string(),
                bytes_sent: data.total_transmitted(),
                bytes_recv: data.total_received(),
                packets_sent: data.total_packets_transmitted(),
                packets_recv: data.total_packets_received(),
                errors_in: data.total_errors_on_received(),
                errors_out: data.total_errors_on_transmitted(),
            })
            .collect();
        interfaces.sort_by(|a, b| a.interface.cmp(&b.interface));

        Ok(interfaces)
    }

    fn host_info(&self) -> Result<HostRecord> {
        Ok(HostRecord {
            hostname: System::host_name().unwrap_or_default(),
            os_name: System::name().unwrap_or_default(),
            os_version: System::os_version().unwrap_or_default(),
            kernel_version: System::kernel_version().unwrap_or_default(),
            arch: std::env::consts::ARCH.to_string(),
            uptime_secs: System::uptime(),
            boot_time: System::boot_time(),
        })
    }
}
