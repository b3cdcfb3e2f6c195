use hostscope::core::system_monitor::{
    CpuRecord, HostRecord, MemoryRecord, NetworkRecord, PartitionUsage, TelemetryProvider,
};
use hostscope::{Result, TelemetryError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Call counters and knobs shared between a test and its provider
#[derive(Default)]
pub struct FakeState {
    pub cpu_info_calls: AtomicUsize,
    pub cpu_percent_calls: AtomicUsize,
    pub disk_calls: AtomicUsize,
    pub memory_calls: AtomicUsize,
    pub network_calls: AtomicUsize,
    pub host_calls: AtomicUsize,
    pub failing: AtomicBool,
    pub memory_used_percent: Mutex<f64>,
    pub memory_delay: Mutex<Duration>,
    pub cpu_percent: Mutex<f64>,
    pub partitions: Mutex<Vec<PartitionUsage>>,
}

impl FakeState {
    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self, counter: &AtomicUsize) -> Result<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(TelemetryError::provider("source unavailable"));
        }
        Ok(())
    }
}

pub struct FakeProvider {
    pub state: Arc<FakeState>,
}

impl FakeProvider {
    pub fn new() -> (Self, Arc<FakeState>) {
        let state = Arc::new(FakeState::default());
        *state.memory_used_percent.lock() = 42.5;
        *state.cpu_percent.lock() = 12.0;
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl TelemetryProvider for FakeProvider {
    fn cpu_info(&self) -> Result<Vec<CpuRecord>> {
        self.state.check(&self.state.cpu_info_calls)?;
        Ok(vec![CpuRecord {
            id: 0,
            name: "Intel(R) Core(TM) i7-8700K CPU @ 3.70GHz".to_string(),
            vendor: "GenuineIntel".to_string(),
            count_physical: 6,
            count_logical: 12,
        }])
    }

    fn cpu_percent(&self) -> Result<f64> {
        self.state.check(&self.state.cpu_percent_calls)?;
        Ok(*self.state.cpu_percent.lock())
    }

    fn disk_partitions(&self) -> Result<Vec<PartitionUsage>> {
        self.state.check(&self.state.disk_calls)?;
        Ok(self.state.partitions.lock().clone())
    }

    fn virtual_memory(&self) -> Result<MemoryRecord> {
        self.state.check(&self.state.memory_calls)?;
        let delay = *self.state.memory_delay.lock();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        let used_percent = *self.state.memory_used_percent.lock();
        Ok(MemoryRecord {
            total: 16 * 1024 * 1024 * 1024,
            used_percent,
            ..Default::default()
        })
    }

    fn network_counters(&self) -> Result<Vec<NetworkRecord>> {
        self.state.check(&self.state.network_calls)?;
        Ok(vec![NetworkRecord {
            interface: "eth0".to_string(),
            bytes_sent: 100,
            bytes_recv: 200,
            ..Default::default()
        }])
    }

    fn host_info(&self) -> Result<HostRecord> {
        self.state.check(&self.state.host_calls)?;
        Ok(HostRecord {
            hostname: "build-box".to_string(),
            os_name: "TestOS".to_string(),
            arch: "x86_64".to_string(),
            uptime_secs: 3600,
            ..Default::default()
        })
    }
}
