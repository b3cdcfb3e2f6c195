use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::core::config::Config;
use crate::error::TelemetryError;
use crate::platform::gpu::default_gpu_probe;
use crate::platform::SysinfoProvider;

use super::cache::{CacheSlot, Clock, Freshness, SystemClock};
use super::fs_type::FileSystemType;
use super::gpu::{GpuPipeline, GpuVendor};
use super::history::MetricsHistory;
use super::metrics::*;
use super::provider::{PartitionUsage, TelemetryProvider};
use super::virtual_disk::{get_virtual_disk_classifier, VirtualDiskClassifier};

/// Metric families to collect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFilter {
    pub cpu: bool,
    pub gpu: bool,
    pub memory: bool,
    pub disk: bool,
    pub network: bool,
    pub host: bool,
}

impl MetricFilter {
    /// Returns a filter that selects every family
    pub fn all() -> Self {
        Self {
            cpu: true,
            gpu: true,
            memory: true,
            disk: true,
            network: true,
            host: true,
        }
    }

    pub fn none() -> Self {
        Self {
            cpu: false,
            gpu: false,
            memory: false,
            disk: false,
            network: false,
            host: false,
        }
    }

    /// Nothing selected means everything
    pub fn or_all(self) -> Self {
        if self == Self::none() {
            Self::all()
        } else {
            self
        }
    }
}

/// Owns the cached value of every metric family.
///
/// Each accessor returns the cached value while it is fresh and refetches
/// it otherwise. Fetch failures are logged and answered with the last good
/// value, or `None` when there never was one. Families refresh
/// independently, so a slow GPU query never holds up a memory read.
pub struct TelemetryContext {
    provider: Box<dyn TelemetryProvider>,
    classifier: Box<dyn VirtualDiskClassifier>,
    gpu: Option<GpuPipeline>,
    clock: Box<dyn Clock>,
    cpu_info: CacheSlot<Vec<CpuRecord>>,
    cpu_load: CacheSlot<CpuLoadSample>,
    disks: CacheSlot<Vec<DiskRecord>>,
    memory: CacheSlot<MemoryRecord>,
    network: CacheSlot<Vec<NetworkRecord>>,
    host: CacheSlot<HostRecord>,
    hostname: CacheSlot<String>,
    gpu_samples: CacheSlot<Vec<GpuSample>>,
    history: Mutex<MetricsHistory>,
}

/// Assembles a [`TelemetryContext`] from its collaborators
pub struct TelemetryContextBuilder {
    provider: Box<dyn TelemetryProvider>,
    classifier: Option<Box<dyn VirtualDiskClassifier>>,
    gpu: Option<GpuPipeline>,
    clock: Box<dyn Clock>,
    config: Config,
}

impl TelemetryContextBuilder {
    pub fn new(provider: Box<dyn TelemetryProvider>) -> Self {
        Self {
            provider,
            classifier: None,
            gpu: None,
            clock: Box::new(SystemClock),
            config: Config::default(),
        }
    }

    pub fn classifier(mut self, classifier: Box<dyn VirtualDiskClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn gpu(mut self, pipeline: GpuPipeline) -> Self {
        self.gpu = Some(pipeline);
        self
    }

    pub fn clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> TelemetryContext {
        let intervals = &self.config.intervals;
        TelemetryContext {
            provider: self.provider,
            classifier: self
                .classifier
                .unwrap_or_else(get_virtual_disk_classifier),
            gpu: self.gpu,
            clock: self.clock,
            cpu_info: CacheSlot::new("cpu info", Freshness::Forever),
            cpu_load: CacheSlot::new("cpu load", Freshness::Every(intervals.cpu_load())),
            disks: CacheSlot::new("disks", Freshness::Every(intervals.disk())),
            memory: CacheSlot::new("memory", Freshness::Every(intervals.memory())),
            network: CacheSlot::new("network", Freshness::Every(intervals.network())),
            host: CacheSlot::new("host", Freshness::Every(intervals.host())),
            hostname: CacheSlot::new("hostname", Freshness::Forever),
            gpu_samples: CacheSlot::new("gpu", Freshness::Every(intervals.gpu())),
            history: Mutex::new(MetricsHistory::with_capacity(self.config.history_capacity)),
        }
    }
}

impl TelemetryContext {
    /// Context over the OS with default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Context over the OS: sysinfo, the platform disk classifier and the
    /// vendor GPU tools (unless disabled)
    pub fn with_config(config: Config) -> Self {
        let mut builder = TelemetryContextBuilder::new(Box::new(SysinfoProvider::new()));
        if config.gpu_enabled {
            builder = builder.gpu(GpuPipeline::new(default_gpu_probe()));
        }
        builder.config(config).build()
    }

    pub fn builder(provider: Box<dyn TelemetryProvider>) -> TelemetryContextBuilder {
        TelemetryContextBuilder::new(provider)
    }

    /// CPU identity, fetched once
    pub fn cpu_info(&self) -> Option<Arc<Vec<CpuRecord>>> {
        self.cpu_info
            .get_or_refresh(self.clock.as_ref(), || {
                let cpus = self.provider.cpu_info()?;
                for cpu in &cpus {
                    log::debug!("cpu info: {}, sockets={}", cpu, cpus.len());
                }
                Ok(cpus)
            })
    }

    /// Cleaned-up model name of the first socket
    pub fn cpu_model_name(&self) -> Option<String> {
        self.cpu_info()?.first().map(CpuRecord::model_name)
    }

    pub fn cpu_load(&self) -> Option<Arc<CpuLoadSample>> {
        self.cpu_load.get_or_refresh(self.clock.as_ref(), || {
            let sample = CpuLoadSample {
                usage_percent: self.provider.cpu_percent()?,
                timestamp: Utc::now(),
            };
            self.history.lock().push_cpu(sample.clone());
            Ok(sample)
        })
    }

    /// Recent CPU load samples, oldest first
    pub fn cpu_load_history(&self) -> Vec<CpuLoadSample> {
        self.history.lock().cpu_load.iter().cloned().collect()
    }

    pub fn history(&self) -> MetricsHistory {
        self.history.lock().clone()
    }

    /// One record per mounted partition, replaced wholesale on refresh
    pub fn disks(&self) -> Option<Arc<Vec<DiskRecord>>> {
        self.disks.get_or_refresh(self.clock.as_ref(), || {
            let partitions = self.provider.disk_partitions()?;
            Ok(partitions
                .into_iter()
                .map(|p| disk_record(p, self.classifier.as_ref()))
                .collect())
        })
    }

    /// Virtual memory snapshot.
    ///
    /// When a refresh reports exactly the same used percent as the cached
    /// record, the cached instance is kept so consumers can skip re-rendering.
    pub fn memory(&self) -> Option<Arc<MemoryRecord>> {
        self.memory.get_or_refresh_with(
            self.clock.as_ref(),
            || {
                let memory = self.provider.virtual_memory()?;
                self.history.lock().push_memory(memory.used_percent);
                Ok(memory)
            },
            |previous, fresh| match previous {
                Some(prev) if prev.used_percent.to_bits() == fresh.used_percent.to_bits() => {
                    Arc::clone(prev)
                }
                _ => {
                    log::debug!("virtual memory: {}", fresh);
                    Arc::new(fresh)
                }
            },
        )
    }

    pub fn network(&self) -> Option<Arc<Vec<NetworkRecord>>> {
        self.network.get_or_refresh(self.clock.as_ref(), || {
            let interfaces = self.provider.network_counters()?;
            for (i, iface) in interfaces.iter().enumerate() {
                log::debug!("network interface #{}: {}", i, iface);
            }
            Ok(interfaces)
        })
    }

    pub fn host(&self) -> Option<Arc<HostRecord>> {
        self.host.get_or_refresh(self.clock.as_ref(), || {
            let host = self.provider.host_info()?;
            log::debug!("host info: {}", host);
            if !host.hostname.is_empty() {
                self.hostname.store(self.clock.as_ref(), host.hostname.clone());
            }
            Ok(host)
        })
    }

    /// Hostname, cached for the context lifetime once known
    pub fn hostname(&self) -> Option<Arc<String>> {
        self.hostname.get_or_refresh(self.clock.as_ref(), || {
            self.host()
                .map(|h| h.hostname.clone())
                .filter(|name| !name.is_empty())
                .ok_or_else(|| TelemetryError::provider("hostname unavailable"))
        })
    }

    /// True once a GPU vendor has been detected
    pub fn has_gpu(&self) -> bool {
        self.gpu
            .as_ref()
            .map(|g| g.probe().detect_gpu())
            .unwrap_or(false)
    }

    /// Vendor and display name, if a GPU was detected
    pub fn gpu_identity(&self) -> Option<GpuIdentity> {
        let probe = self.gpu.as_ref()?.probe();
        if probe.vendor() == GpuVendor::None {
            return None;
        }
        Some(probe.identity())
    }

    /// Per-card GPU samples
    pub fn gpu_samples(&self) -> Option<Arc<Vec<GpuSample>>> {
        let pipeline = self.gpu.as_ref()?;
        self.gpu_samples.get_or_refresh(self.clock.as_ref(), || {
            let samples = pipeline.sample_gpu()?;
            self.history.lock().push_gpu(&samples);
            Ok(samples)
        })
    }

    /// Every family at once, each honouring its own freshness
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.snapshot_filtered(&MetricFilter::all())
    }

    /// Only the families selected by `filter` are queried; the rest stay empty
    pub fn snapshot_filtered(&self, filter: &MetricFilter) -> TelemetrySnapshot {
        let mut snapshot = TelemetrySnapshot {
            timestamp: Utc::now().timestamp(),
            hostname: self.hostname().map(|h| h.as_ref().clone()),
            ..Default::default()
        };

        if filter.cpu {
            snapshot.cpu = unwrap_list(self.cpu_info());
            snapshot.cpu_load = self.cpu_load().map(|s| s.as_ref().clone());
        }
        if filter.memory {
            snapshot.memory = self.memory().map(|m| m.as_ref().clone());
        }
        if filter.disk {
            snapshot.disks = unwrap_list(self.disks());
        }
        if filter.network {
            snapshot.network = unwrap_list(self.network());
        }
        if filter.host {
            snapshot.host = self.host().map(|h| h.as_ref().clone());
        }
        if filter.gpu {
            snapshot.gpu_samples = unwrap_list(self.gpu_samples());
            snapshot.gpu = self.gpu_identity();
        }

        snapshot
    }
}

impl Default for TelemetryContext {
    fn default() -> Self {
        Self::new()
    }
}

fn unwrap_list<T: Clone>(list: Option<Arc<Vec<T>>>) -> Vec<T> {
    list.map(|l| l.as_ref().clone()).unwrap_or_default()
}

/// Percentage rounded to two decimals
fn used_percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = used as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

fn disk_record(partition: PartitionUsage, classifier: &dyn VirtualDiskClassifier) -> DiskRecord {
    let fs_type = FileSystemType::normalize(&partition.fs_name);
    if !fs_type.is_recognized() {
        log::debug!(
            "unrecognized filesystem {:?} on {}",
            partition.fs_name,
            partition.mount_point
        );
    }

    let record = DiskRecord {
        is_virtual_disk: classifier.is_virtual_disk(&partition.mount_point),
        used_percent: used_percent(partition.used, partition.total),
        fs_type,
        free: partition.free,
        used: partition.used,
        total: partition.total,
        mount_point: partition.mount_point,
        device: partition.device,
    };
    log::debug!("disk: {}", record);
    record
}
