use std::collections::{BTreeMap, VecDeque};

use super::metrics::{CpuLoadSample, GpuSample};

pub const DEFAULT_HISTORY_SIZE: usize = 60;

/// Bounded history of recent samples (for sparklines)
#[derive(Debug, Clone)]
pub struct MetricsHistory {
    capacity: usize,
    pub cpu_load: VecDeque<CpuLoadSample>,
    pub memory_used_percent: VecDeque<f64>,
    /// Load fraction per card id
    pub gpu_load: BTreeMap<u32, VecDeque<f64>>,
}

impl MetricsHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            cpu_load: VecDeque::with_capacity(capacity),
            memory_used_percent: VecDeque::with_capacity(capacity),
            gpu_load: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push_cpu(&mut self, sample: CpuLoadSample) {
        let capacity = self.capacity;
        Self::push_value(&mut self.cpu_load, sample, capacity);
    }

    pub fn push_memory(&mut self, used_percent: f64) {
        let capacity = self.capacity;
        Self::push_value(&mut self.memory_used_percent, used_percent, capacity);
    }

    pub fn push_gpu(&mut self, samples: &[GpuSample]) {
        let capacity = self.capacity;
        for sample in samples {
            let queue = self
                .gpu_load
                .entry(sample.card_id)
                .or_insert_with(|| VecDeque::with_capacity(capacity));
            Self::push_value(queue, sample.load, capacity);
        }
    }

    fn push_value<T>(queue: &mut VecDeque<T>, value: T, capacity: usize) {
        if queue.len() >= capacity {
            queue.pop_front();
        }
        queue.push_back(value);
    }

    /// Most recent CPU load sample
    pub fn latest_cpu(&self) -> Option<&CpuLoadSample> {
        self.cpu_load.back()
    }
}

impl Default for MetricsHistory {
    fn default() -> Self {
        Self::new()
    }
}
