use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::system_monitor::DEFAULT_HISTORY_SIZE;

/// Refresh interval of each metric family, in milliseconds.
///
/// CPU identity, hostname and GPU vendor are fetched once and have no entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshIntervals {
    pub cpu_load_ms: u64,
    pub disk_ms: u64,
    pub gpu_ms: u64,
    pub host_ms: u64,
    pub memory_ms: u64,
    pub network_ms: u64,
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            cpu_load_ms: 1_000,
            disk_ms: 60_000,
            gpu_ms: 1_000,
            host_ms: 1_000,
            memory_ms: 1_000,
            network_ms: 1_000,
        }
    }
}

impl RefreshIntervals {
    pub fn cpu_load(&self) -> Duration {
        Duration::from_millis(self.cpu_load_ms)
    }

    pub fn disk(&self) -> Duration {
        Duration::from_millis(self.disk_ms)
    }

    pub fn gpu(&self) -> Duration {
        Duration::from_millis(self.gpu_ms)
    }

    pub fn host(&self) -> Duration {
        Duration::from_millis(self.host_ms)
    }

    pub fn memory(&self) -> Duration {
        Duration::from_millis(self.memory_ms)
    }

    pub fn network(&self) -> Duration {
        Duration::from_millis(self.network_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub intervals: RefreshIntervals,
    /// Samples kept per history series
    pub history_capacity: usize,
    /// Probe vendor tools for GPU metrics
    pub gpu_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intervals: RefreshIntervals::default(),
            history_capacity: DEFAULT_HISTORY_SIZE,
            gpu_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from `config_path`; a missing, empty or unreadable file yields defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Config::default());
        }

        Ok(serde_json::from_slice(&data).unwrap_or_else(|e| {
            log::warn!(
                "Ignoring invalid config file {:?}, using defaults: {}",
                config_path,
                e
            );
            Config::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_vec_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("hostscope").join("config.json"))
    }
}
