//! Virtual disk detection.
//!
//! Tells RAM disks and cloud-sync drives apart from physical storage by
//! delegating to a platform drive API. Platforms without one report every
//! mount as physical.

use crate::error::Result;

/// Drive classification as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveType {
    Unknown,
    NoRootDir,
    Removable,
    Fixed,
    Remote,
    CdRom,
    RamDisk,
}

impl DriveType {
    /// Map a Win32 `GetDriveType` return code
    pub fn from_win32(code: u32) -> Self {
        match code {
            1 => DriveType::NoRootDir,
            2 => DriveType::Removable,
            3 => DriveType::Fixed,
            4 => DriveType::Remote,
            5 => DriveType::CdRom,
            6 => DriveType::RamDisk,
            _ => DriveType::Unknown,
        }
    }
}

/// Per-device I/O counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskIoCounters {
    pub name: String,
    pub read_count: u64,
    pub write_count: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
}

/// Platform capabilities needed to classify a mount
pub trait DriveApi: Send + Sync {
    fn drive_type(&self, mount_point: &str) -> Result<DriveType>;

    fn io_counters(&self, mount_point: &str) -> Result<Vec<DiskIoCounters>>;
}

pub trait VirtualDiskClassifier: Send + Sync {
    /// True for RAM-backed or otherwise non-physical volumes.
    ///
    /// Never fails: anything that cannot be determined counts as physical.
    fn is_virtual_disk(&self, mount_point: &str) -> bool;
}

/// Drive-type decision tree over a [`DriveApi`]
pub struct DriveTypeClassifier<A> {
    api: A,
}

impl<A: DriveApi> DriveTypeClassifier<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

impl<A: DriveApi> VirtualDiskClassifier for DriveTypeClassifier<A> {
    fn is_virtual_disk(&self, mount_point: &str) -> bool {
        let drive_type = match self.api.drive_type(mount_point) {
            Ok(t) => t,
            Err(e) => {
                log::error!("Failed to resolve drive type of {}: {}", mount_point, e);
                return false;
            }
        };

        match drive_type {
            DriveType::RamDisk => {
                log::debug!("{} is a RAM disk", mount_point);
                true
            }
            DriveType::Fixed => {
                // Cloud-sync drives (e.g. Google Drive) register as fixed but
                // have no I/O counters; a failed query looks the same.
                let counters = self.api.io_counters(mount_point).unwrap_or_else(|e| {
                    log::debug!("I/O counters query for {} failed: {}", mount_point, e);
                    Vec::new()
                });
                match counters.first() {
                    None => {
                        log::debug!("{} is fixed but has no I/O counters, treating as virtual", mount_point);
                        true
                    }
                    Some(c) => {
                        log::debug!("I/O counters for {}: {:?}", mount_point, c);
                        false
                    }
                }
            }
            other => {
                log::debug!("{} is {:?}, not a virtual disk", mount_point, other);
                false
            }
        }
    }
}

/// Classifier for platforms without a drive API
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiskClassifier;

impl VirtualDiskClassifier for NullDiskClassifier {
    fn is_virtual_disk(&self, mount_point: &str) -> bool {
        log::debug!(
            "Virtual disk detection not supported on {}, {} treated as physical",
            std::env::consts::OS,
            mount_point
        );
        false
    }
}

/// Get the classifier for the current platform.
///
/// - Windows: drive type plus I/O counters
/// - Linux/macOS: always physical
pub fn get_virtual_disk_classifier() -> Box<dyn VirtualDiskClassifier> {
    #[cfg(target_os = "windows")]
    {
        Box::new(DriveTypeClassifier::new(
            crate::platform::drive_windows::WindowsDriveApi,
        ))
    }

    #[cfg(not(target_os = "windows"))]
    {
        Box::new(NullDiskClassifier)
    }
}
