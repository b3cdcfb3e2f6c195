use super::fake_provider::FakeProvider;
use hostscope::core::system_monitor::{
    DiskIoCounters, DriveApi, DriveType, DriveTypeClassifier, FileSystemType, JsonReport,
    PartitionUsage,
};
use hostscope::core::TelemetryContext;
use hostscope::Result;
use std::collections::HashMap;

/// Drive layout of a typical workstation with a RAM disk and a cloud drive
struct WorkstationDrives {
    types: HashMap<&'static str, DriveType>,
    counters: HashMap<&'static str, usize>,
}

impl WorkstationDrives {
    fn new() -> Self {
        let types = HashMap::from([
            ("C:\\", DriveType::Fixed),
            ("G:\\", DriveType::Fixed),
            ("R:\\", DriveType::RamDisk),
            ("E:\\", DriveType::Removable),
        ]);
        let counters = HashMap::from([("C:\\", 1), ("E:\\", 1)]);
        Self { types, counters }
    }
}

impl DriveApi for WorkstationDrives {
    fn drive_type(&self, mount_point: &str) -> Result<DriveType> {
        Ok(self
            .types
            .get(mount_point)
            .copied()
            .unwrap_or(DriveType::NoRootDir))
    }

    fn io_counters(&self, mount_point: &str) -> Result<Vec<DiskIoCounters>> {
        let count = self.counters.get(mount_point).copied().unwrap_or(0);
        Ok((0..count)
            .map(|_| DiskIoCounters {
                name: mount_point.to_string(),
                read_count: 10,
                ..Default::default()
            })
            .collect())
    }
}

fn partition(mount_point: &str, fs_name: &str) -> PartitionUsage {
    PartitionUsage {
        mount_point: mount_point.to_string(),
        device: mount_point.to_string(),
        fs_name: fs_name.to_string(),
        total: 3_000,
        free: 2_000,
        used: 1_000,
    }
}

fn workstation_context() -> TelemetryContext {
    let (provider, state) = FakeProvider::new();
    *state.partitions.lock() = vec![
        partition("C:\\", "NTFS"),
        partition("G:\\", "FAT32"),
        partition("R:\\", "NTFS"),
        partition("E:\\", "exfat"),
    ];
    TelemetryContext::builder(Box::new(provider))
        .classifier(Box::new(DriveTypeClassifier::new(WorkstationDrives::new())))
        .build()
}

#[test]
fn test_disk_records_are_classified() {
    let context = workstation_context();
    let disks = context.disks().unwrap();

    let virtual_mounts: Vec<&str> = disks
        .iter()
        .filter(|d| d.is_virtual_disk)
        .map(|d| d.mount_point.as_str())
        .collect();

    assert_eq!(virtual_mounts, vec!["G:\\", "R:\\"]);
}

#[test]
fn test_disk_records_normalize_fs_type() {
    let context = workstation_context();
    let disks = context.disks().unwrap();

    assert_eq!(disks[0].fs_type, FileSystemType::Ntfs);
    assert_eq!(disks[1].fs_type, FileSystemType::Fat32);
    // Matching is case-sensitive
    assert_eq!(disks[3].fs_type, FileSystemType::Unrecognized);
}

#[test]
fn test_disk_used_percent_rounded() {
    let context = workstation_context();
    let disks = context.disks().unwrap();

    assert_eq!(disks[0].used_percent, 33.33);
}

#[test]
fn test_disk_record_json_fields() {
    let context = workstation_context();
    let disks = context.disks().unwrap();

    let json: serde_json::Value = serde_json::from_str(&disks[1].to_json(false)).unwrap();
    assert_eq!(json["mount_point"], "G:\\");
    assert_eq!(json["is_virtual_disk"], true);
    assert_eq!(json["fs_type"], "FAT32");
}
