use serde::{Deserialize, Serialize};
use std::fmt;

/// Filesystem families reported for mounted partitions.
///
/// Provider names outside the known list map to [`FileSystemType::Unrecognized`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileSystemType {
    #[serde(rename = "APFS")]
    Apfs,
    #[serde(rename = "exFAT")]
    ExFat,
    #[serde(rename = "FAT")]
    Fat,
    #[serde(rename = "FAT32")]
    Fat32,
    #[serde(rename = "EXT")]
    Ext,
    #[serde(rename = "EXT2")]
    Ext2,
    #[serde(rename = "EXT3")]
    Ext3,
    #[serde(rename = "EXT4")]
    Ext4,
    #[serde(rename = "NTFS")]
    Ntfs,
    #[serde(rename = "JFS")]
    Jfs,
    #[serde(rename = "ZFS")]
    Zfs,
    #[default]
    #[serde(rename = "unrecognized")]
    Unrecognized,
}

impl FileSystemType {
    /// Map a provider-reported filesystem name. Matching is exact and case-sensitive.
    pub fn normalize(name: &str) -> Self {
        match name {
            "APFS" => Self::Apfs,
            "exFAT" => Self::ExFat,
            "FAT" => Self::Fat,
            "FAT32" => Self::Fat32,
            "EXT" => Self::Ext,
            "EXT2" => Self::Ext2,
            "EXT3" => Self::Ext3,
            "EXT4" => Self::Ext4,
            "NTFS" => Self::Ntfs,
            "JFS" => Self::Jfs,
            "ZFS" => Self::Zfs,
            _ => Self::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apfs => "APFS",
            Self::ExFat => "exFAT",
            Self::Fat => "FAT",
            Self::Fat32 => "FAT32",
            Self::Ext => "EXT",
            Self::Ext2 => "EXT2",
            Self::Ext3 => "EXT3",
            Self::Ext4 => "EXT4",
            Self::Ntfs => "NTFS",
            Self::Jfs => "JFS",
            Self::Zfs => "ZFS",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub fn is_recognized(&self) -> bool {
        *self != Self::Unrecognized
    }
}

impl fmt::Display for FileSystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
