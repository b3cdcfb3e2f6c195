//! Win32 drive queries backing the virtual disk classifier.

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::ptr;

use windows_sys::Win32::Foundation::{CloseHandle, INVALID_HANDLE_VALUE};
use windows_sys::Win32::Storage::FileSystem::{
    CreateFileW, GetDriveTypeW, FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING,
};
use windows_sys::Win32::System::Ioctl::{DISK_PERFORMANCE, IOCTL_DISK_PERFORMANCE};
use windows_sys::Win32::System::IO::DeviceIoControl;

use crate::core::system_monitor::{DiskIoCounters, DriveApi, DriveType};
use crate::error::{Result, TelemetryError};

/// [`DriveApi`] over `GetDriveTypeW` and `IOCTL_DISK_PERFORMANCE`
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsDriveApi;

/// NUL-terminated UTF-16 copy of `s`
fn to_wide(s: &str) -> Result<Vec<u16>> {
    if s.contains('\0') {
        return Err(TelemetryError::invalid_path(format!(
            "path contains an interior NUL: {:?}",
            s
        )));
    }
    Ok(OsStr::new(s).encode_wide().chain(std::iter::once(0)).collect())
}

/// "C:\" or "C:" -> "\\.\C:"
fn volume_device_path(mount_point: &str) -> Result<String> {
    let letter = mount_point.trim_end_matches('\\');
    if letter.len() != 2 || !letter.ends_with(':') {
        return Err(TelemetryError::invalid_path(format!(
            "not a drive letter mount: {}",
            mount_point
        )));
    }
    Ok(format!("\\\\.\\{}", letter))
}

impl DriveApi for WindowsDriveApi {
    fn drive_type(&self, mount_point: &str) -> Result<DriveType> {
        let wide = to_wide(mount_point)?;
        // SAFETY: `wide` is NUL-terminated and outlives the call
        let code = unsafe { GetDriveTypeW(wide.as_ptr()) };
        Ok(DriveType::from_win32(code))
    }

    fn io_counters(&self, mount_point: &str) -> Result<Vec<DiskIoCounters>> {
        let device = volume_device_path(mount_point)?;
        let wide = to_wide(&device)?;

        // SAFETY: arguments are valid for the duration of the calls and the
        // handle is closed before returning
        unsafe {
            let handle = CreateFileW(
                wide.as_ptr(),
                0,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                ptr::null(),
                OPEN_EXISTING,
                0,
                ptr::null_mut(),
            );
            if handle == INVALID_HANDLE_VALUE {
                return Err(TelemetryError::Io(std::io::Error::last_os_error()));
            }

            let mut perf: DISK_PERFORMANCE = std::mem::zeroed();
            let mut returned: u32 = 0;
            let ok = DeviceIoControl(
                handle,
                IOCTL_DISK_PERFORMANCE,
                ptr::null(),
                0,
                &mut perf as *mut DISK_PERFORMANCE as *mut _,
                std::mem::size_of::<DISK_PERFORMANCE>() as u32,
                &mut returned,
                ptr::null_mut(),
            );
            let err = std::io::Error::last_os_error();
            CloseHandle(handle);

            if ok == 0 {
                log::debug!("IOCTL_DISK_PERFORMANCE on {} failed: {}", device, err);
                return Ok(Vec::new());
            }

            Ok(vec![DiskIoCounters {
                name: mount_point.trim_end_matches('\\').to_string(),
                read_count: perf.ReadCount as u64,
                write_count: perf.WriteCount as u64,
                read_bytes: perf.BytesRead.max(0) as u64,
                write_bytes: perf.BytesWritten.max(0) as u64,
            }])
        }
    }
}
