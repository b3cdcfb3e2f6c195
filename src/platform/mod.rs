// Platform-specific code module

#[cfg(windows)]
pub mod drive_windows;
pub mod gpu;
pub mod process;
pub mod sysinfo_provider;

pub use process::{CommandRunner, SystemCommandRunner};
pub use sysinfo_provider::SysinfoProvider;
