// ─── Native Bridge ───
// The fixed set of calls the shell makes into the native engine.

use std::path::Path;

use crate::core::error::ShellResult;
use crate::core::paths::PathSet;

/// Opaque handle to a unit of native work waiting for the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

/// Arguments of the native platform-init call.
#[derive(Debug, Clone, Copy)]
pub struct PlatformParams<'a> {
    pub paths: &'a PathSet,
    pub flavor: &'a str,
    pub build_type: &'a str,
    pub is_tablet: bool,
}

/// Boundary into the native engine.
///
/// Calls are synchronous from the caller's point of view. `set_settings_dir`
/// must come before any other call; ordering of the two init calls is the
/// engine's business, the shell does not guard it.
pub trait NativeBridge: Send + Sync {
    fn set_settings_dir(&self, path: &Path);

    fn init_platform(&self, params: PlatformParams<'_>) -> ShellResult<()>;

    fn init_framework(&self) -> ShellResult<()>;

    fn process_task(&self, handle: TaskHandle);

    fn add_localization(&self, key: &str, value: &str);

    fn on_transit(&self, foreground: bool);

    fn set_statistics_enabled(&self, enabled: bool);
}
