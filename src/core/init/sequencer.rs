// ─── Initialization Sequencer ───
// Brings the native engine up in two phases: platform, then framework.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use super::builtin::{LifecycleRegistration, Localization, StatisticsSetting, StorageCallbacks};
use super::state::InitState;
use super::subsystem::{run_table, InitContext, SubsystemEntry};
use crate::core::downloads::{DownloadManager, Notifier};
use crate::core::error::{ShellError, ShellResult};
use crate::core::lifecycle::BackgroundTracker;
use crate::core::native::{NativeBridge, PlatformParams};
use crate::core::paths::{self, PathResolver};
use crate::core::state::ShellConfig;

/// Owns the init state. All methods take `&mut self`, so there is exactly
/// one writer; move the sequencer into a single task to share it.
pub struct InitializationSequencer {
    state: InitState,
    native_platform_done: bool,
    native_framework_done: bool,
    bridge: Arc<dyn NativeBridge>,
    resolver: Box<dyn PathResolver>,
    config: ShellConfig,
    tracker: BackgroundTracker,

    platform_steps: Vec<SubsystemEntry>,
    framework_head: Vec<SubsystemEntry>,
    framework_steps: Vec<SubsystemEntry>,
    framework_tail: Vec<SubsystemEntry>,
}

impl InitializationSequencer {
    pub fn new(
        config: ShellConfig,
        bridge: Arc<dyn NativeBridge>,
        resolver: Box<dyn PathResolver>,
        downloads: Arc<dyn DownloadManager>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            state: InitState::default(),
            native_platform_done: false,
            native_framework_done: false,
            bridge,
            resolver,
            config,
            tracker: BackgroundTracker::new(),
            platform_steps: vec![SubsystemEntry::new("statistics", StatisticsSetting)],
            framework_head: vec![
                SubsystemEntry::new("storage_callbacks", StorageCallbacks::new(downloads, notifier)),
                SubsystemEntry::new("localization", Localization),
            ],
            framework_steps: Vec::new(),
            framework_tail: vec![SubsystemEntry::new("lifecycle", LifecycleRegistration)],
        }
    }

    /// Append a step run after the native platform call.
    pub fn add_platform_step(&mut self, entry: SubsystemEntry) {
        self.platform_steps.push(entry);
    }

    /// Append a step run after the native framework call and the built-in
    /// framework steps, in registration order.
    pub fn add_framework_step(&mut self, entry: SubsystemEntry) {
        self.framework_steps.push(entry);
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn tracker_mut(&mut self) -> &mut BackgroundTracker {
        &mut self.tracker
    }

    /// Create the settings dir and point the engine at it. Must run before
    /// anything else touches the engine; failure here is fatal.
    pub fn set_settings_dir(&mut self) -> ShellResult<PathBuf> {
        let settings_dir = self.resolver.settings_dir();
        debug!("Settings path = {:?}", settings_dir);
        paths::create_directory(&settings_dir).map_err(|e| match e {
            ShellError::Io { path, source } => ShellError::SettingsDir { path, source },
            other => other,
        })?;
        self.bridge.set_settings_dir(&settings_dir);
        Ok(settings_dir)
    }

    /// Platform, then framework. A platform error returns before the
    /// framework is touched.
    pub fn init(&mut self) -> ShellResult<()> {
        self.init_platform()?;
        self.init_framework()
    }

    /// No-op once it has succeeded. A directory failure returns an
    /// `Io` error without calling the engine and leaves the state untouched.
    /// After a step failure the native call is not repeated; a retry only
    /// runs the steps that have not completed.
    pub fn init_platform(&mut self) -> ShellResult<()> {
        if self.state.platform_initialized() {
            return Ok(());
        }

        if !self.native_platform_done {
            let paths = self.resolver.resolve();
            paths::create_platform_directories(&paths, self.config.emulate_bad_storage)?;

            self.bridge.init_platform(PlatformParams {
                paths: &paths,
                flavor: &self.config.flavor,
                build_type: &self.config.build_type,
                is_tablet: self.config.is_tablet,
            })?;
            self.native_platform_done = true;
        }

        let mut ctx = InitContext {
            bridge: &self.bridge,
            config: &self.config,
            tracker: &mut self.tracker,
        };
        run_table(&mut self.platform_steps, &mut ctx)?;

        self.state = self.state.with_platform();
        info!("Platform initialized");
        Ok(())
    }

    /// No-op once it has succeeded. Does not check platform state. Any
    /// failure is fatal to startup and leaves the framework flag unset; a
    /// retry skips the native call and every step that already ran.
    pub fn init_framework(&mut self) -> ShellResult<()> {
        if self.state.framework_initialized() {
            return Ok(());
        }

        if !self.native_framework_done {
            self.bridge.init_framework()?;
            self.native_framework_done = true;
        }

        let mut ctx = InitContext {
            bridge: &self.bridge,
            config: &self.config,
            tracker: &mut self.tracker,
        };
        run_table(&mut self.framework_head, &mut ctx)?;
        run_table(&mut self.framework_steps, &mut ctx)?;
        run_table(&mut self.framework_tail, &mut ctx)?;

        self.state = self.state.with_framework();
        info!("Framework initialized");
        Ok(())
    }
}
