//! Recording fakes for the engine-side collaborators, shared by unit tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::core::downloads::{DownloadManager, Notifier, StorageCallback};
use crate::core::error::{ShellError, ShellResult};
use crate::core::native::{NativeBridge, PlatformParams, TaskHandle};
use crate::core::paths::PathResolver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeCall {
    SetSettingsDir(PathBuf),
    InitPlatform {
        writable: PathBuf,
        flavor: String,
        build_type: String,
        is_tablet: bool,
    },
    InitFramework,
    ProcessTask(TaskHandle),
    AddLocalization(String, String),
    OnTransit(bool),
    StatisticsEnabled(bool),
}

#[derive(Default)]
pub struct RecordingBridge {
    calls: Mutex<Vec<NativeCall>>,
    fail_platform: bool,
    fail_framework: bool,
}

impl RecordingBridge {
    pub fn failing_platform() -> Self {
        Self {
            fail_platform: true,
            ..Self::default()
        }
    }

    pub fn failing_framework() -> Self {
        Self {
            fail_framework: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<NativeCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&NativeCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(*c)).count()
    }

    fn record(&self, call: NativeCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl NativeBridge for RecordingBridge {
    fn set_settings_dir(&self, path: &Path) {
        self.record(NativeCall::SetSettingsDir(path.to_path_buf()));
    }

    fn init_platform(&self, params: PlatformParams<'_>) -> ShellResult<()> {
        self.record(NativeCall::InitPlatform {
            writable: params.paths.writable_dir().to_path_buf(),
            flavor: params.flavor.to_string(),
            build_type: params.build_type.to_string(),
            is_tablet: params.is_tablet,
        });
        if self.fail_platform {
            return Err(ShellError::Native("platform init rejected".into()));
        }
        Ok(())
    }

    fn init_framework(&self) -> ShellResult<()> {
        self.record(NativeCall::InitFramework);
        if self.fail_framework {
            return Err(ShellError::Native("framework init rejected".into()));
        }
        Ok(())
    }

    fn process_task(&self, handle: TaskHandle) {
        self.record(NativeCall::ProcessTask(handle));
    }

    fn add_localization(&self, key: &str, value: &str) {
        self.record(NativeCall::AddLocalization(key.into(), value.into()));
    }

    fn on_transit(&self, foreground: bool) {
        self.record(NativeCall::OnTransit(foreground));
    }

    fn set_statistics_enabled(&self, enabled: bool) {
        self.record(NativeCall::StatisticsEnabled(enabled));
    }
}

pub struct FakeDownloads {
    autoretry_failed: bool,
    subscribers: Mutex<Vec<Arc<dyn StorageCallback>>>,
}

impl FakeDownloads {
    pub fn new(autoretry_failed: bool) -> Self {
        Self {
            autoretry_failed,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribers(&self) -> Vec<Arc<dyn StorageCallback>> {
        self.subscribers.lock().unwrap().clone()
    }
}

impl DownloadManager for FakeDownloads {
    fn subscribe(&self, callback: Arc<dyn StorageCallback>) {
        self.subscribers.lock().unwrap().push(callback);
    }

    fn is_autoretry_failed(&self) -> bool {
        self.autoretry_failed
    }

    fn display_name(&self, item_id: &str) -> String {
        format!("Name of {item_id}")
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_download_failed(&self, item_id: &str, display_name: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((item_id.to_string(), display_name.to_string()));
    }
}

/// Resolves every path under one root directory.
pub struct RootedResolver {
    pub root: PathBuf,
}

impl PathResolver for RootedResolver {
    fn settings_dir(&self) -> PathBuf {
        self.root.join("settings")
    }

    fn apk_path(&self) -> PathBuf {
        self.root.join("base.apk")
    }

    fn writable_dir(&self) -> PathBuf {
        self.root.join("storage")
    }

    fn private_dir(&self) -> PathBuf {
        self.root.join("private")
    }

    fn temp_dir(&self) -> PathBuf {
        self.root.join("tmp")
    }
}
