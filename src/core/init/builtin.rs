// Init steps the shell always runs, around whatever the host registers.

use std::sync::Arc;

use tracing::debug;

use super::subsystem::{InitContext, Subsystem};
use crate::core::downloads::{DownloadManager, DownloadStatusRelay, Notifier};
use crate::core::error::ShellResult;
use crate::core::lifecycle::LifecycleObserver;

/// Platform phase: tell the engine whether statistics are allowed.
pub struct StatisticsSetting;

impl Subsystem for StatisticsSetting {
    fn initialize(&mut self, ctx: &mut InitContext<'_>) -> ShellResult<()> {
        ctx.bridge.set_statistics_enabled(ctx.config.statistics_enabled);
        Ok(())
    }
}

/// Framework phase: subscribe the download status relay.
pub struct StorageCallbacks {
    downloads: Arc<dyn DownloadManager>,
    notifier: Arc<dyn Notifier>,
}

impl StorageCallbacks {
    pub fn new(downloads: Arc<dyn DownloadManager>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            downloads,
            notifier,
        }
    }
}

impl Subsystem for StorageCallbacks {
    fn initialize(&mut self, _ctx: &mut InitContext<'_>) -> ShellResult<()> {
        let relay = DownloadStatusRelay::new(self.downloads.clone(), self.notifier.clone());
        self.downloads.subscribe(Arc::new(relay));
        Ok(())
    }
}

/// Framework phase: hand the configured UI strings to the engine.
pub struct Localization;

impl Subsystem for Localization {
    fn initialize(&mut self, ctx: &mut InitContext<'_>) -> ShellResult<()> {
        for (key, value) in &ctx.config.localizations {
            ctx.bridge.add_localization(key, value);
        }
        debug!("Registered {} localized strings", ctx.config.localizations.len());
        Ok(())
    }
}

/// Framework phase, last: start relaying foreground/background transitions.
pub struct LifecycleRegistration;

impl Subsystem for LifecycleRegistration {
    fn initialize(&mut self, ctx: &mut InitContext<'_>) -> ShellResult<()> {
        let observer = LifecycleObserver::new(ctx.bridge.clone());
        ctx.tracker.add_listener(Arc::new(observer));
        Ok(())
    }
}
