use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::core::dispatch::{self, MainLoop, MainLoopDispatcher};
use crate::core::downloads::{DownloadManager, Notifier};
use crate::core::error::ShellResult;
use crate::core::init::{InitState, InitializationSequencer, SubsystemEntry};
use crate::core::jobs::{JobIdRegistry, JobType};
use crate::core::native::NativeBridge;
use crate::core::paths::{DefaultPathResolver, PathResolver};

use super::ShellConfig;

/// Engine-side collaborators the host hands to the shell.
pub struct Collaborators {
    pub bridge: Arc<dyn NativeBridge>,
    pub downloads: Arc<dyn DownloadManager>,
    pub notifier: Arc<dyn Notifier>,
    /// `None` resolves paths from the OS user directories.
    pub resolver: Option<Box<dyn PathResolver>>,
}

/// The running shell: init state, main-loop entry point, job ids.
pub struct Application {
    sequencer: InitializationSequencer,
    dispatcher: MainLoopDispatcher,
    jobs: JobIdRegistry<JobType>,
    settings_dir: PathBuf,
}

impl Application {
    /// Process start: settings dir first, then the main loop and the
    /// background tracker. The returned `MainLoop` belongs to the main thread.
    pub fn on_create(
        config: ShellConfig,
        collaborators: Collaborators,
    ) -> ShellResult<(Self, MainLoop)> {
        let Collaborators {
            bridge,
            downloads,
            notifier,
            resolver,
        } = collaborators;
        let resolver: Box<dyn PathResolver> = match resolver {
            Some(resolver) => resolver,
            None => Box::new(DefaultPathResolver::from_config(&config)),
        };

        let (dispatcher, main_loop) = dispatch::main_loop(bridge.clone());
        let mut sequencer =
            InitializationSequencer::new(config, bridge, resolver, downloads, notifier);
        let settings_dir = sequencer.set_settings_dir()?;
        let jobs = JobIdRegistry::standard()?;

        info!("Application is created");
        Ok((
            Self {
                sequencer,
                dispatcher,
                jobs,
                settings_dir,
            },
            main_loop,
        ))
    }

    pub fn add_platform_step(&mut self, entry: SubsystemEntry) {
        self.sequencer.add_platform_step(entry);
    }

    pub fn add_framework_step(&mut self, entry: SubsystemEntry) {
        self.sequencer.add_framework_step(entry);
    }

    /// Platform then framework; every error reaches the caller.
    pub fn init(&mut self) -> ShellResult<()> {
        self.sequencer.init()
    }

    /// `init` with the startup policy applied: a recoverable platform
    /// failure keeps the shell running with the engine inert, anything else
    /// is returned and should end startup.
    pub fn start(&mut self) -> ShellResult<InitState> {
        match self.sequencer.init() {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                warn!("Native part disabled, platform init failed: {}", e);
            }
            Err(e) => return Err(e),
        }
        Ok(self.sequencer.state())
    }

    pub fn are_platform_and_core_initialized(&self) -> bool {
        self.sequencer.state().is_ready()
    }

    pub fn state(&self) -> InitState {
        self.sequencer.state()
    }

    pub fn config(&self) -> &ShellConfig {
        self.sequencer.config()
    }

    pub fn settings_dir(&self) -> &Path {
        &self.settings_dir
    }

    /// Dispatcher to hand to native threads.
    pub fn dispatcher(&self) -> MainLoopDispatcher {
        self.dispatcher.clone()
    }

    pub fn jobs(&self) -> &JobIdRegistry<JobType> {
        &self.jobs
    }

    pub fn job_id(&self, job_type: JobType) -> ShellResult<i32> {
        self.jobs.id(&job_type)
    }

    /// Foreground/background signal from the OS.
    pub fn on_transit(&mut self, foreground: bool) {
        self.sequencer.tracker_mut().transit(foreground);
    }
}
