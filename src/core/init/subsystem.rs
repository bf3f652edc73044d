use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::error::{ShellError, ShellResult};
use crate::core::lifecycle::BackgroundTracker;
use crate::core::native::NativeBridge;
use crate::core::state::ShellConfig;

/// What an init step can reach while it runs.
pub struct InitContext<'a> {
    pub bridge: &'a Arc<dyn NativeBridge>,
    pub config: &'a ShellConfig,
    pub tracker: &'a mut BackgroundTracker,
}

/// One step of a phase's init table.
pub trait Subsystem: Send {
    fn initialize(&mut self, ctx: &mut InitContext<'_>) -> ShellResult<()>;
}

impl<F> Subsystem for F
where
    F: FnMut(&mut InitContext<'_>) -> ShellResult<()> + Send,
{
    fn initialize(&mut self, ctx: &mut InitContext<'_>) -> ShellResult<()> {
        self(ctx)
    }
}

/// How a failing step affects the rest of its phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the phase and hand the error to the caller.
    #[default]
    HardFail,
    /// Log and move on to the next step.
    LogAndContinue,
}

pub struct SubsystemEntry {
    pub name: String,
    pub policy: FailurePolicy,
    pub subsystem: Box<dyn Subsystem>,
    completed: bool,
}

impl SubsystemEntry {
    pub fn new(name: impl Into<String>, subsystem: impl Subsystem + 'static) -> Self {
        Self {
            name: name.into(),
            policy: FailurePolicy::HardFail,
            subsystem: Box::new(subsystem),
            completed: false,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl std::fmt::Debug for SubsystemEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubsystemEntry")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

/// Run `entries` top to bottom. Entries that already ran, or failed softly,
/// are skipped, so after a hard failure the next call resumes at the step
/// that failed.
pub(crate) fn run_table(
    entries: &mut [SubsystemEntry],
    ctx: &mut InitContext<'_>,
) -> ShellResult<()> {
    for entry in entries.iter_mut().filter(|e| !e.completed) {
        debug!("Initializing {}", entry.name);
        if let Err(e) = entry.subsystem.initialize(ctx) {
            match entry.policy {
                FailurePolicy::HardFail => {
                    return Err(ShellError::Subsystem {
                        name: entry.name.clone(),
                        message: e.to_string(),
                    });
                }
                FailurePolicy::LogAndContinue => {
                    warn!("Subsystem {} failed, continuing: {}", entry.name, e);
                }
            }
        }
        entry.completed = true;
    }
    Ok(())
}
