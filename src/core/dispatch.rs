// ─── Main Loop Dispatcher ───
// Moves native task handles from engine threads onto the main loop.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::core::error::{ShellError, ShellResult};
use crate::core::native::{NativeBridge, TaskHandle};

/// Identifies which main loop a task was posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatcherToken(Uuid);

/// A native task handle travelling to the main loop. Consumed exactly once.
#[derive(Debug)]
pub struct PendingTask {
    pub handle: TaskHandle,
    pub token: DispatcherToken,
}

/// Sending half, cloned freely into native callback threads.
#[derive(Debug, Clone)]
pub struct MainLoopDispatcher {
    token: DispatcherToken,
    sender: mpsc::UnboundedSender<PendingTask>,
}

/// Receiving half, owned by the single main execution context.
pub struct MainLoop {
    token: DispatcherToken,
    receiver: mpsc::UnboundedReceiver<PendingTask>,
    bridge: Arc<dyn NativeBridge>,
}

/// Create a connected dispatcher / loop pair delivering into `bridge`.
pub fn main_loop(bridge: Arc<dyn NativeBridge>) -> (MainLoopDispatcher, MainLoop) {
    let token = DispatcherToken(Uuid::new_v4());
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        MainLoopDispatcher { token, sender },
        MainLoop {
            token,
            receiver,
            bridge,
        },
    )
}

impl MainLoopDispatcher {
    /// Queue `handle` for the main loop and return without waiting.
    ///
    /// No deduplication: a handle forwarded twice is processed twice.
    pub fn forward(&self, handle: TaskHandle) -> ShellResult<()> {
        self.sender
            .send(PendingTask {
                handle,
                token: self.token,
            })
            .map_err(|_| ShellError::DispatcherClosed)
    }

    pub fn token(&self) -> DispatcherToken {
        self.token
    }
}

impl MainLoop {
    pub fn token(&self) -> DispatcherToken {
        self.token
    }

    /// Process tasks in submission order until every dispatcher is dropped.
    /// Returns the number of tasks processed.
    pub async fn run(mut self) -> usize {
        debug!("Main loop {:?} started", self.token);
        let mut processed = 0;
        while let Some(task) = self.receiver.recv().await {
            self.deliver(task);
            processed += 1;
        }
        debug!("Main loop {:?} stopped after {} tasks", self.token, processed);
        processed
    }

    /// Process whatever is queued right now, without waiting for more.
    pub fn run_pending(&mut self) -> usize {
        let mut processed = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(task) => {
                    self.deliver(task);
                    processed += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        processed
    }

    fn deliver(&self, task: PendingTask) {
        debug_assert_eq!(task.token, self.token);
        trace!("Processing native task {:?}", task.handle);
        self.bridge.process_task(task.handle);
    }
}
