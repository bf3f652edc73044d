// ─── Lifecycle ───
// Foreground/background transitions, relayed to the native engine.

use std::sync::Arc;

use tracing::debug;

use crate::core::native::NativeBridge;

pub trait TransitionListener: Send + Sync {
    fn on_transit(&self, foreground: bool);
}

/// Forwards every transition it hears about straight to the engine.
pub struct LifecycleObserver {
    bridge: Arc<dyn NativeBridge>,
}

impl LifecycleObserver {
    pub fn new(bridge: Arc<dyn NativeBridge>) -> Self {
        Self { bridge }
    }
}

impl TransitionListener for LifecycleObserver {
    fn on_transit(&self, foreground: bool) {
        self.bridge.on_transit(foreground);
    }
}

/// Tracks whether the application is in the foreground and tells listeners
/// when that changes.
#[derive(Default)]
pub struct BackgroundTracker {
    listeners: Vec<Arc<dyn TransitionListener>>,
    foreground: Option<bool>,
}

impl BackgroundTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn TransitionListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_foreground(&self) -> bool {
        self.foreground.unwrap_or(false)
    }

    /// Record the new state; listeners hear about it only if it changed.
    pub fn transit(&mut self, foreground: bool) {
        if self.foreground == Some(foreground) {
            return;
        }
        self.foreground = Some(foreground);
        debug!(
            "Application went to {}",
            if foreground { "foreground" } else { "background" }
        );
        for listener in &self.listeners {
            listener.on_transit(foreground);
        }
    }
}
