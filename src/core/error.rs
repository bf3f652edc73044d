use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the shell.
/// Every module returns `Result<T, ShellError>`.
#[derive(Debug, Error)]
pub enum ShellError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Can't create settings dir {path:?}: {source}")]
    SettingsDir {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Native engine ───────────────────────────────────
    #[error("Native call failed: {0}")]
    Native(String),

    #[error("Subsystem '{name}' failed to initialize: {message}")]
    Subsystem { name: String, message: String },

    // ── Main loop ───────────────────────────────────────
    #[error("Main loop is gone, task can't be delivered")]
    DispatcherClosed,

    // ── Job identifiers ─────────────────────────────────
    #[error("Value not found for job type: {0}")]
    JobNotRegistered(String),

    #[error("Job type registered twice: {0}")]
    JobAlreadyRegistered(String),

    #[error("Job identifier for registration #{0} does not fit in i32")]
    JobIdOverflow(usize),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type ShellResult<T> = Result<T, ShellError>;

impl ShellError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShellError::Io {
            path: path.into(),
            source,
        }
    }

    /// Only platform directory failures leave the process usable; the shell
    /// keeps running with the native engine inert.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ShellError::Io { .. })
    }
}

impl From<std::io::Error> for ShellError {
    fn from(source: std::io::Error) -> Self {
        ShellError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_directory_failures_are_recoverable() {
        let io = ShellError::io(
            "/sdcard/MapsWithMe",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(io.is_recoverable());

        let settings = ShellError::SettingsDir {
            path: PathBuf::from("/data/settings"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(!settings.is_recoverable());
        assert!(!ShellError::Subsystem {
            name: "search".into(),
            message: "boom".into()
        }
        .is_recoverable());
        assert!(!ShellError::JobNotRegistered("OsmUpload".into()).is_recoverable());
    }

    #[test]
    fn io_error_message_names_the_path() {
        let err = ShellError::io(
            "/tmp/maps",
            std::io::Error::new(std::io::ErrorKind::Other, "read-only"),
        );
        assert_eq!(err.to_string(), "IO error at \"/tmp/maps\": read-only");
    }
}
