// ─── Paths ───
// Directories the native engine needs before platform init.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::error::{ShellError, ShellResult};
use crate::core::state::ShellConfig;

/// The four paths handed to the native platform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet {
    apk_path: PathBuf,
    writable_dir: PathBuf,
    private_dir: PathBuf,
    temp_dir: PathBuf,
}

impl PathSet {
    pub fn new(
        apk_path: PathBuf,
        writable_dir: PathBuf,
        private_dir: PathBuf,
        temp_dir: PathBuf,
    ) -> Self {
        Self {
            apk_path,
            writable_dir,
            private_dir,
            temp_dir,
        }
    }

    pub fn apk_path(&self) -> &Path {
        &self.apk_path
    }

    pub fn writable_dir(&self) -> &Path {
        &self.writable_dir
    }

    pub fn private_dir(&self) -> &Path {
        &self.private_dir
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }
}

/// Platform-specific path lookup.
pub trait PathResolver: Send + Sync {
    fn settings_dir(&self) -> PathBuf;
    fn apk_path(&self) -> PathBuf;
    fn writable_dir(&self) -> PathBuf;
    fn private_dir(&self) -> PathBuf;
    fn temp_dir(&self) -> PathBuf;

    fn resolve(&self) -> PathSet {
        let paths = PathSet::new(
            self.apk_path(),
            self.writable_dir(),
            self.private_dir(),
            self.temp_dir(),
        );
        debug!("Apk path = {:?}", paths.apk_path());
        debug!("Writable path = {:?}", paths.writable_dir());
        debug!("Private path = {:?}", paths.private_dir());
        debug!("Temp path = {:?}", paths.temp_dir());
        paths
    }
}

/// Resolves paths from the OS user directories, honouring config overrides.
#[derive(Debug, Clone)]
pub struct DefaultPathResolver {
    app_dir_name: String,
    settings_dir: Option<PathBuf>,
    apk_path: Option<PathBuf>,
    writable_dir: Option<PathBuf>,
    private_dir: Option<PathBuf>,
    temp_dir: Option<PathBuf>,
}

impl DefaultPathResolver {
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            app_dir_name: config.app_dir_name.clone(),
            settings_dir: config.settings_dir.clone(),
            apk_path: config.apk_path.clone(),
            writable_dir: config.writable_dir.clone(),
            private_dir: config.private_dir.clone(),
            temp_dir: config.temp_dir.clone(),
        }
    }

    fn under(&self, kind: &str, base: Option<PathBuf>) -> PathBuf {
        let base = base.unwrap_or_else(|| {
            warn!(
                "No OS {} directory, falling back to the working directory",
                kind
            );
            PathBuf::from(".")
        });
        base.join(&self.app_dir_name)
    }
}

impl PathResolver for DefaultPathResolver {
    fn settings_dir(&self) -> PathBuf {
        self.settings_dir
            .clone()
            .unwrap_or_else(|| self.under("config", dirs::config_dir()))
    }

    fn apk_path(&self) -> PathBuf {
        self.apk_path.clone().unwrap_or_else(|| {
            std::env::current_exe().unwrap_or_else(|_| PathBuf::from(&self.app_dir_name))
        })
    }

    fn writable_dir(&self) -> PathBuf {
        self.writable_dir
            .clone()
            .unwrap_or_else(|| self.under("data", dirs::data_dir()))
    }

    fn private_dir(&self) -> PathBuf {
        self.private_dir
            .clone()
            .unwrap_or_else(|| self.under("local data", dirs::data_local_dir()))
    }

    fn temp_dir(&self) -> PathBuf {
        self.temp_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(&self.app_dir_name))
    }
}

/// Create `path` (and parents) and check it ended up a directory.
pub fn create_directory(path: &Path) -> ShellResult<()> {
    std::fs::create_dir_all(path).map_err(|source| ShellError::io(path, source))?;

    let metadata = std::fs::metadata(path).map_err(|source| ShellError::io(path, source))?;
    if !metadata.is_dir() {
        return Err(ShellError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
        ));
    }
    Ok(())
}

/// Create the writable, private and temp directories, in that order.
///
/// With `emulate_bad_storage` the writable directory is reported as
/// unwritable without touching the filesystem.
pub fn create_platform_directories(paths: &PathSet, emulate_bad_storage: bool) -> ShellResult<()> {
    if emulate_bad_storage {
        return Err(ShellError::io(
            paths.writable_dir(),
            std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "emulated bad external storage",
            ),
        ));
    }

    create_directory(paths.writable_dir())?;
    create_directory(paths.private_dir())?;
    create_directory(paths.temp_dir())?;
    Ok(())
}
