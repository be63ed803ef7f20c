use std::path::{Path, PathBuf};

/// Default data directory (relative to current working directory)
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Subdirectory for the local file-backed store
pub const STORE_DIR: &str = "store";

/// Subdirectory for log files
pub const LOGS_DIR: &str = "logs";

/// Helper struct to manage data paths
#[derive(Clone, Debug)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    /// Create a new DataPaths instance with the given root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root data directory
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Get the directory for the local file-backed store
    pub fn store(&self) -> PathBuf {
        self.root.join(STORE_DIR)
    }

    /// Get the logs directory
    pub fn logs(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    /// Get the session file path
    pub fn session_file(&self) -> PathBuf {
        self.root.join("session.json")
    }

    /// Get the store config file path
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// Ensure all directories exist
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.store())?;
        std::fs::create_dir_all(self.logs())?;
        Ok(())
    }
}
