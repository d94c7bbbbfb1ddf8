//! Persistent browser storage shared by every pane
//!
//! One profile is created at startup and passed by reference to the rendering
//! host, so cookies and cache survive restarts.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// On-disk storage for the embedded browser
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserProfile {
    storage_path: PathBuf,
    cache_path: PathBuf,
}

impl BrowserProfile {
    /// Create (or reuse) `<base_dir>/<app_name>/webengine` and its cache directory
    pub fn create(app_name: &str, base_dir: &Path) -> Result<Self> {
        let storage_path = base_dir.join(app_name).join("webengine");
        let cache_path = storage_path.join("cache");
        fs::create_dir_all(&cache_path).with_context(|| {
            format!("Failed to create browser storage at {}", storage_path.display())
        })?;

        info!(storage = %storage_path.display(), "Browser storage ready");
        Ok(BrowserProfile {
            storage_path,
            cache_path,
        })
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }
}

/// Writable per-user data directory, falling back to the executable's directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}
