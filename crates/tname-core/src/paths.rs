//! Standard paths used by tname

use std::path::{Path, PathBuf};

const APP_DIR: &str = "tname";

/// Standard tname paths
pub struct Paths {
    /// Config directory (~/.config/tname)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join(APP_DIR);

        Self { config }
    }

    /// Paths rooted at an explicit config directory
    pub fn with_config_dir(config: impl Into<PathBuf>) -> Self {
        Self {
            config: config.into(),
        }
    }

    /// Default location of the config file
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.toml")
    }

    /// Resolve a path mentioned in the config file.
    ///
    /// Relative paths are taken relative to the config directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config.join(path)
        }
    }
}
