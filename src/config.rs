//! Data directory resolution
//!
//! Resolution order:
//! 1. `COMPOUND_GROWTH_DATA_DIR` environment variable
//! 2. `$HOME/.compound-growth`
//! 3. `./.compound-growth`

use std::path::{Path, PathBuf};

use crate::scenario::SCENARIOS_FILE;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "COMPOUND_GROWTH_DATA_DIR";

const DIR_NAME: &str = ".compound-growth";

/// Paths used by the CLI
#[derive(Debug, Clone)]
pub struct AppPaths {
    base_dir: PathBuf,
}

impl AppPaths {
    /// Resolve from the environment
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var(DATA_DIR_ENV).ok().as_deref(),
            std::env::var("HOME").ok().as_deref(),
        )
    }

    fn resolve(override_dir: Option<&str>, home: Option<&str>) -> Self {
        let base_dir = match (override_dir, home) {
            (Some(dir), _) if !dir.is_empty() => PathBuf::from(dir),
            (_, Some(home)) if !home.is_empty() => Path::new(home).join(DIR_NAME),
            _ => PathBuf::from(DIR_NAME),
        };
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the saved scenarios file
    pub fn scenarios_file(&self) -> PathBuf {
        self.base_dir.join(SCENARIOS_FILE)
    }
}
