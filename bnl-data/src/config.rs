//! Dataset path configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data root
pub const DATA_ROOT_ENV: &str = "BNL_DATA_ROOT";

/// Data root used when the environment variable is unset
pub const DEFAULT_DATA_ROOT: &str = "./data";

/// Annotation directory name under the data root
pub const ANNOTATIONS_DIR: &str = "annotations";

/// Where track annotations live on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    data_root: PathBuf,
    annotations_dir: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl DatasetConfig {
    /// Configuration rooted at `data_root` with the default layout beneath it
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        let data_root = data_root.into();
        let annotations_dir = data_root.join(ANNOTATIONS_DIR);
        Self {
            data_root,
            annotations_dir,
        }
    }

    /// Root from `BNL_DATA_ROOT`, falling back to `./data`
    pub fn from_env() -> Self {
        match env::var_os(DATA_ROOT_ENV) {
            Some(root) if !root.is_empty() => Self::new(root),
            _ => Self::new(DEFAULT_DATA_ROOT),
        }
    }

    /// Override the annotation directory
    pub fn with_annotations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.annotations_dir = dir.into();
        self
    }

    /// Dataset root directory
    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Directory holding `<id>.json` annotation documents
    pub fn annotations_dir(&self) -> &Path {
        &self.annotations_dir
    }
}
