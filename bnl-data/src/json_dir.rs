//! Track source backed by a directory of `<id>.json` documents
//!
//! Each document looks like:
//!
//! ```json
//! {
//!   "metadata": { "artist": "Some_Artist", "title": "Some_Title", "duration": 123.4 },
//!   "layers": [
//!     { "name": "coarse", "intervals": [[0.0, 60.0], [60.0, 123.4]], "labels": ["A", "B"] }
//!   ]
//! }
//! ```

use crate::annotation::{RawAnnotation, RawLayer};
use crate::config::DatasetConfig;
use crate::error::{DataError, DataResult};
use crate::source::{compare_track_ids, TrackSource};
use crate::track::{Track, TrackInfo};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// On-disk layout of one track document
#[derive(Debug, Deserialize)]
struct TrackDocument {
    #[serde(default)]
    metadata: TrackInfo,
    #[serde(default)]
    layers: Vec<RawLayer>,
}

/// Reads tracks from `<dir>/<id>.json`; only all-digit ids are listed
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    dir: PathBuf,
}

impl JsonDirectorySource {
    /// Source reading documents from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Source over the configured annotation directory
    pub fn from_config(config: &DatasetConfig) -> Self {
        Self::new(config.annotations_dir())
    }

    /// Annotation directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the document for `id` would live at
    pub fn track_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.{EXTENSION}"))
    }
}

impl TrackSource for JsonDirectorySource {
    fn list_ids(&self) -> DataResult<Vec<String>> {
        if !self.dir.exists() {
            warn!("Annotation directory not found: {}", self.dir.display());
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| DataError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| DataError::Io {
                    path: self.dir.clone(),
                    source: e,
                })?
                .path();

            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !stem.is_empty() && stem.bytes().all(|b| b.is_ascii_digit()) {
                ids.push(stem.to_string());
            }
        }

        ids.sort_by(|a, b| compare_track_ids(a, b));
        debug!("Found {} tracks in {}", ids.len(), self.dir.display());
        Ok(ids)
    }

    fn load(&self, id: &str) -> DataResult<Track> {
        let path = self.track_path(id);
        if !path.exists() {
            return Err(DataError::TrackNotFound {
                id: id.to_string(),
                expected_path: path,
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| DataError::Io {
            path: path.clone(),
            source: e,
        })?;

        let document: TrackDocument =
            serde_json::from_str(&content).map_err(|e| DataError::JsonParse { path, source: e })?;

        Ok(Track::new(
            id,
            document.metadata,
            RawAnnotation {
                layers: document.layers,
            },
        ))
    }
}
