//! Track metadata and annotation bundle

use crate::annotation::RawAnnotation;
use crate::error::{DataError, DataResult};
use bnl_core::{Hierarchy, Segment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptive metadata for a track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Performer, empty when unknown
    #[serde(default)]
    pub artist: String,
    /// Track title, empty when unknown
    #[serde(default)]
    pub title: String,
    /// Duration in seconds, when known
    #[serde(default)]
    pub duration: Option<f64>,
}

impl TrackInfo {
    /// Replace `_` with spaces in artist and title, as stored in file-name style corpora
    pub fn normalized(mut self) -> Self {
        self.artist = self.artist.replace('_', " ");
        self.title = self.title.replace('_', " ");
        self
    }
}

/// A loaded track: identifier, metadata and raw annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Dataset identifier
    pub id: String,
    /// Normalized metadata
    pub info: TrackInfo,
    /// Annotation as read from the source
    pub annotation: RawAnnotation,
}

impl Track {
    /// Build a track, normalizing its metadata
    pub fn new(id: impl Into<String>, info: TrackInfo, annotation: RawAnnotation) -> Self {
        Self {
            id: id.into(),
            info: info.normalized(),
            annotation,
        }
    }

    /// All annotated layers as a validated hierarchy
    pub fn hierarchy(&self) -> DataResult<Hierarchy<String>> {
        self.annotation
            .to_hierarchy()
            .map_err(|source| DataError::InvalidAnnotation {
                id: self.id.clone(),
                source,
            })
    }

    /// One annotated layer as a validated segment
    pub fn segment(&self, layer: usize) -> DataResult<Segment<String>> {
        let result = self
            .annotation
            .segment(layer)
            .ok_or_else(|| DataError::MissingLayer {
                id: self.id.clone(),
                requested: layer,
                available: self.annotation.num_layers(),
            })?;

        result.map_err(|source| DataError::InvalidAnnotation {
            id: self.id.clone(),
            source,
        })
    }

    /// e.g. `Track(12 (Some Artist - Some Title), 123.4s)`
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Track({}", self.id)?;
        if !self.info.artist.is_empty() && !self.info.title.is_empty() {
            write!(f, " ({} - {})", self.info.artist, self.info.title)?;
        }
        if let Some(duration) = self.info.duration.filter(|d| *d > 0.0) {
            write!(f, ", {duration:.1}s")?;
        }
        write!(f, ")")
    }
}
