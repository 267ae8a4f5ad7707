//! Track source contract and an in-memory implementation

use crate::error::{DataError, DataResult};
use crate::track::Track;
use log::warn;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;

/// Anything that can enumerate and load annotated tracks
pub trait TrackSource: Send + Sync {
    /// Available track ids, numeric ids in numeric order
    fn list_ids(&self) -> DataResult<Vec<String>>;

    /// Load one track
    fn load(&self, id: &str) -> DataResult<Track>;

    /// Load several tracks, skipping any that fail with a warning
    fn load_many(&self, ids: &[String]) -> Vec<Track> {
        ids.iter()
            .filter_map(|id| match self.load(id) {
                Ok(track) => Some(track),
                Err(e) => {
                    warn!("Could not load track {id}: {e}");
                    None
                }
            })
            .collect()
    }
}

/// Order ids numerically when both parse as integers, otherwise lexically
///
/// Numeric ids sort before non-numeric ones.
pub fn compare_track_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Tracks held in memory, keyed by id
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tracks: HashMap<String, Track>,
}

impl MemorySource {
    /// Empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a track
    pub fn insert(&mut self, track: Track) {
        self.tracks.insert(track.id.clone(), track);
    }

    /// Number of held tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether no track is held
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl FromIterator<Track> for MemorySource {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        let mut source = Self::new();
        for track in iter {
            source.insert(track);
        }
        source
    }
}

impl TrackSource for MemorySource {
    fn list_ids(&self) -> DataResult<Vec<String>> {
        let mut ids: Vec<String> = self.tracks.keys().cloned().collect();
        ids.sort_by(|a, b| compare_track_ids(a, b));
        Ok(ids)
    }

    fn load(&self, id: &str) -> DataResult<Track> {
        self.tracks
            .get(id)
            .cloned()
            .ok_or_else(|| DataError::TrackNotFound {
                id: id.to_string(),
                expected_path: PathBuf::from(format!("memory:{id}")),
            })
    }
}
