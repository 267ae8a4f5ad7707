//! Caller-owned track cache with explicit invalidation

use crate::error::DataResult;
use crate::source::TrackSource;
use crate::track::Track;
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Memoizes [`TrackSource::load`] results until invalidated
///
/// Failed loads are not cached. The cache is shareable across threads; two
/// threads missing on the same id may both load it, and the later insert wins.
#[derive(Debug)]
pub struct TrackCache<S: TrackSource> {
    source: S,
    tracks: RwLock<HashMap<String, Arc<Track>>>,
}

impl<S: TrackSource> TrackCache<S> {
    /// Empty cache in front of `source`
    pub fn new(source: S) -> Self {
        Self {
            source,
            tracks: RwLock::new(HashMap::new()),
        }
    }

    /// The wrapped source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Cached track, loading it from the source on a miss
    pub fn get(&self, id: &str) -> DataResult<Arc<Track>> {
        if let Some(track) = self
            .tracks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
        {
            debug!("Track cache hit: {id}");
            return Ok(Arc::clone(track));
        }

        debug!("Track cache miss: {id}");
        let track = Arc::new(self.source.load(id)?);
        self.tracks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), Arc::clone(&track));
        Ok(track)
    }

    /// Drop one entry; returns whether it was cached
    pub fn invalidate(&self, id: &str) -> bool {
        let removed = self
            .tracks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some();
        debug!("Invalidated track {id} (cached: {removed})");
        removed
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.tracks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        debug!("Cleared track cache");
    }

    /// Number of cached tracks
    pub fn len(&self) -> usize {
        self.tracks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
