//! Raw annotation records and their conversion into segmentations

use bnl_core::{Hierarchy, Segment, ValidationError};
use serde::{Deserialize, Serialize};

/// Largest gap or overlap between adjacent intervals that is still treated as a joint
///
/// Annotation files round times independently per interval, so an interval
/// may end a few microseconds away from where the next one starts.
pub const JOINT_TOLERANCE: f64 = 1e-3;

/// One annotated layer as stored: `(start, end)` intervals with parallel labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLayer {
    /// Layer name, e.g. `"coarse"` or `"lowercase"`
    #[serde(default)]
    pub name: Option<String>,
    /// `(start, end)` times in seconds, in order
    pub intervals: Vec<(f64, f64)>,
    /// One label per interval
    pub labels: Vec<String>,
}

impl RawLayer {
    /// Validate into a segment
    pub fn to_segment(&self) -> Result<Segment<String>, ValidationError> {
        Segment::from_intervals_with_tolerance(
            &self.intervals,
            self.labels.clone(),
            JOINT_TOLERANCE,
        )
    }
}

/// Layers of one track, coarsest first, exactly as read from disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAnnotation {
    /// Layers, coarsest first
    pub layers: Vec<RawLayer>,
}

impl RawAnnotation {
    /// Number of stored layers
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Validate layer `index`, or `None` if there is no such layer
    pub fn segment(&self, index: usize) -> Option<Result<Segment<String>, ValidationError>> {
        self.layers.get(index).map(RawLayer::to_segment)
    }

    /// Validate every layer and stack them
    pub fn to_hierarchy(&self) -> Result<Hierarchy<String>, ValidationError> {
        let layers = self
            .layers
            .iter()
            .map(RawLayer::to_segment)
            .collect::<Result<Vec<_>, _>>()?;
        Hierarchy::from_layers(layers)
    }
}
