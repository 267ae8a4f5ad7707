//! Multi-resolution stack of segmentations over one span

use super::frames::FrameGrid;
use super::segment::Segment;
use crate::error::{ValidationError, ValueError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Absolute tolerance used when comparing span endpoints
pub const SPAN_EPSILON: f64 = 1e-9;

/// Whether two spans coincide within [`SPAN_EPSILON`]
pub(crate) fn same_span(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() <= SPAN_EPSILON && (a.1 - b.1).abs() <= SPAN_EPSILON
}

/// Ordered layers from coarsest (`0`) to finest, all sharing one span
///
/// Finer layers are not required to refine coarser ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "HierarchyRecord<L>",
    into = "HierarchyRecord<L>",
    bound(
        serialize = "L: Clone + Serialize",
        deserialize = "L: Deserialize<'de>"
    )
)]
pub struct Hierarchy<L> {
    layers: Vec<Segment<L>>,
}

#[derive(Serialize, Deserialize)]
#[serde(bound(serialize = "L: Clone + Serialize", deserialize = "L: Deserialize<'de>"))]
struct HierarchyRecord<L> {
    layers: Vec<Segment<L>>,
}

impl<L> TryFrom<HierarchyRecord<L>> for Hierarchy<L> {
    type Error = ValidationError;

    fn try_from(record: HierarchyRecord<L>) -> Result<Self, Self::Error> {
        Hierarchy::from_layers(record.layers)
    }
}

impl<L> From<Hierarchy<L>> for HierarchyRecord<L> {
    fn from(hierarchy: Hierarchy<L>) -> Self {
        Self {
            layers: hierarchy.layers,
        }
    }
}

impl<L> Hierarchy<L> {
    /// Stack layers, checking that every layer covers layer 0's span
    pub fn from_layers(layers: Vec<Segment<L>>) -> Result<Self, ValidationError> {
        let Some(first) = layers.first() else {
            return Err(ValidationError::EmptyHierarchy);
        };
        let expected = (first.start(), first.end());

        for (layer, segment) in layers.iter().enumerate().skip(1) {
            if !same_span(expected, (segment.start(), segment.end())) {
                return Err(ValidationError::LayerSpanMismatch {
                    layer,
                    expected_start: expected.0,
                    expected_end: expected.1,
                    start: segment.start(),
                    end: segment.end(),
                });
            }
        }

        Ok(Self { layers })
    }

    /// Number of layers
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Layers, coarsest first
    pub fn layers(&self) -> &[Segment<L>] {
        &self.layers
    }

    /// Layer at `index`, if any
    pub fn layer(&self, index: usize) -> Option<&Segment<L>> {
        self.layers.get(index)
    }

    /// Shared span start
    pub fn start(&self) -> f64 {
        self.layers[0].start()
    }

    /// Shared span end
    pub fn end(&self) -> f64 {
        self.layers[0].end()
    }

    /// Shared span duration
    pub fn duration(&self) -> f64 {
        self.end() - self.start()
    }

    /// Per-layer labels
    pub fn labels(&self) -> Vec<&[L]> {
        self.layers.iter().map(Segment::labels).collect()
    }

    /// Per-layer intervals
    pub fn to_intervals(&self) -> Vec<Vec<(f64, f64)>> {
        self.layers.iter().map(Segment::to_intervals).collect()
    }

    /// Sorted union of every layer's boundaries
    pub fn boundary_union(&self) -> Vec<f64> {
        let mut all: Vec<f64> = self
            .layers
            .iter()
            .flat_map(|layer| layer.boundaries().iter().copied())
            .collect();
        all.sort_by(f64::total_cmp);
        all.dedup();
        all
    }

    /// Labels of every layer sampled every `hop` from `start`
    ///
    /// Only full frames are produced, so `end` itself is never sampled; see
    /// [`FrameGrid`].
    pub fn frames(&self, hop: f64) -> Result<Vec<Vec<&L>>, ValueError> {
        let grid = FrameGrid::new(self.start(), self.end(), hop)?;
        Ok(self.layers.iter().map(|layer| grid.sample(layer)).collect())
    }
}

impl<L: fmt::Display> fmt::Display for Hierarchy<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hierarchy({} levels):", self.num_layers())?;
        for (index, layer) in self.layers.iter().enumerate() {
            write!(f, "\nLevel {index}: {layer}")?;
        }
        Ok(())
    }
}
