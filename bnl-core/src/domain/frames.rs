//! Fixed-hop frame sampling

use super::segment::Segment;
use crate::error::ValueError;

/// Slack absorbed when deciding whether the hop divides the span evenly
const FRAME_COUNT_SLACK: f64 = 1e-9;

/// Sample times `start + i * hop` for `i in 0..len`
///
/// Only full frames are kept: `len = floor(duration / hop)`, so the span end
/// is never sampled and a span shorter than one hop has no frames. Reference
/// and estimate share a span, so they always produce the same frame count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGrid {
    start: f64,
    hop: f64,
    len: usize,
}

impl FrameGrid {
    /// Lay a grid over `[start, end]`
    pub fn new(start: f64, end: f64, hop: f64) -> Result<Self, ValueError> {
        if !(hop.is_finite() && hop > 0.0) {
            return Err(ValueError::NonPositiveHop { hop });
        }

        let duration = end - start;
        let len = (duration / hop + FRAME_COUNT_SLACK).floor();
        if !(len >= 1.0) {
            return Err(ValueError::NoFrames { hop, duration });
        }

        Ok(Self {
            start,
            hop,
            len: len as usize,
        })
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; an empty grid is rejected at construction
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Frame spacing
    pub fn hop(&self) -> f64 {
        self.hop
    }

    /// Sample time of frame `index`
    pub fn time(&self, index: usize) -> f64 {
        self.start + index as f64 * self.hop
    }

    /// Label of every frame
    ///
    /// Walks frames and intervals together, so the cost is linear in both.
    pub fn sample<'a, L>(&self, segment: &'a Segment<L>) -> Vec<&'a L> {
        let boundaries = segment.boundaries();
        let labels = segment.labels();
        let last = labels.len() - 1;

        let mut interval = 0;
        (0..self.len)
            .map(|index| {
                let t = self.time(index);
                while interval < last && boundaries[interval + 1] <= t {
                    interval += 1;
                }
                &labels[interval]
            })
            .collect()
    }
}

impl<L> Segment<L> {
    /// Labels sampled every `hop` from `start`; see [`FrameGrid`]
    pub fn frames(&self, hop: f64) -> Result<Vec<&L>, ValueError> {
        Ok(FrameGrid::new(self.start(), self.end(), hop)?.sample(self))
    }
}
