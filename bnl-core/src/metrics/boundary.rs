//! Boundary detection agreement under a tolerance window
//!
//! Matching is greedy nearest-first: among all unconsumed `(reference,
//! estimate)` pairs within the window, the closest pair is accepted, both
//! boundaries are consumed, and the search repeats. Equal distances are
//! resolved by earliest reference, then earliest estimate, so results are
//! deterministic and every boundary is matched at most once.

use super::score::Score;
use crate::domain::Segment;
use crate::error::ValueError;
use std::cmp::Ordering;

/// Greedy one-to-one boundary matcher with a fixed window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryMatcher {
    window: f64,
}

/// Outcome of matching two boundary sets
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryMatching {
    /// Accepted `(reference_index, estimate_index)` pairs, ordered by reference index
    pub pairs: Vec<(usize, usize)>,
    /// Size of the reference set
    pub reference_count: usize,
    /// Size of the estimate set
    pub estimate_count: usize,
}

impl BoundaryMatching {
    /// Number of accepted pairs
    pub fn matched(&self) -> usize {
        self.pairs.len()
    }

    /// Precision, recall and F-measure of the matching
    pub fn score(&self) -> Score {
        Score::from_counts(
            self.matched() as u64,
            self.estimate_count as u64,
            self.reference_count as u64,
        )
    }
}

impl BoundaryMatcher {
    /// Create a matcher accepting pairs at most `window` apart
    pub fn new(window: f64) -> Result<Self, ValueError> {
        if !(window.is_finite() && window >= 0.0) {
            return Err(ValueError::InvalidTolerance { tolerance: window });
        }
        Ok(Self { window })
    }

    /// The tolerance window
    pub fn window(&self) -> f64 {
        self.window
    }

    /// Match two raw boundary sequences
    ///
    /// Both sequences must be finite and strictly increasing.
    pub fn match_boundaries(
        &self,
        reference: &[f64],
        estimate: &[f64],
    ) -> Result<BoundaryMatching, ValueError> {
        check_increasing(reference)?;
        check_increasing(estimate)?;
        Ok(self.match_sorted(reference, estimate))
    }

    /// Match the boundaries of two segmentations
    ///
    /// With `trim` only interior boundaries take part; otherwise the span
    /// endpoints are matched as well.
    pub fn compare<L>(
        &self,
        reference: &Segment<L>,
        estimate: &Segment<L>,
        trim: bool,
    ) -> BoundaryMatching {
        let pick = |segment: &Segment<L>| -> Vec<f64> {
            if trim {
                segment.interior_boundaries().to_vec()
            } else {
                segment.boundaries().to_vec()
            }
        };
        self.match_sorted(&pick(reference), &pick(estimate))
    }

    fn match_sorted(&self, reference: &[f64], estimate: &[f64]) -> BoundaryMatching {
        let mut candidates = self.candidates(reference, estimate);
        candidates.sort_by(|a, b| {
            a.0.total_cmp(&b.0)
                .then(a.1.cmp(&b.1))
                .then(a.2.cmp(&b.2))
        });

        let mut reference_used = vec![false; reference.len()];
        let mut estimate_used = vec![false; estimate.len()];
        let mut pairs = Vec::new();

        for (_, r, e) in candidates {
            if reference_used[r] || estimate_used[e] {
                continue;
            }
            reference_used[r] = true;
            estimate_used[e] = true;
            pairs.push((r, e));
        }
        pairs.sort_unstable();

        BoundaryMatching {
            pairs,
            reference_count: reference.len(),
            estimate_count: estimate.len(),
        }
    }

    /// Every `(distance, reference_index, estimate_index)` within the window
    fn candidates(&self, reference: &[f64], estimate: &[f64]) -> Vec<(f64, usize, usize)> {
        let mut candidates = Vec::new();
        for (r, &ref_time) in reference.iter().enumerate() {
            let first = estimate.partition_point(|&est_time| ref_time - est_time > self.window);
            for (offset, &est_time) in estimate[first..].iter().enumerate() {
                let distance = (ref_time - est_time).abs();
                if distance > self.window {
                    break;
                }
                candidates.push((distance, r, first + offset));
            }
        }
        candidates
    }
}

/// Convenience wrapper: match `reference` against `estimate` within `window`
pub fn match_boundaries(
    reference: &[f64],
    estimate: &[f64],
    window: f64,
) -> Result<BoundaryMatching, ValueError> {
    BoundaryMatcher::new(window)?.match_boundaries(reference, estimate)
}

fn check_increasing(boundaries: &[f64]) -> Result<(), ValueError> {
    for (index, &value) in boundaries.iter().enumerate() {
        let ordered = index == 0
            || boundaries[index - 1].partial_cmp(&value) == Some(Ordering::Less);
        if !value.is_finite() || !ordered {
            return Err(ValueError::UnsortedBoundaries { index, value });
        }
    }
    Ok(())
}
