//! Flat labeled segmentation of a time span

use crate::error::{ValidationError, ValueError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A labeled partition of `[start, end]` into contiguous intervals
///
/// Label `i` covers `[b_i, b_{i+1})`; the final interval is closed at `end`.
/// Adjacent intervals may carry equal labels and are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "SegmentRecord<L>",
    into = "SegmentRecord<L>",
    bound(
        serialize = "L: Clone + Serialize",
        deserialize = "L: Deserialize<'de>"
    )
)]
pub struct Segment<L> {
    boundaries: Vec<f64>,
    labels: Vec<L>,
}

/// Wire form of a [`Segment`]; converted through the validating constructor
#[derive(Serialize, Deserialize)]
struct SegmentRecord<L> {
    boundaries: Vec<f64>,
    labels: Vec<L>,
}

impl<L> TryFrom<SegmentRecord<L>> for Segment<L> {
    type Error = ValidationError;

    fn try_from(record: SegmentRecord<L>) -> Result<Self, Self::Error> {
        Segment::from_boundaries(record.boundaries, record.labels)
    }
}

impl<L> From<Segment<L>> for SegmentRecord<L> {
    fn from(segment: Segment<L>) -> Self {
        Self {
            boundaries: segment.boundaries,
            labels: segment.labels,
        }
    }
}

impl<L> Segment<L> {
    /// Build from `n + 1` strictly increasing boundaries and `n` labels
    pub fn from_boundaries(boundaries: Vec<f64>, labels: Vec<L>) -> Result<Self, ValidationError> {
        validate_boundaries(&boundaries)?;

        if labels.len() + 1 != boundaries.len() {
            return Err(ValidationError::LabelCountMismatch {
                labels: labels.len(),
                boundaries: boundaries.len(),
            });
        }

        Ok(Self { boundaries, labels })
    }

    /// Build from exactly adjacent `(start, end)` intervals
    pub fn from_intervals(
        intervals: &[(f64, f64)],
        labels: Vec<L>,
    ) -> Result<Self, ValidationError> {
        Self::from_intervals_with_tolerance(intervals, labels, 0.0)
    }

    /// Build from `(start, end)` intervals whose joints may differ by at most `tolerance`
    ///
    /// Each interval contributes its start as a boundary; the last interval
    /// also contributes its end.
    pub fn from_intervals_with_tolerance(
        intervals: &[(f64, f64)],
        labels: Vec<L>,
        tolerance: f64,
    ) -> Result<Self, ValidationError> {
        let Some(&(_, last_end)) = intervals.last() else {
            return Err(ValidationError::EmptyIntervals);
        };

        for (index, pair) in intervals.windows(2).enumerate() {
            let (_, end) = pair[0];
            let (next_start, _) = pair[1];
            // A NaN joint fails this comparison too.
            if !((end - next_start).abs() <= tolerance) {
                return Err(ValidationError::NonContiguousIntervals {
                    index,
                    end,
                    next_start,
                });
            }
        }

        let mut boundaries: Vec<f64> = intervals.iter().map(|&(start, _)| start).collect();
        boundaries.push(last_end);

        Self::from_boundaries(boundaries, labels)
    }

    /// First boundary
    pub fn start(&self) -> f64 {
        self.boundaries[0]
    }

    /// Last boundary
    pub fn end(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// `end - start`, always positive
    pub fn duration(&self) -> f64 {
        self.end() - self.start()
    }

    /// Number of labeled intervals
    pub fn num_segments(&self) -> usize {
        self.labels.len()
    }

    /// All boundaries including the span endpoints
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Boundaries strictly inside the span
    pub fn interior_boundaries(&self) -> &[f64] {
        &self.boundaries[1..self.boundaries.len() - 1]
    }

    /// One label per interval
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Interval index containing `t`, or `None` outside `[start, end]`
    pub fn index_at(&self, t: f64) -> Option<usize> {
        if !(self.start() <= t && t <= self.end()) {
            return None;
        }
        let upper = self.boundaries.partition_point(|&b| b <= t);
        Some((upper - 1).min(self.labels.len() - 1))
    }

    /// Label of the interval containing `t`
    ///
    /// Intervals are half-open except the last, so `t == end` maps to the
    /// final label.
    pub fn label_at(&self, t: f64) -> Result<&L, ValueError> {
        self.index_at(t)
            .map(|index| &self.labels[index])
            .ok_or(ValueError::OutOfSpan {
                time: t,
                start: self.start(),
                end: self.end(),
            })
    }

    /// `(start, end)` pair for every interval
    pub fn to_intervals(&self) -> Vec<(f64, f64)> {
        self.boundaries.windows(2).map(|w| (w[0], w[1])).collect()
    }

    /// Iterate over `((start, end), label)`
    pub fn iter(&self) -> impl Iterator<Item = ((f64, f64), &L)> + '_ {
        self.boundaries
            .windows(2)
            .map(|w| (w[0], w[1]))
            .zip(self.labels.iter())
    }

    /// One-line summary, e.g. `Segment(2 segments, total_duration=2.50s)`
    pub fn summary(&self) -> String {
        format!(
            "Segment({} segments, total_duration={:.2}s)",
            self.num_segments(),
            self.duration()
        )
    }
}

impl Segment<String> {
    /// Build an unlabeled segmentation; each interval is named after its start time
    pub fn from_times(boundaries: Vec<f64>) -> Result<Self, ValidationError> {
        validate_boundaries(&boundaries)?;
        let labels = boundaries[..boundaries.len() - 1]
            .iter()
            .map(|start| format!("{start:.3}"))
            .collect();
        Ok(Self { boundaries, labels })
    }
}

impl<L> Segment<L> {
    /// Build from an unordered boundary collection, sorting and removing duplicates
    ///
    /// Labels apply to the intervals of the sorted, deduplicated boundaries.
    pub fn from_boundary_set(
        boundaries: impl IntoIterator<Item = f64>,
        labels: Vec<L>,
    ) -> Result<Self, ValidationError> {
        let mut boundaries: Vec<f64> = boundaries.into_iter().collect();
        if let Some((index, &value)) = boundaries.iter().enumerate().find(|(_, b)| !b.is_finite()) {
            return Err(ValidationError::NonFiniteBoundary { index, value });
        }
        boundaries.sort_by(f64::total_cmp);
        boundaries.dedup();
        Self::from_boundaries(boundaries, labels)
    }
}

impl<L: fmt::Display> fmt::Display for Segment<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment({} segments):", self.num_segments())?;
        for ((start, end), label) in self.iter() {
            write!(f, "\n [{start:.2}-{end:.2}s] {label}")?;
        }
        Ok(())
    }
}

/// Check the boundary invariants shared by every constructor
fn validate_boundaries(boundaries: &[f64]) -> Result<(), ValidationError> {
    if boundaries.len() < 2 {
        return Err(ValidationError::TooFewBoundaries {
            count: boundaries.len(),
        });
    }

    for (index, &value) in boundaries.iter().enumerate() {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteBoundary { index, value });
        }
        if index > 0 && value <= boundaries[index - 1] {
            return Err(ValidationError::NonIncreasingBoundaries {
                index,
                previous: boundaries[index - 1],
                current: value,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Segment<&'static str> {
        Segment::from_boundaries(vec![0.0, 1.0, 2.5, 4.0], vec!["A", "B", "C"]).unwrap()
    }

    #[test]
    fn test_basic_properties() {
        let seg = abc();
        assert_eq!(seg.start(), 0.0);
        assert_eq!(seg.end(), 4.0);
        assert_eq!(seg.duration(), 4.0);
        assert_eq!(seg.num_segments(), 3);
        assert_eq!(seg.interior_boundaries(), &[1.0, 2.5]);
        assert_eq!(seg.to_intervals(), vec![(0.0, 1.0), (1.0, 2.5), (2.5, 4.0)]);
    }

    #[test]
    fn test_rejects_too_few_boundaries() {
        let err = Segment::<&str>::from_boundaries(vec![1.0], vec![]).unwrap_err();
        assert_eq!(err, ValidationError::TooFewBoundaries { count: 1 });

        let err = Segment::<&str>::from_boundaries(vec![], vec![]).unwrap_err();
        assert_eq!(err, ValidationError::TooFewBoundaries { count: 0 });
    }

    #[test]
    fn test_rejects_duplicate_and_decreasing_boundaries() {
        let err = Segment::from_boundaries(vec![0.0, 1.0, 1.0], vec!["A", "B"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonIncreasingBoundaries {
                index: 2,
                previous: 1.0,
                current: 1.0
            }
        );

        let err = Segment::from_boundaries(vec![0.0, 2.0, 1.0], vec!["A", "B"]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonIncreasingBoundaries { index: 2, .. }
        ));
    }

    #[test]
    fn test_rejects_nan_boundary() {
        let err = Segment::from_boundaries(vec![0.0, f64::NAN], vec!["A"]).unwrap_err();
        assert!(matches!(err, ValidationError::NonFiniteBoundary { index: 1, .. }));
    }

    #[test]
    fn test_rejects_label_count_mismatch() {
        let err = Segment::from_boundaries(vec![0.0, 1.0, 2.0, 3.0], vec!["A", "B"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::LabelCountMismatch {
                labels: 2,
                boundaries: 4
            }
        );
    }

    #[test]
    fn test_label_at_half_open_semantics() {
        let seg = abc();
        assert_eq!(*seg.label_at(0.0).unwrap(), "A");
        assert_eq!(*seg.label_at(0.999).unwrap(), "A");
        assert_eq!(*seg.label_at(1.0).unwrap(), "B");
        assert_eq!(*seg.label_at(2.5).unwrap(), "C");
        assert_eq!(*seg.label_at(4.0).unwrap(), "C");
    }

    #[test]
    fn test_label_at_outside_span() {
        let seg = abc();
        assert_eq!(
            seg.label_at(-0.1).unwrap_err(),
            ValueError::OutOfSpan {
                time: -0.1,
                start: 0.0,
                end: 4.0
            }
        );
        assert!(seg.label_at(4.01).is_err());
        assert!(seg.label_at(f64::NAN).is_err());
    }

    #[test]
    fn test_from_intervals_exact() {
        let seg =
            Segment::from_intervals(&[(0.0, 1.0), (1.0, 2.5), (2.5, 3.0)], vec!["A", "B", "C"])
                .unwrap();
        assert_eq!(seg.boundaries(), &[0.0, 1.0, 2.5, 3.0]);
        assert_eq!(seg.labels(), &["A", "B", "C"]);
    }

    #[test]
    fn test_from_intervals_gap_and_overlap() {
        let err = Segment::from_intervals(&[(0.0, 1.0), (1.2, 2.0)], vec!["A", "B"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonContiguousIntervals {
                index: 0,
                end: 1.0,
                next_start: 1.2
            }
        );

        let err =
            Segment::from_intervals(&[(0.0, 1.0), (1.0, 2.0), (1.5, 3.0)], vec!["A", "B", "C"])
                .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonContiguousIntervals { index: 1, .. }
        ));
    }

    #[test]
    fn test_from_intervals_within_tolerance() {
        let seg = Segment::from_intervals_with_tolerance(
            &[(0.0, 1.0005), (1.0, 2.0)],
            vec!["A", "B"],
            0.001,
        )
        .unwrap();
        assert_eq!(seg.boundaries(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_from_intervals_empty() {
        let err = Segment::<&str>::from_intervals(&[], vec![]).unwrap_err();
        assert_eq!(err, ValidationError::EmptyIntervals);
    }

    #[test]
    fn test_from_times_generates_start_labels() {
        let seg = Segment::from_times(vec![0.0, 1.0, 2.5, 4.0]).unwrap();
        assert_eq!(seg.labels(), &["0.000", "1.000", "2.500"]);
    }

    #[test]
    fn test_from_boundary_set_sorts_and_dedups() {
        let seg = Segment::from_boundary_set([1.0, 2.0, 1.0, 3.0], vec!["x", "y"]).unwrap();
        assert_eq!(seg.boundaries(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_display_and_summary() {
        let seg = Segment::from_boundaries(vec![0.5, 1.5, 3.0], vec!["A", "B"]).unwrap();
        assert_eq!(seg.summary(), "Segment(2 segments, total_duration=2.50s)");
        assert_eq!(
            seg.to_string(),
            "Segment(2 segments):\n [0.50-1.50s] A\n [1.50-3.00s] B"
        );
    }

    #[test]
    fn test_adjacent_equal_labels_are_kept() {
        let seg = Segment::from_boundaries(vec![0.0, 1.0, 2.0], vec!["A", "A"]).unwrap();
        assert_eq!(seg.num_segments(), 2);
        assert_eq!(seg.interior_boundaries(), &[1.0]);
    }

    #[test]
    fn test_serde_goes_through_validation() {
        let seg: Segment<String> =
            serde_json::from_str(r#"{"boundaries":[0.0,1.0,2.0],"labels":["A","B"]}"#).unwrap();
        assert_eq!(seg.num_segments(), 2);

        let bad = serde_json::from_str::<Segment<String>>(
            r#"{"boundaries":[0.0,2.0,1.0],"labels":["A","B"]}"#,
        );
        assert!(bad.is_err());

        let json = serde_json::to_string(&seg).unwrap();
        assert_eq!(json, r#"{"boundaries":[0.0,1.0,2.0],"labels":["A","B"]}"#);
    }
}
