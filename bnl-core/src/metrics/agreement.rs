//! Pairwise frame-label agreement
//!
//! Two frames are *linked* in a labeling when they carry the same label.
//! Precision is the fraction of estimate links also present in the reference,
//! recall the fraction of reference links also present in the estimate.
//!
//! Links are never enumerated. The number of linked pairs in a labeling is
//! `sum over labels of C(count, 2)`, and the number of pairs linked in both
//! is the same sum over joint `(reference, estimate)` labels. Hierarchies
//! reuse this by relabeling every frame with the id of its label prefix down
//! to each depth: frames share a prefix id at depth `d` exactly when they
//! agree on layers `0..d`.

use super::score::Score;
use crate::domain::hierarchy::same_span;
use crate::domain::{FrameGrid, Hierarchy, Segment};
use crate::error::{Result, ValidationError, ValueError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Linked-pair tallies for one comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCounts {
    /// Pairs linked in the reference
    pub reference: u64,
    /// Pairs linked in the estimate
    pub estimate: u64,
    /// Pairs linked in both
    pub shared: u64,
}

impl LinkCounts {
    /// Precision, recall and F-measure over links
    pub fn score(&self) -> Score {
        Score::from_counts(self.shared, self.estimate, self.reference)
    }
}

/// Result of comparing two hierarchies
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchicalAgreement {
    /// Link counts at depth thresholds `1..=k`; entry `d - 1` treats pairs of
    /// depth `>= d` as linked
    pub thresholds: Vec<LinkCounts>,
}

impl HierarchicalAgreement {
    /// Score at every threshold
    pub fn threshold_scores(&self) -> Vec<Score> {
        self.thresholds.iter().map(LinkCounts::score).collect()
    }

    /// Mean precision and recall over thresholds, combined by harmonic mean
    pub fn aggregate(&self) -> Score {
        let scores = self.threshold_scores();
        match Score::mean(&scores) {
            Some(mean) => Score::from_precision_recall(mean.precision, mean.recall),
            None => Score::PERFECT,
        }
    }
}

/// Frame-label agreement scorer at a fixed hop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAgreementScorer {
    hop: f64,
}

impl LabelAgreementScorer {
    /// Create a scorer sampling every `hop`
    pub fn new(hop: f64) -> std::result::Result<Self, ValueError> {
        if !(hop.is_finite() && hop > 0.0) {
            return Err(ValueError::NonPositiveHop { hop });
        }
        Ok(Self { hop })
    }

    /// Frame spacing
    pub fn hop(&self) -> f64 {
        self.hop
    }

    /// Agreement between two flat segmentations over the same span
    pub fn pairwise<L: Eq + Hash>(
        &self,
        reference: &Segment<L>,
        estimate: &Segment<L>,
    ) -> Result<LinkCounts> {
        let grid = self.grid(reference, estimate)?;
        Ok(pairwise_counts(&grid.sample(reference), &grid.sample(estimate)))
    }

    /// Agreement between two hierarchies with equal depth and span
    pub fn hierarchical<L: Eq + Hash>(
        &self,
        reference: &Hierarchy<L>,
        estimate: &Hierarchy<L>,
    ) -> Result<HierarchicalAgreement> {
        self.hierarchical_layers(reference.layers(), estimate.layers())
    }

    /// [`hierarchical`](Self::hierarchical) over raw layer stacks
    pub fn hierarchical_layers<L: Eq + Hash>(
        &self,
        reference: &[Segment<L>],
        estimate: &[Segment<L>],
    ) -> Result<HierarchicalAgreement> {
        if reference.len() != estimate.len() {
            return Err(ValidationError::LayerCountMismatch {
                reference: reference.len(),
                estimate: estimate.len(),
            }
            .into());
        }
        let (Some(ref_top), Some(est_top)) = (reference.first(), estimate.first()) else {
            return Err(ValidationError::EmptyHierarchy.into());
        };

        let grid = self.grid(ref_top, est_top)?;
        let reference_frames = sample_layers(&grid, reference);
        let estimate_frames = sample_layers(&grid, estimate);

        Ok(hierarchical_counts(&reference_frames, &estimate_frames))
    }

    fn grid<L>(&self, reference: &Segment<L>, estimate: &Segment<L>) -> Result<FrameGrid> {
        let reference_span = (reference.start(), reference.end());
        let estimate_span = (estimate.start(), estimate.end());
        if !same_span(reference_span, estimate_span) {
            return Err(ValidationError::SpanMismatch {
                reference_start: reference_span.0,
                reference_end: reference_span.1,
                estimate_start: estimate_span.0,
                estimate_end: estimate_span.1,
            }
            .into());
        }
        Ok(FrameGrid::new(reference_span.0, reference_span.1, self.hop)?)
    }
}

fn sample_layers<'a, L>(grid: &FrameGrid, layers: &'a [Segment<L>]) -> Vec<Vec<&'a L>> {
    layers.iter().map(|layer| grid.sample(layer)).collect()
}

/// `C(n, 2)` summed over the multiplicity of every key
fn linked_pairs<K: Eq + Hash>(keys: impl IntoIterator<Item = K>) -> u64 {
    let mut tally: HashMap<K, u64> = HashMap::new();
    for key in keys {
        *tally.entry(key).or_insert(0) += 1;
    }
    tally.values().map(|&n| n * n.saturating_sub(1) / 2).sum()
}

/// Link counts for two equal-length frame labelings
///
/// # Panics
///
/// Panics if the sequences differ in length.
pub fn pairwise_counts<T: Eq + Hash>(reference: &[T], estimate: &[T]) -> LinkCounts {
    assert_eq!(
        reference.len(),
        estimate.len(),
        "frame sequences must have equal length"
    );
    LinkCounts {
        reference: linked_pairs(reference),
        estimate: linked_pairs(estimate),
        shared: linked_pairs(reference.iter().zip(estimate)),
    }
}

/// Dense prefix ids: `ids[d][i]` identifies frame `i`'s labels on layers `0..=d`
fn prefix_ids<L: Eq + Hash>(layers: &[Vec<&L>]) -> Vec<Vec<usize>> {
    let mut ids: Vec<Vec<usize>> = Vec::with_capacity(layers.len());
    for (depth, labels) in layers.iter().enumerate() {
        let mut dictionary: HashMap<(usize, &L), usize> = HashMap::new();
        let row = labels
            .iter()
            .enumerate()
            .map(|(frame, &label)| {
                let parent = if depth == 0 { 0 } else { ids[depth - 1][frame] };
                let next = dictionary.len();
                *dictionary.entry((parent, label)).or_insert(next)
            })
            .collect();
        ids.push(row);
    }
    ids
}

/// Per-threshold link counts for two equal-shape layer stacks of frame labels
///
/// # Panics
///
/// Panics if the stacks differ in depth or frame count.
pub fn hierarchical_counts<L: Eq + Hash>(
    reference: &[Vec<&L>],
    estimate: &[Vec<&L>],
) -> HierarchicalAgreement {
    assert_eq!(reference.len(), estimate.len(), "layer counts must match");
    let reference_ids = prefix_ids(reference);
    let estimate_ids = prefix_ids(estimate);

    let thresholds = reference_ids
        .iter()
        .zip(&estimate_ids)
        .map(|(r, e)| pairwise_counts(r, e))
        .collect();

    HierarchicalAgreement { thresholds }
}

/// Reference implementation of [`pairwise_counts`] by explicit pair enumeration
pub fn pairwise_brute_force<T: Eq>(reference: &[T], estimate: &[T]) -> LinkCounts {
    assert_eq!(reference.len(), estimate.len());
    let mut counts = LinkCounts::default();
    for i in 0..reference.len() {
        for j in (i + 1)..reference.len() {
            let in_reference = reference[i] == reference[j];
            let in_estimate = estimate[i] == estimate[j];
            counts.reference += u64::from(in_reference);
            counts.estimate += u64::from(in_estimate);
            counts.shared += u64::from(in_reference && in_estimate);
        }
    }
    counts
}

/// Number of leading layers on which frames `i` and `j` share a label
pub fn pair_depth<T: Eq>(layers: &[Vec<T>], i: usize, j: usize) -> usize {
    layers
        .iter()
        .take_while(|labels| labels[i] == labels[j])
        .count()
}

/// Reference implementation of [`hierarchical_counts`] by depth enumeration
pub fn hierarchical_brute_force<T: Eq>(
    reference: &[Vec<T>],
    estimate: &[Vec<T>],
) -> HierarchicalAgreement {
    assert_eq!(reference.len(), estimate.len());
    let depth = reference.len();
    let frames = reference.first().map_or(0, Vec::len);
    let mut thresholds = vec![LinkCounts::default(); depth];

    for i in 0..frames {
        for j in (i + 1)..frames {
            let ref_depth = pair_depth(reference, i, j);
            let est_depth = pair_depth(estimate, i, j);
            for (index, counts) in thresholds.iter_mut().enumerate() {
                let threshold = index + 1;
                counts.reference += u64::from(ref_depth >= threshold);
                counts.estimate += u64::from(est_depth >= threshold);
                counts.shared += u64::from(ref_depth >= threshold && est_depth >= threshold);
            }
        }
    }

    HierarchicalAgreement { thresholds }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(boundaries: &[f64], labels: &[&'static str]) -> Segment<&'static str> {
        Segment::from_boundaries(boundaries.to_vec(), labels.to_vec()).unwrap()
    }

    #[test]
    fn test_linked_pairs() {
        assert_eq!(linked_pairs(["a", "a", "b", "a"]), 3);
        assert_eq!(linked_pairs(["a"]), 0);
        assert_eq!(linked_pairs(Vec::<&str>::new()), 0);
    }

    #[test]
    fn test_pairwise_counts_small() {
        let reference = ["A", "A", "B", "B"];
        let estimate = ["x", "x", "x", "y"];
        let counts = pairwise_counts(&reference, &estimate);
        assert_eq!(
            counts,
            LinkCounts {
                reference: 2,
                estimate: 3,
                shared: 1
            }
        );
        assert_eq!(counts, pairwise_brute_force(&reference, &estimate));
    }

    #[test]
    fn test_label_names_do_not_matter() {
        let reference = ["A", "B", "A", "C"];
        let estimate = ["q", "r", "q", "s"];
        assert_eq!(
            pairwise_counts(&reference, &estimate).score(),
            Score::PERFECT
        );
    }

    #[test]
    fn test_identical_segments_score_perfectly() {
        let scorer = LabelAgreementScorer::new(0.5).unwrap();
        let s = seg(&[0.0, 2.5, 5.0, 7.5, 10.0], &["A", "B", "A", "C"]);
        let counts = scorer.pairwise(&s, &s).unwrap();
        assert_eq!(counts.score(), Score::PERFECT);
    }

    #[test]
    fn test_all_distinct_frames_is_perfect_by_convention() {
        let counts = pairwise_counts(&["a", "b", "c"], &["x", "y", "z"]);
        assert_eq!(counts, LinkCounts::default());
        assert_eq!(counts.score(), Score::PERFECT);
    }

    #[test]
    fn test_pairwise_span_mismatch() {
        let scorer = LabelAgreementScorer::new(0.5).unwrap();
        let a = seg(&[0.0, 10.0], &["A"]);
        let b = seg(&[0.0, 9.0], &["A"]);
        let err = scorer.pairwise(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            crate::EvalError::Validation(ValidationError::SpanMismatch { .. })
        ));
    }

    #[test]
    fn test_pairwise_no_frames() {
        let scorer = LabelAgreementScorer::new(5.0).unwrap();
        let a = seg(&[0.0, 1.0], &["A"]);
        let err = scorer.pairwise(&a, &a).unwrap_err();
        assert!(matches!(err, crate::EvalError::Value(ValueError::NoFrames { .. })));
    }

    #[test]
    fn test_scorer_rejects_non_positive_hop() {
        assert_eq!(
            LabelAgreementScorer::new(0.0).unwrap_err(),
            ValueError::NonPositiveHop { hop: 0.0 }
        );
    }

    #[test]
    fn test_pair_depth() {
        let layers = vec![vec!["A", "A", "B"], vec!["a", "b", "c"]];
        assert_eq!(pair_depth(&layers, 0, 1), 1);
        assert_eq!(pair_depth(&layers, 0, 2), 0);
        assert_eq!(pair_depth(&layers, 1, 1), 2);
    }

    #[test]
    fn test_prefix_ids_distinguish_repeated_fine_labels() {
        // "a" appears under both A and B; the prefix id must keep them apart
        let coarse = ["A", "A", "B", "B"];
        let fine = ["a", "b", "a", "b"];
        let layers = vec![coarse.iter().collect::<Vec<_>>(), fine.iter().collect()];
        let ids = prefix_ids(&layers);
        assert_ne!(ids[1][0], ids[1][2]);
        assert_eq!(ids[0][0], ids[0][1]);
    }

    #[test]
    fn test_hierarchical_matches_brute_force() {
        let reference = vec![
            vec!["A", "A", "A", "B", "B", "B"],
            vec!["a", "b", "a", "c", "c", "d"],
        ];
        let estimate = vec![
            vec!["X", "X", "Y", "Y", "Y", "Y"],
            vec!["p", "p", "q", "r", "q", "r"],
        ];
        fn as_refs<'a>(layers: &'a [Vec<&'static str>]) -> Vec<Vec<&'a &'static str>> {
            layers.iter().map(|l| l.iter().collect()).collect()
        }
        let fast = hierarchical_counts(&as_refs(&reference), &as_refs(&estimate));
        let slow = hierarchical_brute_force(&reference, &estimate);
        assert_eq!(fast, slow);
        assert_eq!(fast.thresholds.len(), 2);
    }

    #[test]
    fn test_hierarchical_identity_is_perfect() {
        let scorer = LabelAgreementScorer::new(0.25).unwrap();
        let h = Hierarchy::from_layers(vec![
            seg(&[0.0, 1.0, 2.0], &["A", "B"]),
            seg(&[0.0, 0.5, 1.0, 1.5, 2.0], &["a", "b", "a", "b"]),
        ])
        .unwrap();
        let agreement = scorer.hierarchical(&h, &h).unwrap();
        assert!(agreement
            .threshold_scores()
            .iter()
            .all(|score| *score == Score::PERFECT));
        assert_eq!(agreement.aggregate(), Score::PERFECT);
    }

    #[test]
    fn test_hierarchical_rejects_layer_count_mismatch() {
        let scorer = LabelAgreementScorer::new(0.5).unwrap();
        let one = Hierarchy::from_layers(vec![seg(&[0.0, 2.0], &["A"])]).unwrap();
        let two = Hierarchy::from_layers(vec![seg(&[0.0, 2.0], &["A"]), seg(&[0.0, 2.0], &["a"])])
            .unwrap();
        let err = scorer.hierarchical(&one, &two).unwrap_err();
        assert!(matches!(
            err,
            crate::EvalError::Validation(ValidationError::LayerCountMismatch {
                reference: 1,
                estimate: 2
            })
        ));
    }

    #[test]
    fn test_single_layer_hierarchy_equals_flat() {
        let scorer = LabelAgreementScorer::new(0.5).unwrap();
        let a = seg(&[0.0, 1.0, 3.0, 4.0], &["A", "B", "A"]);
        let b = seg(&[0.0, 2.0, 4.0], &["x", "y"]);
        let flat = scorer.pairwise(&a, &b).unwrap();
        let nested = scorer
            .hierarchical_layers(std::slice::from_ref(&a), std::slice::from_ref(&b))
            .unwrap();
        assert_eq!(nested.thresholds, vec![flat]);
    }
}
