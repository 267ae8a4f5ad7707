//! Evaluation report value objects

use crate::metrics::{BoundaryMatching, LinkCounts, Score};
use serde::{Deserialize, Serialize};

/// Boundary agreement at one tolerance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryReport {
    /// Tolerance window used for matching
    pub tolerance: f64,
    /// Accepted matches
    pub matched: usize,
    /// Reference boundaries taking part
    pub reference_count: usize,
    /// Estimate boundaries taking part
    pub estimate_count: usize,
    /// Precision, recall and F-measure
    pub score: Score,
}

impl BoundaryReport {
    pub(crate) fn from_matching(tolerance: f64, matching: &BoundaryMatching) -> Self {
        Self {
            tolerance,
            matched: matching.matched(),
            reference_count: matching.reference_count,
            estimate_count: matching.estimate_count,
            score: matching.score(),
        }
    }
}

/// Label agreement with the link counts behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelReport {
    /// Linked-pair tallies
    pub links: LinkCounts,
    /// Precision, recall and F-measure over links
    pub score: Score,
}

impl From<LinkCounts> for LabelReport {
    fn from(links: LinkCounts) -> Self {
        Self {
            score: links.score(),
            links,
        }
    }
}

/// Breakdown for one hierarchy level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelReport {
    /// Layer index, coarsest is 0
    pub level: usize,
    /// Boundary agreement of this layer pair, one entry per tolerance
    pub boundaries: Vec<BoundaryReport>,
    /// Label agreement treating pairs of depth `> level` as linked
    pub labels: LabelReport,
}

/// Everything one reference/estimate comparison produced
///
/// For flat inputs `boundaries` and `labels` describe the single layer pair
/// and `levels` is empty. For hierarchies `levels` holds the per-layer
/// breakdown, each `boundaries` entry sums counts and averages scores across
/// levels, and `labels` is the aggregate hierarchical agreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    /// Frame hop used for label agreement
    pub hop: f64,
    /// Frames sampled per layer
    pub frame_count: usize,
    /// Boundary agreement, one entry per tolerance in configuration order
    pub boundaries: Vec<BoundaryReport>,
    /// Label agreement
    pub labels: Score,
    /// Link counts behind `labels`, only for flat comparisons
    pub label_links: Option<LinkCounts>,
    /// Per-level breakdown, only for hierarchical comparisons
    pub levels: Vec<LevelReport>,
}

impl MetricReport {
    /// Whether the comparison went through the hierarchical path
    pub fn is_hierarchical(&self) -> bool {
        !self.levels.is_empty()
    }

    /// Boundary report for `tolerance`, if it was evaluated
    pub fn boundary(&self, tolerance: f64) -> Option<&BoundaryReport> {
        self.boundaries.iter().find(|b| b.tolerance == tolerance)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Mean scores across many reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Reports that contributed
    pub count: usize,
    /// Mean boundary score per tolerance
    pub boundaries: Vec<(f64, Score)>,
    /// Mean label score
    pub labels: Score,
}

impl BatchSummary {
    /// Average a collection of reports
    ///
    /// Tolerances are taken from the first report; a report lacking one of
    /// them does not contribute to that tolerance's mean. Returns `None` for
    /// an empty collection.
    pub fn from_reports(reports: &[MetricReport]) -> Option<Self> {
        let first = reports.first()?;

        let boundaries = first
            .boundaries
            .iter()
            .filter_map(|entry| {
                let scores: Vec<Score> = reports
                    .iter()
                    .filter_map(|report| report.boundary(entry.tolerance))
                    .map(|b| b.score)
                    .collect();
                Score::mean(&scores).map(|mean| (entry.tolerance, mean))
            })
            .collect();

        let label_scores: Vec<Score> = reports.iter().map(|report| report.labels).collect();
        let labels = Score::mean(&label_scores)?;

        Some(Self {
            count: reports.len(),
            boundaries,
            labels,
        })
    }
}
