//! Reference vs. estimate evaluation
//!
//! The [`Evaluator`] checks that both annotations cover the same span, runs
//! the boundary matcher once per configured tolerance and layer pair, and
//! scores label agreement once (it does not depend on the tolerance).

pub mod report;

pub use report::{BatchSummary, BoundaryReport, LabelReport, LevelReport, MetricReport};

use crate::config::EvaluationConfig;
use crate::domain::hierarchy::same_span;
use crate::domain::{Annotation, FrameGrid, Segment};
use crate::error::{Result, ValidationError};
use crate::metrics::{BoundaryMatcher, LabelAgreementScorer, Score};
use log::{debug, trace};
use std::hash::Hash;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scores estimates against references with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluationConfig,
}

impl Evaluator {
    /// Evaluator with default tolerances, hop and trimming
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluator with a validated configuration
    pub fn with_config(config: EvaluationConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Compare `estimate` against `reference`
    ///
    /// Two flat segmentations are scored with pairwise label agreement. If
    /// either side is a hierarchy, both must have the same number of layers
    /// and are scored level by level plus hierarchical label agreement.
    pub fn evaluate<L, R, E>(&self, reference: &R, estimate: &E) -> Result<MetricReport>
    where
        L: Eq + Hash,
        R: Annotation<L> + ?Sized,
        E: Annotation<L> + ?Sized,
    {
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

        let matchers = self
            .config
            .tolerances
            .iter()
            .map(|&t| BoundaryMatcher::new(t))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let scorer = LabelAgreementScorer::new(self.config.hop)?;
        let grid = FrameGrid::new(reference_span.0, reference_span.1, scorer.hop())?;
        let frame_count = grid.len();

        debug!(
            "evaluating span [{}, {}]: {} tolerances, hop {}, {} frames",
            reference_span.0,
            reference_span.1,
            matchers.len(),
            scorer.hop(),
            frame_count
        );

        if reference.is_hierarchical() || estimate.is_hierarchical() {
            self.evaluate_layers(
                &matchers,
                &scorer,
                reference.layers(),
                estimate.layers(),
                frame_count,
            )
        } else {
            self.evaluate_flat(
                &matchers,
                &scorer,
                &reference.layers()[0],
                &estimate.layers()[0],
                frame_count,
            )
        }
    }

    /// Evaluate many independent pairs; output order follows input order
    ///
    /// Runs on the rayon pool when the `parallel` feature is enabled.
    pub fn evaluate_batch<L, A>(&self, pairs: &[(A, A)]) -> Vec<Result<MetricReport>>
    where
        L: Eq + Hash + Sync,
        A: Annotation<L> + Sync,
    {
        debug!("evaluating batch of {} pairs", pairs.len());

        #[cfg(feature = "parallel")]
        let results = pairs
            .par_iter()
            .map(|(reference, estimate)| self.evaluate(reference, estimate))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results = pairs
            .iter()
            .map(|(reference, estimate)| self.evaluate(reference, estimate))
            .collect();

        results
    }

    fn boundary_reports<L>(
        &self,
        matchers: &[BoundaryMatcher],
        reference: &Segment<L>,
        estimate: &Segment<L>,
    ) -> Vec<BoundaryReport> {
        matchers
            .iter()
            .map(|matcher| {
                let matching = matcher.compare(reference, estimate, self.config.trim_endpoints);
                trace!(
                    "tolerance {}: matched {} of {} reference / {} estimate",
                    matcher.window(),
                    matching.matched(),
                    matching.reference_count,
                    matching.estimate_count
                );
                BoundaryReport::from_matching(matcher.window(), &matching)
            })
            .collect()
    }

    fn evaluate_flat<L: Eq + Hash>(
        &self,
        matchers: &[BoundaryMatcher],
        scorer: &LabelAgreementScorer,
        reference: &Segment<L>,
        estimate: &Segment<L>,
        frame_count: usize,
    ) -> Result<MetricReport> {
        let boundaries = self.boundary_reports(matchers, reference, estimate);
        let links = scorer.pairwise(reference, estimate)?;

        Ok(MetricReport {
            hop: scorer.hop(),
            frame_count,
            boundaries,
            labels: links.score(),
            label_links: Some(links),
            levels: Vec::new(),
        })
    }

    fn evaluate_layers<L: Eq + Hash>(
        &self,
        matchers: &[BoundaryMatcher],
        scorer: &LabelAgreementScorer,
        reference: &[Segment<L>],
        estimate: &[Segment<L>],
        frame_count: usize,
    ) -> Result<MetricReport> {
        // Checks layer counts before any per-level work
        let agreement = scorer.hierarchical_layers(reference, estimate)?;

        let levels: Vec<LevelReport> = reference
            .iter()
            .zip(estimate)
            .zip(&agreement.thresholds)
            .enumerate()
            .map(|(level, ((r, e), &links))| LevelReport {
                level,
                boundaries: self.boundary_reports(matchers, r, e),
                labels: links.into(),
            })
            .collect();

        let boundaries = matchers
            .iter()
            .enumerate()
            .map(|(index, matcher)| summarize_level_boundaries(matcher.window(), &levels, index))
            .collect();

        Ok(MetricReport {
            hop: scorer.hop(),
            frame_count,
            boundaries,
            labels: agreement.aggregate(),
            label_links: None,
            levels,
        })
    }
}

/// Sum counts and average scores of tolerance `index` across levels
fn summarize_level_boundaries(
    tolerance: f64,
    levels: &[LevelReport],
    index: usize,
) -> BoundaryReport {
    let entries: Vec<&BoundaryReport> = levels
        .iter()
        .map(|level| &level.boundaries[index])
        .collect();
    let scores: Vec<Score> = entries.iter().map(|entry| entry.score).collect();

    BoundaryReport {
        tolerance,
        matched: entries.iter().map(|entry| entry.matched).sum(),
        reference_count: entries.iter().map(|entry| entry.reference_count).sum(),
        estimate_count: entries.iter().map(|entry| entry.estimate_count).sum(),
        score: Score::mean(&scores).unwrap_or(Score::PERFECT),
    }
}

/// Evaluate with explicit tolerances and hop, trimming span endpoints
pub fn evaluate<L, R, E>(
    reference: &R,
    estimate: &E,
    tolerances: &[f64],
    hop: f64,
) -> Result<MetricReport>
where
    L: Eq + Hash,
    R: Annotation<L> + ?Sized,
    E: Annotation<L> + ?Sized,
{
    let config = EvaluationConfig::builder()
        .tolerances(tolerances.to_vec())
        .hop(hop)
        .build()?;
    Evaluator::with_config(config).evaluate(reference, estimate)
}
