//! Precision / recall / F-measure triple

use serde::{Deserialize, Serialize};

/// Precision, recall and their harmonic mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Fraction of estimated items that are correct
    pub precision: f64,
    /// Fraction of reference items that are recovered
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f_measure: f64,
}

impl Score {
    /// Perfect agreement
    pub const PERFECT: Score = Score {
        precision: 1.0,
        recall: 1.0,
        f_measure: 1.0,
    };

    /// Score from raw counts
    ///
    /// `precision = hits / estimated`, `recall = hits / reference`. A zero
    /// denominator yields 0, except when both totals are zero: agreeing that
    /// there is nothing to find is perfect agreement.
    pub fn from_counts(hits: u64, estimated: u64, reference: u64) -> Self {
        if estimated == 0 && reference == 0 {
            return Self::PERFECT;
        }

        let precision = if estimated > 0 {
            hits as f64 / estimated as f64
        } else {
            0.0
        };

        let recall = if reference > 0 {
            hits as f64 / reference as f64
        } else {
            0.0
        };

        Self::from_precision_recall(precision, recall)
    }

    /// Combine precision and recall; F is 0 when both are 0
    pub fn from_precision_recall(precision: f64, recall: f64) -> Self {
        let f_measure = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            precision,
            recall,
            f_measure,
        }
    }

    /// Component-wise mean, or `None` for an empty input
    pub fn mean<'a>(scores: impl IntoIterator<Item = &'a Score>) -> Option<Score> {
        let mut count = 0usize;
        let mut sum = (0.0, 0.0, 0.0);
        for score in scores {
            count += 1;
            sum.0 += score.precision;
            sum.1 += score.recall;
            sum.2 += score.f_measure;
        }

        (count > 0).then(|| {
            let n = count as f64;
            Score {
                precision: sum.0 / n,
                recall: sum.1 / n,
                f_measure: sum.2 / n,
            }
        })
    }
}
