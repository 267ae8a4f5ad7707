//! Layered error types
//!
//! Construction failures are [`ValidationError`]s, out-of-domain queries on
//! valid objects are [`ValueError`]s, and [`EvalError`] is what the evaluator
//! and configuration layer hand back to callers.

use thiserror::Error;

/// Structural invariant violated while building a segmentation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A segmentation needs at least one interval
    #[error("at least 2 boundaries are required, got {count}")]
    TooFewBoundaries {
        /// Number of boundaries supplied
        count: usize,
    },

    /// NaN or infinite boundary time
    #[error("boundary {index} is not finite: {value}")]
    NonFiniteBoundary {
        /// Position in the boundary sequence
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Boundaries must be strictly increasing
    #[error("boundary {index} ({current}) does not exceed the previous boundary ({previous})")]
    NonIncreasingBoundaries {
        /// Position of the offending boundary
        index: usize,
        /// Boundary before it
        previous: f64,
        /// The offending boundary
        current: f64,
    },

    /// One label per interval
    #[error("number of labels ({labels}) must be one less than number of boundaries ({boundaries})")]
    LabelCountMismatch {
        /// Labels supplied
        labels: usize,
        /// Boundaries supplied
        boundaries: usize,
    },

    /// No intervals were supplied
    #[error("interval sequence is empty")]
    EmptyIntervals,

    /// Consecutive intervals leave a gap or overlap
    #[error("interval {index} ends at {end} but the next interval starts at {next_start}")]
    NonContiguousIntervals {
        /// Index of the interval whose end does not meet its successor
        index: usize,
        /// End of interval `index`
        end: f64,
        /// Start of interval `index + 1`
        next_start: f64,
    },

    /// A hierarchy needs at least one layer
    #[error("hierarchy must contain at least one layer")]
    EmptyHierarchy,

    /// A layer does not cover the same span as layer 0
    #[error("layer {layer} spans [{start}, {end}] but layer 0 spans [{expected_start}, {expected_end}]")]
    LayerSpanMismatch {
        /// Index of the offending layer
        layer: usize,
        /// Span start of layer 0
        expected_start: f64,
        /// Span end of layer 0
        expected_end: f64,
        /// Span start of the offending layer
        start: f64,
        /// Span end of the offending layer
        end: f64,
    },

    /// Hierarchies with different depths cannot be compared
    #[error("reference has {reference} layers but estimate has {estimate}")]
    LayerCountMismatch {
        /// Layers in the reference
        reference: usize,
        /// Layers in the estimate
        estimate: usize,
    },

    /// Reference and estimate must cover the same span
    #[error("reference spans [{reference_start}, {reference_end}] but estimate spans [{estimate_start}, {estimate_end}]")]
    SpanMismatch {
        /// Reference span start
        reference_start: f64,
        /// Reference span end
        reference_end: f64,
        /// Estimate span start
        estimate_start: f64,
        /// Estimate span end
        estimate_end: f64,
    },
}

/// A valid object queried with an out-of-domain argument
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// Time lies outside `[start, end]`
    #[error("time {time} is outside the segment span [{start}, {end}]")]
    OutOfSpan {
        /// Queried time
        time: f64,
        /// Span start
        start: f64,
        /// Span end
        end: f64,
    },

    /// Frame hop must be a finite positive number
    #[error("hop must be positive and finite, got {hop}")]
    NonPositiveHop {
        /// Requested hop
        hop: f64,
    },

    /// The span is shorter than a single hop
    #[error("hop {hop} produces no frames over a span of {duration}")]
    NoFrames {
        /// Requested hop
        hop: f64,
        /// Span duration
        duration: f64,
    },

    /// Matching window must be a finite non-negative number
    #[error("tolerance must be non-negative and finite, got {tolerance}")]
    InvalidTolerance {
        /// Requested tolerance
        tolerance: f64,
    },

    /// Raw boundary input to the matcher is not strictly increasing
    #[error("boundary {index} ({value}) is not finite or not strictly increasing")]
    UnsortedBoundaries {
        /// Position of the offending boundary
        index: usize,
        /// The offending value
        value: f64,
    },
}

/// Errors returned by evaluation and configuration
#[derive(Debug, Error)]
pub enum EvalError {
    /// Inputs violate a structural invariant
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An argument is out of domain
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Configuration loading or parsing error
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for evaluation operations
pub type Result<T> = std::result::Result<T, EvalError>;
