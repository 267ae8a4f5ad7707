//! Hierarchical time-aligned segmentation and its evaluation
//!
//! A [`Segment`] partitions a time span into contiguous labeled intervals; a
//! [`Hierarchy`] stacks several segments over the same span, coarsest first.
//! An estimate is scored against a reference in two independent ways:
//!
//! - **Boundary agreement**: greedy one-to-one matching of boundary times
//!   within a tolerance window ([`BoundaryMatcher`]).
//! - **Label agreement**: how often pairs of frames that share a label in one
//!   annotation also share it in the other, flat or per hierarchy depth
//!   ([`LabelAgreementScorer`]).
//!
//! # Architecture
//!
//! - **Domain layer**: validated segmentations and frame expansion
//! - **Metrics layer**: matching and counting algorithms, free of configuration
//! - **Evaluator**: configuration-driven orchestration and reports
//!
//! # Example
//!
//! ```rust
//! use bnl_core::{Evaluator, Segment};
//!
//! let reference = Segment::from_boundaries(
//!     vec![0.0, 2.5, 5.0, 7.5, 10.0],
//!     vec!["A", "B", "A", "C"],
//! ).unwrap();
//! let estimate = Segment::from_boundaries(
//!     vec![0.0, 2.6, 5.0, 7.4, 10.0],
//!     vec!["A", "B", "A", "C"],
//! ).unwrap();
//!
//! let report = Evaluator::new().evaluate(&reference, &estimate).unwrap();
//! assert_eq!(report.boundaries[0].matched, 3);
//! assert_eq!(report.frame_count, 100);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod domain;
pub mod error;
pub mod evaluator;
pub mod metrics;

pub use config::{EvaluationConfig, EvaluationConfigBuilder};
pub use domain::{Annotation, FrameGrid, Hierarchy, Segment, SPAN_EPSILON};
pub use error::{EvalError, Result, ValidationError, ValueError};
pub use evaluator::{
    evaluate, BatchSummary, BoundaryReport, Evaluator, LabelReport, LevelReport, MetricReport,
};
pub use metrics::{
    match_boundaries, BoundaryMatcher, BoundaryMatching, HierarchicalAgreement,
    LabelAgreementScorer, LinkCounts, Score,
};
