//! Agreement metrics between a reference and an estimate
//!
//! - [`boundary`]: greedy one-to-one boundary matching under a tolerance window
//! - [`agreement`]: pairwise frame-label agreement, flat and hierarchical

pub mod agreement;
pub mod boundary;
pub mod score;

pub use agreement::{HierarchicalAgreement, LabelAgreementScorer, LinkCounts};
pub use boundary::{match_boundaries, BoundaryMatcher, BoundaryMatching};
pub use score::Score;
