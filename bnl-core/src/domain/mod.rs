//! Segmentation data model
//!
//! [`Segment`] is a flat labeled partition of a span, [`Hierarchy`] stacks
//! segments that share that span, and [`FrameGrid`] discretises either for
//! label-agreement scoring. All of them are immutable once built.

pub mod frames;
pub mod hierarchy;
pub mod segment;

pub use frames::FrameGrid;
pub use hierarchy::{Hierarchy, SPAN_EPSILON};
pub use segment::Segment;

/// Anything the evaluator can score: a single segmentation or a hierarchy
pub trait Annotation<L> {
    /// Layers, coarsest first; a flat segmentation is its own single layer
    fn layers(&self) -> &[Segment<L>];

    /// Whether this annotation should be scored with the hierarchical path
    fn is_hierarchical(&self) -> bool;

    /// Shared span start
    fn start(&self) -> f64 {
        self.layers()[0].start()
    }

    /// Shared span end
    fn end(&self) -> f64 {
        self.layers()[0].end()
    }
}

impl<L> Annotation<L> for Segment<L> {
    fn layers(&self) -> &[Segment<L>] {
        std::slice::from_ref(self)
    }

    fn is_hierarchical(&self) -> bool {
        false
    }
}

impl<L> Annotation<L> for Hierarchy<L> {
    fn layers(&self) -> &[Segment<L>] {
        Hierarchy::layers(self)
    }

    fn is_hierarchical(&self) -> bool {
        true
    }
}
