//! stemma-layout: the hierarchy layout builder.
//!
//! Converts an arbitrary two-parent-plus-spouse person graph into a
//! renderable single-root tree with positional coordinates, plus the
//! auxiliary edges (secondary parent, spousal) the tree structure cannot
//! natively express.
//!
//! The builder is a pure function of the full [`PersonSet`] — callers
//! recompute it on every graph mutation. Cost is proportional to graph
//! size, so it stays safe to run on a high-frequency edit stream.
//!
//! [`PersonSet`]: stemma_core::PersonSet

pub mod builder;
pub mod config;
pub mod geometry;

pub use builder::{LayoutError, build_layout, primary_parent};
pub use config::LayoutConfig;
pub use geometry::{EdgeKind, LayoutEdge, Point, PositionedNode, TreeLayout};
