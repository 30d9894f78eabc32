//! Layout output types: positioned nodes, auxiliary edges, and the
//! coordinate lookup handed to downstream renderers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stemma_core::PersonId;

/// A point in abstract layout space (world units, not pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One person placed in the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: PersonId,
    pub x: f64,
    pub y: f64,
    /// Generational depth below the synthetic root (roots are 0).
    pub depth: usize,
}

impl PositionedNode {
    #[must_use]
    pub const fn point(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
}

/// The three edge families a rendered tree carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// A real parent-child link that the structural tree expresses.
    Primary,
    /// The non-primary parent link, drawn outside the tree structure.
    Secondary,
    /// A spouse pair, drawn once per unordered pair.
    Spousal,
}

/// A drawable edge between two positioned people.
///
/// Carries both the ids (for hit-testing and styling) and the resolved
/// endpoint coordinates, so renderers need no further lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub kind: EdgeKind,
    pub from: PersonId,
    pub to: PersonId,
    pub source: Point,
    pub target: Point,
}

/// Complete layout result: nodes, edges, and the id → coordinate lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeLayout {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<LayoutEdge>,
    pub positions: HashMap<PersonId, Point>,
}

impl TreeLayout {
    /// Edges of one kind, in emission order.
    pub fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = &LayoutEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    #[must_use]
    pub fn position_of(&self, id: &PersonId) -> Option<Point> {
        self.positions.get(id).copied()
    }
}
