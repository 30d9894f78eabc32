use serde::{Deserialize, Serialize};

/// Tuning knobs for the tree layout.
///
/// Distances are world units. The separation fields are multipliers on
/// `node_spacing`: full siblings sit closer together than nodes from
/// different subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Base horizontal distance between adjacent nodes.
    pub node_spacing: f64,
    /// Vertical distance between generations.
    pub level_separation: f64,
    /// Multiplier between nodes sharing a tree parent.
    pub sibling_separation: f64,
    /// Multiplier between nodes from different subtrees.
    pub subtree_separation: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_spacing: 280.0,
            level_separation: 350.0,
            sibling_separation: 1.4,
            subtree_separation: 2.0,
        }
    }
}

impl LayoutConfig {
    /// Horizontal gap between two adjacent placements.
    #[must_use]
    pub fn gap(&self, same_parent: bool) -> f64 {
        let multiplier = if same_parent {
            self.sibling_separation
        } else {
            self.subtree_separation
        };
        self.node_spacing * multiplier
    }
}
