//! The layout algorithm: synthetic root, primary-parent tree, coordinate
//! assignment, and auxiliary edge reconstruction.
//!
//! # Overview
//!
//! A two-parent-plus-spouse graph does not fit a tree, so the builder
//! works in stages:
//!
//! 1. Pick one **primary parent** per person — slot A, else slot B, else
//!    the spouse's primary parent (the *spousal alignment heuristic*,
//!    which keeps a parentless spouse at their partner's generational
//!    depth instead of dropping to the root). Unresolvable references
//!    count as absent.
//! 2. Hang everyone without a primary parent off one synthetic root and
//!    lay the tree out: depth-proportional vertical coordinates, and
//!    horizontal coordinates from a post-order walk — leaves advance a
//!    cursor (siblings packed tighter than unrelated neighbors), interior
//!    nodes center over their children.
//! 3. Reconstruct what the tree cannot express: the non-primary parent
//!    edge for two-parent people, and one spousal edge per unordered
//!    pair. An edge is emitted only when both endpoints resolved to a
//!    coordinate — stale references degrade to an omitted edge.
//!
//! A parent chain that never reaches the root (a cycle from corrupted
//! data) fails fast with [`LayoutError::CyclicParentChain`] rather than
//! looping; callers fall back to rendering nothing.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use thiserror::Error;
use tracing::debug;

use stemma_core::{Person, PersonId, PersonSet};

use crate::config::LayoutConfig;
use crate::geometry::{EdgeKind, LayoutEdge, Point, PositionedNode, TreeLayout};

/// Structural failures detected during tree construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// At least one parent chain loops instead of reaching the root.
    #[error(
        "parent chain through '{id}' never reaches the root ({affected} people affected)"
    )]
    CyclicParentChain { id: PersonId, affected: usize },
}

/// Build the full layout for a person set.
///
/// Pure function of its inputs; call it again after every mutation.
///
/// # Errors
///
/// Returns [`LayoutError::CyclicParentChain`] when the primary-parent
/// graph contains a cycle.
pub fn build_layout(set: &PersonSet, config: &LayoutConfig) -> Result<TreeLayout, LayoutError> {
    if set.is_empty() {
        return Ok(TreeLayout::default());
    }

    // Stage 1: primary parent per person, id-ordered for determinism.
    let primary: BTreeMap<PersonId, Option<PersonId>> = set
        .iter()
        .map(|person| (person.id.clone(), primary_parent(set, person)))
        .collect();

    // Stage 2: child lists under each primary parent; parentless people
    // hang off the synthetic root.
    let mut roots: Vec<PersonId> = Vec::new();
    let mut children: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
    for (id, parent) in &primary {
        match parent {
            Some(parent_id) => children
                .entry(parent_id.clone())
                .or_default()
                .push(id.clone()),
            None => roots.push(id.clone()),
        }
    }

    let mut walker = Walker {
        children: &children,
        config,
        cursor: 0.0,
        prev_leaf_parent: None,
        placed: Vec::new(),
    };
    for root in &roots {
        walker.place(root, 0, None);
    }

    // Every node must be reachable from the synthetic root; leftovers sit
    // on a cycle.
    if walker.placed.len() != set.len() {
        let affected = set.len() - walker.placed.len();
        let placed_ids: BTreeSet<&PersonId> = walker.placed.iter().map(|n| &n.id).collect();
        let id = set
            .ids()
            .into_iter()
            .find(|id| !placed_ids.contains(id))
            .unwrap_or_else(|| PersonId::new("unknown"));
        return Err(LayoutError::CyclicParentChain { id, affected });
    }

    let nodes = walker.placed;
    let positions: HashMap<PersonId, Point> = nodes
        .iter()
        .map(|n| (n.id.clone(), n.point()))
        .collect();

    // Stage 3: edges, subject to the both-endpoints-resolve rule.
    let mut edges = Vec::new();
    collect_primary_edges(set, &primary, &positions, &mut edges);
    collect_secondary_edges(set, &primary, &positions, &mut edges);
    collect_spousal_edges(set, &positions, &mut edges);

    debug!(
        people = nodes.len(),
        edges = edges.len(),
        roots = roots.len(),
        "layout built"
    );

    Ok(TreeLayout {
        nodes,
        edges,
        positions,
    })
}

/// The parent reference a person hangs from in the structural tree.
///
/// Slot A, else slot B, else the spouse's direct parent. References to
/// ids absent from the set resolve to nothing. Borrowing never makes a
/// person their own tree parent: someone married to their own child
/// stays a root instead.
#[must_use]
pub fn primary_parent(set: &PersonSet, person: &Person) -> Option<PersonId> {
    if let Some(parent) = direct_parent(set, person) {
        return Some(parent.clone());
    }

    let spouse_id = person.spouse.as_ref().filter(|id| set.contains(id))?;
    let spouse = set.get(spouse_id)?;
    direct_parent(set, spouse)
        .filter(|parent| **parent != person.id)
        .cloned()
}

/// Slot A else slot B, ignoring unresolvable references.
fn direct_parent<'a>(set: &PersonSet, person: &'a Person) -> Option<&'a PersonId> {
    person
        .parent_a
        .as_ref()
        .filter(|id| set.contains(id))
        .or_else(|| person.parent_b.as_ref().filter(|id| set.contains(id)))
}

/// Post-order placement walk.
///
/// Leaves advance the cursor (gap depends on whether the previous leaf
/// shared a tree parent); interior nodes center over their children.
struct Walker<'a> {
    children: &'a HashMap<PersonId, Vec<PersonId>>,
    config: &'a LayoutConfig,
    cursor: f64,
    /// Tree parent of the previously placed leaf; `None` until the first
    /// leaf lands. The outer `Option` distinguishes "no leaf yet" from
    /// "leaf under the synthetic root".
    prev_leaf_parent: Option<Option<PersonId>>,
    placed: Vec<PositionedNode>,
}

impl Walker<'_> {
    fn place(&mut self, id: &PersonId, depth: usize, parent: Option<&PersonId>) -> f64 {
        let y = depth as f64 * self.config.level_separation;

        let child_ids = self.children.get(id).cloned().unwrap_or_default();
        let x = if child_ids.is_empty() {
            if let Some(prev_parent) = self.prev_leaf_parent.take() {
                let same_parent = prev_parent.as_ref() == parent;
                self.cursor += self.config.gap(same_parent);
            }
            self.prev_leaf_parent = Some(parent.cloned());
            self.cursor
        } else {
            let mut first = f64::MAX;
            let mut last = f64::MIN;
            for child in &child_ids {
                let child_x = self.place(child, depth + 1, Some(id));
                first = first.min(child_x);
                last = last.max(child_x);
            }
            f64::midpoint(first, last)
        };

        self.placed.push(PositionedNode {
            id: id.clone(),
            x,
            y,
            depth,
        });
        x
    }
}

/// Tree edges backed by a *real* parent link.
///
/// A spousal-borrowed placement positions the person but draws no primary
/// edge — the tree link exists for layout only.
fn collect_primary_edges(
    set: &PersonSet,
    primary: &BTreeMap<PersonId, Option<PersonId>>,
    positions: &HashMap<PersonId, Point>,
    edges: &mut Vec<LayoutEdge>,
) {
    for person in set.iter() {
        let Some(Some(parent_id)) = primary.get(&person.id) else {
            continue;
        };
        if !person.has_parent(parent_id) {
            continue;
        }
        push_edge(
            edges,
            positions,
            EdgeKind::Primary,
            parent_id.clone(),
            person.id.clone(),
        );
    }
}

/// The non-primary parent link for every two-parent person.
fn collect_secondary_edges(
    set: &PersonSet,
    primary: &BTreeMap<PersonId, Option<PersonId>>,
    positions: &HashMap<PersonId, Point>,
    edges: &mut Vec<LayoutEdge>,
) {
    for person in set.iter() {
        let (Some(slot_a), Some(slot_b)) = (&person.parent_a, &person.parent_b) else {
            continue;
        };
        let secondary = match primary.get(&person.id) {
            Some(Some(primary_id)) if primary_id == slot_a => slot_b,
            Some(Some(primary_id)) if primary_id == slot_b => slot_a,
            // Neither slot resolved as primary (both dangle, or the
            // placement was spousal-borrowed): nothing to draw.
            _ => continue,
        };
        push_edge(
            edges,
            positions,
            EdgeKind::Secondary,
            secondary.clone(),
            person.id.clone(),
        );
    }
}

/// One spousal edge per unordered pair, deduplicated.
fn collect_spousal_edges(
    set: &PersonSet,
    positions: &HashMap<PersonId, Point>,
    edges: &mut Vec<LayoutEdge>,
) {
    let mut seen: BTreeSet<(PersonId, PersonId)> = BTreeSet::new();
    for person in set.iter() {
        let Some(spouse_id) = &person.spouse else {
            continue;
        };
        let pair = if person.id <= *spouse_id {
            (person.id.clone(), spouse_id.clone())
        } else {
            (spouse_id.clone(), person.id.clone())
        };
        if !seen.insert(pair.clone()) {
            continue;
        }
        push_edge(edges, positions, EdgeKind::Spousal, pair.0, pair.1);
    }
}

/// Emit an edge when both endpoints have coordinates; otherwise drop it.
fn push_edge(
    edges: &mut Vec<LayoutEdge>,
    positions: &HashMap<PersonId, Point>,
    kind: EdgeKind,
    from: PersonId,
    to: PersonId,
) {
    let (Some(source), Some(target)) = (positions.get(&from), positions.get(&to)) else {
        debug!(?kind, %from, %to, "edge endpoint unresolved; omitted");
        return;
    };
    edges.push(LayoutEdge {
        kind,
        from,
        to,
        source: *source,
        target: *target,
    });
}
