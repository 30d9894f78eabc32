//! Relationship reconciliation: applying explicit facts, then propagating
//! inferred links to a fixed point.
//!
//! # Overview
//!
//! Two phases over a resolved candidate batch:
//!
//! 1. **Explicit application** — spouse-by-name and parents-by-name facts
//!    from the batch land on the canonical set. Spouse assignment is a
//!    direct overwrite (last write wins across the batch) and is mirrored
//!    onto the partner immediately; competing claims are cleared so
//!    at-most-one-spouse holds. Parents assign by the resolved parent's
//!    gender (male → slot A, female → slot B, unknown → first free slot),
//!    skipping self-references and duplicates.
//! 2. **Propagation** — a work-queue agenda that applies two inference
//!    rules until nothing changes, reprocessing only people affected by
//!    the previous change:
//!    - *spousal symmetry repair*: a spouseless person referenced as
//!      someone's spouse mirrors the link back;
//!    - *triangle completion*: a person with exactly one filled parent
//!      slot whose parent has a spouse gains that spouse in the empty
//!      slot.
//!
//! A safety cap on agenda dequeues guarantees termination on malformed
//! input; on well-formed input the agenda drains at the fixed point long
//! before the cap.
//!
//! # Failure mode
//!
//! A relationship name that does not resolve in the lookup is dropped
//! silently for that field (logged at warn). Propagation never fabricates
//! identifiers and never copies a dangling reference into a slot.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, warn};

use crate::model::{Candidate, Gender, ParentSlot, PersonId};
use crate::set::{NameLookup, PersonSet};

/// Counts from the explicit-application phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitReport {
    /// Spouse links applied from candidate facts.
    pub spouses_linked: usize,
    /// Parent slots filled from candidate facts.
    pub parents_linked: usize,
    /// Relationship names that did not resolve and were dropped.
    pub names_dropped: usize,
}

/// Counts from the propagation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Spouse links mirrored back by the symmetry rule.
    pub mirrored_spouses: usize,
    /// Parent slots filled by triangle completion.
    pub completed_parents: usize,
    /// Competing spouse claims cleared to keep at-most-one-spouse.
    pub cleared_claims: usize,
    /// Agenda entries processed.
    pub dequeues: usize,
    /// `true` if the safety cap stopped the agenda before it drained.
    pub cap_hit: bool,
}

impl PropagationReport {
    /// Returns `true` if the pass changed anything.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.mirrored_spouses > 0 || self.completed_parents > 0 || self.cleared_claims > 0
    }
}

/// Combined report for a full reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub explicit: ExplicitReport,
    pub propagation: PropagationReport,
}

/// Apply a resolved candidate batch's relationship facts, then propagate.
pub fn reconcile(
    set: &mut PersonSet,
    candidates: &[Candidate],
    lookup: &NameLookup,
) -> ReconcileReport {
    let explicit = apply_explicit(set, candidates, lookup);
    let propagation = propagate(set);
    ReconcileReport {
        explicit,
        propagation,
    }
}

// ---------------------------------------------------------------------------
// Phase 1: explicit application
// ---------------------------------------------------------------------------

/// Apply spouse-by-name and parents-by-name facts from the batch.
pub fn apply_explicit(
    set: &mut PersonSet,
    candidates: &[Candidate],
    lookup: &NameLookup,
) -> ExplicitReport {
    let mut report = ExplicitReport::default();

    for candidate in candidates {
        let name = candidate.name.trim();
        let Some(subject_id) = lookup.get(name).cloned() else {
            continue; // empty or never-resolved name; nothing to attach to
        };
        if !set.contains(&subject_id) {
            continue;
        }

        if let Some(spouse_name) = candidate.spouse_name.as_deref().map(str::trim) {
            match lookup.get(spouse_name) {
                Some(spouse_id) if *spouse_id == subject_id => {
                    debug!(name, "ignoring self-referential spouse fact");
                }
                Some(spouse_id) => {
                    let spouse_id = spouse_id.clone();
                    if set.contains(&spouse_id) {
                        assign_spouse(set, &subject_id, &spouse_id);
                        report.spouses_linked += 1;
                    }
                }
                None => {
                    report.names_dropped += 1;
                    warn!(
                        name,
                        spouse = spouse_name,
                        "spouse name did not resolve; dropped"
                    );
                }
            }
        }

        for parent_name in &candidate.parent_names {
            let parent_name = parent_name.trim();
            let Some(parent_id) = lookup.get(parent_name).cloned() else {
                report.names_dropped += 1;
                warn!(
                    name,
                    parent = parent_name,
                    "parent name did not resolve; dropped"
                );
                continue;
            };
            if assign_parent(set, &subject_id, &parent_id) {
                report.parents_linked += 1;
            }
        }
    }

    report
}

/// Point `a` and `b` at each other and clear every competing claim.
///
/// Overwrite-on-assignment: whatever either partner pointed at before is
/// simply replaced, and any third person claiming either partner loses the
/// claim. Returns the number of third-party claims cleared.
///
/// Shared with the edit-time maintainer, which applies the same rule
/// synchronously on interactive edits.
pub(crate) fn assign_spouse(set: &mut PersonSet, a: &PersonId, b: &PersonId) -> usize {
    let mut cleared = 0;
    let losers: Vec<PersonId> = set
        .iter()
        .filter(|p| {
            p.id != *a
                && p.id != *b
                && (p.spouse.as_ref() == Some(a) || p.spouse.as_ref() == Some(b))
        })
        .map(|p| p.id.clone())
        .collect();

    for loser in losers {
        if let Some(person) = set.get_mut(&loser) {
            person.spouse = None;
            cleared += 1;
            debug!(id = %loser, "cleared competing spouse claim");
        }
    }

    if let Some(person) = set.get_mut(a) {
        person.spouse = Some(b.clone());
    }
    if let Some(person) = set.get_mut(b) {
        person.spouse = Some(a.clone());
    }

    cleared
}

/// Assign `parent_id` to one of `subject_id`'s slots by gender convention.
///
/// Returns `true` if a slot changed. Self-references and duplicates of an
/// already-assigned parent are skipped.
fn assign_parent(set: &mut PersonSet, subject_id: &PersonId, parent_id: &PersonId) -> bool {
    if parent_id == subject_id {
        debug!(id = %subject_id, "ignoring self-referential parent fact");
        return false;
    }
    let Some(parent_gender) = set.get(parent_id).map(|p| p.gender) else {
        return false;
    };

    let Some(subject) = set.get_mut(subject_id) else {
        return false;
    };
    if subject.has_parent(parent_id) {
        return false; // would duplicate an already-assigned parent
    }

    match parent_gender {
        Gender::Male => {
            subject.parent_a = Some(parent_id.clone());
        }
        Gender::Female => {
            subject.parent_b = Some(parent_id.clone());
        }
        Gender::Other => {
            // Unknown convention: first free slot, or skip when full.
            if subject.parent_a.is_none() {
                subject.parent_a = Some(parent_id.clone());
            } else if subject.parent_b.is_none() {
                subject.parent_b = Some(parent_id.clone());
            } else {
                return false;
            }
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Phase 2: propagation
// ---------------------------------------------------------------------------

/// Run the inference agenda to a fixed point.
///
/// Seeds the agenda with every person, then reprocesses only people
/// affected by each change. The dequeue cap (`4·N + 16`) is a termination
/// guarantee for malformed input, not an expected operating point.
pub fn propagate(set: &mut PersonSet) -> PropagationReport {
    let mut report = PropagationReport::default();
    let cap = set.len() * 4 + 16;

    let mut agenda: VecDeque<PersonId> = set.ids().into();
    let mut queued: HashSet<PersonId> = agenda.iter().cloned().collect();

    while let Some(id) = agenda.pop_front() {
        queued.remove(&id);
        if report.dequeues >= cap {
            report.cap_hit = true;
            warn!(cap, "propagation stopped at safety cap; input may be malformed");
            break;
        }
        report.dequeues += 1;

        let mut touched: Vec<PersonId> = Vec::new();
        mirror_spouse(set, &id, &mut report, &mut touched);
        complete_triangle(set, &id, &mut report, &mut touched);

        for affected in touched {
            if queued.insert(affected.clone()) {
                agenda.push_back(affected);
            }
        }
    }

    report
}

/// Spousal symmetry repair for one person.
///
/// If the person has no spouse but someone claims them, mirror the first
/// claim back (id order). Routing through [`assign_spouse`] clears every
/// competing claim on either side, so the rule is locally
/// invariant-preserving.
fn mirror_spouse(
    set: &mut PersonSet,
    id: &PersonId,
    report: &mut PropagationReport,
    touched: &mut Vec<PersonId>,
) {
    let Some(person) = set.get(id) else { return };
    if person.spouse.is_some() {
        return;
    }

    let claimants: Vec<PersonId> = set
        .spouse_claimants_of(id)
        .into_iter()
        .filter(|c| c != id)
        .collect();
    let Some(winner) = claimants.first().cloned() else {
        return;
    };

    // Everyone whose claim may be overwritten needs reprocessing.
    let mut affected = claimants;
    affected.extend(set.spouse_claimants_of(&winner));

    let cleared = assign_spouse(set, id, &winner);
    report.mirrored_spouses += 1;
    report.cleared_claims += cleared;
    debug!(id = %id, spouse = %winner, cleared, "mirrored spouse link");

    // A new spouse makes triangle completion possible for both partners'
    // children.
    touched.push(id.clone());
    touched.extend(affected);
    touched.extend(set.children_of(id));
    touched.extend(set.children_of(&winner));
    touched.push(winner);
}

/// Triangle completion for one person.
///
/// Exactly one filled parent slot, and that parent has a spouse → the
/// spouse fills the empty slot, subject to the self-reference,
/// non-duplication, and referential-integrity invariants.
fn complete_triangle(
    set: &mut PersonSet,
    id: &PersonId,
    report: &mut PropagationReport,
    touched: &mut Vec<PersonId>,
) {
    let Some(person) = set.get(id) else { return };
    let Some((parent_id, filled_slot)) = person.sole_parent() else {
        return;
    };
    let parent_id = parent_id.clone();

    let Some(spouse_id) = set.get(&parent_id).and_then(|p| p.spouse.clone()) else {
        return;
    };
    if spouse_id == *id || spouse_id == parent_id || !set.contains(&spouse_id) {
        return;
    }

    if let Some(person) = set.get_mut(id) {
        match filled_slot {
            ParentSlot::A => person.parent_b = Some(spouse_id.clone()),
            ParentSlot::B => person.parent_a = Some(spouse_id.clone()),
        }
        report.completed_parents += 1;
        debug!(id = %id, parent = %spouse_id, "completed parent pair from spouse");
        touched.push(id.clone());
    }
}
