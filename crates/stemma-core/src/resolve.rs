//! Entity resolution: deciding which extracted candidates are new people
//! and which are updates to existing ones.
//!
//! # Overview
//!
//! Matching is by trimmed display name, exact and case-sensitive. The
//! resolver builds the name lookup from existing people first, then walks
//! the batch: unknown names mint a fresh id and insert a new person; known
//! names merge non-relationship fields into the existing record.
//!
//! # Merge semantics
//!
//! Human-entered data always wins over extraction output:
//!
//! - birth date fills only when the existing record has none
//! - biography **appends** with a separator rather than overwriting
//! - gender on an existing record is never touched
//!
//! New people with no extracted gender default to male — a documented
//! default, not an inference.
//!
//! Resolution never deletes people and never touches relationship fields;
//! those belong to the reconciler.

use tracing::debug;

use crate::model::{Candidate, Person, PersonId};
use crate::set::{NameLookup, PersonSet};

/// Separator used when appending extracted biography text to an existing
/// biography.
pub const BIO_SEPARATOR: &str = " / ";

/// Counts of what one resolution pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// People minted for names absent from the lookup.
    pub created: usize,
    /// Existing people that received at least one merged field.
    pub updated: usize,
    /// Candidates skipped for having an empty name.
    pub skipped: usize,
}

/// Resolve a candidate batch against the set.
///
/// `batch_millis` is the caller-supplied import timestamp used to mint
/// batch ids (`x-<millis>-<ordinal>`); passing it in keeps the resolver a
/// pure function of its inputs.
///
/// Returns the name→id lookup covering both existing and newly minted
/// ids — the reconciler consumes it to resolve relationship names.
pub fn resolve_candidates(
    set: &mut PersonSet,
    candidates: &[Candidate],
    batch_millis: i64,
) -> (NameLookup, ResolveReport) {
    let mut lookup = set.name_index();
    let mut report = ResolveReport::default();

    for (ordinal, candidate) in candidates.iter().enumerate() {
        let name = candidate.name.trim();
        if name.is_empty() {
            report.skipped += 1;
            continue;
        }

        if let Some(existing_id) = lookup.get(name) {
            let existing_id = existing_id.clone();
            if let Some(person) = set.get_mut(&existing_id)
                && merge_into(person, candidate)
            {
                report.updated += 1;
                debug!(id = %existing_id, name, "merged candidate into existing person");
            }
        } else {
            let id = PersonId::minted_batch(batch_millis, ordinal);
            let mut person = Person::new(
                id.clone(),
                name,
                candidate.gender.unwrap_or_default(),
            );
            person.birth = candidate.birth;
            person.bio = candidate.bio.clone().filter(|b| !b.trim().is_empty());

            lookup.insert(name.to_string(), id.clone());
            set.insert(person);
            report.created += 1;
            debug!(id = %id, name, "minted person for unmatched candidate");
        }
    }

    (lookup, report)
}

/// Merge a candidate's non-relationship fields into an existing person.
///
/// Returns `true` if any field changed.
fn merge_into(person: &mut Person, candidate: &Candidate) -> bool {
    let mut changed = false;

    if person.birth.is_none() && candidate.birth.is_some() {
        person.birth = candidate.birth;
        changed = true;
    }

    if let Some(extracted_bio) = candidate
        .bio
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
    {
        let existing = person.bio.as_deref().map(str::trim).unwrap_or_default();
        if existing.is_empty() {
            person.bio = Some(extracted_bio.to_string());
            changed = true;
        } else if existing != extracted_bio {
            let appended = format!("{existing}{BIO_SEPARATOR}{extracted_bio}");
            person.bio = Some(appended);
            changed = true;
        }
        // identical text: nothing to add
    }

    changed
}
