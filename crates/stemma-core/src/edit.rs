//! Edit-time invariant maintenance for interactive single-person edits.
//!
//! Unlike the batch-oriented reconciler, this runs synchronously on every
//! interactive mutation: the edited record replaces the stored one and
//! spousal symmetry is restored immediately, so the canonical set never
//! leaves an edit in an asymmetric state.

use thiserror::Error;
use tracing::debug;

use crate::model::{Person, PersonId};
use crate::reconcile::assign_spouse;
use crate::set::PersonSet;

/// Rejections for an interactive edit.
///
/// Unlike bulk import (where bad names degrade to dropped fields), a
/// direct edit names ids explicitly, so a bad reference is an error the
/// caller must surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("person not found: '{0}'")]
    PersonNotFound(PersonId),
    #[error("person '{0}' cannot reference itself")]
    SelfReference(PersonId),
    #[error("both parent slots reference '{0}'")]
    DuplicateParents(PersonId),
    #[error("reference to unknown person: '{0}'")]
    UnknownReference(PersonId),
}

/// Replace a stored person with its edited version and restore spousal
/// symmetry.
///
/// Rules applied after the replacement:
///
/// - spouse set to `Y` → `Y` is forced to point back, and every other
///   claim on either partner is cleared (at-most-one-spouse);
/// - spouse cleared → everyone pointing at the edited person is cleared.
///
/// # Errors
///
/// Rejects edits that would break the structural invariants before any
/// mutation happens: unknown subject, self-reference, duplicate parent
/// slots, or a reference to an id not present in the set.
pub fn apply_edit(set: &mut PersonSet, edited: Person) -> Result<(), EditError> {
    let id = edited.id.clone();

    if !set.contains(&id) {
        return Err(EditError::PersonNotFound(id));
    }
    if edited.is_self_referential() {
        return Err(EditError::SelfReference(id));
    }
    if let (Some(a), Some(b)) = (&edited.parent_a, &edited.parent_b)
        && a == b
    {
        return Err(EditError::DuplicateParents(a.clone()));
    }
    for reference in [&edited.parent_a, &edited.parent_b, &edited.spouse]
        .into_iter()
        .flatten()
    {
        if !set.contains(reference) {
            return Err(EditError::UnknownReference(reference.clone()));
        }
    }

    let spouse = edited.spouse.clone();
    set.insert(edited);

    match spouse {
        Some(partner) => {
            let cleared = assign_spouse(set, &id, &partner);
            debug!(id = %id, spouse = %partner, cleared, "edit linked spouses");
        }
        None => {
            for claimant in set.spouse_claimants_of(&id) {
                if let Some(person) = set.get_mut(&claimant) {
                    person.spouse = None;
                    debug!(id = %id, claimant = %claimant, "edit cleared stale spouse claim");
                }
            }
        }
    }

    Ok(())
}
