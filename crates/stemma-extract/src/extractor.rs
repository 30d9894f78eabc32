//! The pluggable extraction seam.
//!
//! Implementations turn free text (plus a snapshot of who already exists)
//! into candidate records. The call is blocking and may take substantial
//! wall-clock time — it is the only slow operation in the system — so
//! callers run it to completion *before* touching the canonical set. A
//! discarded or failed extraction leaves the set exactly as it was.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use stemma_core::{Candidate, Gender, PersonSet};

/// Failures from an extraction attempt.
///
/// These never cross the reconciliation boundary — see
/// [`extract_or_empty`].
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extraction request failed: {0}")]
    Request(String),
    #[error("extraction endpoint returned status {status}")]
    Status { status: u16 },
    #[error("extraction response could not be read: {0}")]
    Response(String),
}

/// One existing person as matching context for the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextPerson {
    pub name: String,
    pub gender: Gender,
}

/// Snapshot of existing people (names and genders only) sent alongside
/// the text so the collaborator can match rather than re-invent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionContext {
    pub people: Vec<ContextPerson>,
}

impl ExtractionContext {
    /// Snapshot the current set, in id order.
    #[must_use]
    pub fn from_set(set: &PersonSet) -> Self {
        Self {
            people: set
                .iter()
                .map(|p| ContextPerson {
                    name: p.name.clone(),
                    gender: p.gender,
                })
                .collect(),
        }
    }
}

/// The extraction collaborator contract.
pub trait Extractor {
    /// Extract candidate records from free text.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] on transport or endpoint failures. A
    /// succeeding call with nothing extractable returns an empty batch.
    fn extract(
        &self,
        text: &str,
        context: &ExtractionContext,
    ) -> Result<Vec<Candidate>, ExtractError>;
}

/// Run an extraction, degrading every failure to an empty batch.
///
/// This is the boundary rule: extraction failures surface to the caller
/// as "no candidates produced" and are never partially applied.
pub fn extract_or_empty(
    extractor: &dyn Extractor,
    text: &str,
    context: &ExtractionContext,
) -> Vec<Candidate> {
    match extractor.extract(text, context) {
        Ok(candidates) => candidates,
        Err(err) => {
            warn!(%err, "extraction failed; proceeding with zero candidates");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stemma_core::Person;

    struct Failing;

    impl Extractor for Failing {
        fn extract(
            &self,
            _text: &str,
            _context: &ExtractionContext,
        ) -> Result<Vec<Candidate>, ExtractError> {
            Err(ExtractError::Status { status: 503 })
        }
    }

    struct Fixed(Vec<Candidate>);

    impl Extractor for Fixed {
        fn extract(
            &self,
            _text: &str,
            _context: &ExtractionContext,
        ) -> Result<Vec<Candidate>, ExtractError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn context_snapshots_names_and_genders() {
        let mut set = PersonSet::new();
        set.insert(Person::new("p-1", "A", Gender::Female));
        set.insert(Person::new("p-2", "B", Gender::Male));

        let context = ExtractionContext::from_set(&set);
        assert_eq!(context.people.len(), 2);
        assert_eq!(context.people[0].name, "A");
        assert_eq!(context.people[0].gender, Gender::Female);
    }

    #[test]
    fn failure_degrades_to_empty_batch() {
        let batch = extract_or_empty(&Failing, "some text", &ExtractionContext::default());
        assert!(batch.is_empty());
    }

    #[test]
    fn success_passes_candidates_through() {
        let fixed = Fixed(vec![Candidate::named("A")]);
        let batch = extract_or_empty(&fixed, "text", &ExtractionContext::default());
        assert_eq!(batch.len(), 1);
    }
}
