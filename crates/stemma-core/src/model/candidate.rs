use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::person::Gender;

/// An unresolved person description produced by the extraction
/// collaborator, not yet merged into the canonical set.
///
/// Relationship fields carry display *names*, not ids — the entity
/// resolver turns names into identifiers and the reconciler applies the
/// resulting links. A name that resolves to nobody is dropped silently for
/// that field; candidates never fabricate identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    /// Display name, the matching key. Candidates with empty names are
    /// skipped by the resolver.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Parent display names, at most two of which can land in slots.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parent_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse_name: Option<String>,
}

impl Candidate {
    /// A minimal candidate carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if the candidate carries any relationship-by-name
    /// field the reconciler would act on.
    #[must_use]
    pub fn has_relationships(&self) -> bool {
        !self.parent_names.is_empty() || self.spouse_name.is_some()
    }
}
