use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::model::person_id::PersonId;

/// The three recorded genders.
///
/// Gender drives the conventional parent-slot assignment (male parents in
/// slot A, female in slot B) but carries no other semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl Default for Gender {
    fn default() -> Self {
        // Documented resolver default for unspecified extraction gender,
        // not an inference.
        Self::Male
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(ParseEnumError {
                expected: "gender",
                got: s.to_string(),
            }),
        }
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

/// The two parent slots a person carries.
///
/// Slots are unordered except for the gender convention: assignment by
/// gender puts male parents in [`ParentSlot::A`] and female in
/// [`ParentSlot::B`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentSlot {
    A,
    B,
}

/// All persisted fields for one person (the canonical record).
///
/// `name` is the natural-language matching key: case- and
/// whitespace-sensitive after trimming. Relationship fields hold
/// [`PersonId`]s that must resolve within the owning set — the reconciler
/// and verifier treat dangling references as defects, not data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_a: Option<PersonId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_b: Option<PersonId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse: Option<PersonId>,
}

impl Default for Person {
    fn default() -> Self {
        Self {
            id: PersonId::new(""),
            name: String::new(),
            gender: Gender::default(),
            birth: None,
            death: None,
            photo: None,
            bio: None,
            parent_a: None,
            parent_b: None,
            spouse: None,
        }
    }
}

impl Person {
    /// Create a person with the required fields; everything else empty.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into().trim().to_string(),
            gender,
            ..Self::default()
        }
    }

    /// The parent slot an id occupies, if any.
    #[must_use]
    pub fn parent_slot_of(&self, id: &PersonId) -> Option<ParentSlot> {
        if self.parent_a.as_ref() == Some(id) {
            Some(ParentSlot::A)
        } else if self.parent_b.as_ref() == Some(id) {
            Some(ParentSlot::B)
        } else {
            None
        }
    }

    /// Returns `true` if either parent slot holds the given id.
    #[must_use]
    pub fn has_parent(&self, id: &PersonId) -> bool {
        self.parent_slot_of(id).is_some()
    }

    /// The structurally preferred parent reference: slot A, else slot B.
    ///
    /// This is the raw slot preference only — the layout builder layers the
    /// spousal alignment heuristic on top.
    #[must_use]
    pub fn first_parent(&self) -> Option<&PersonId> {
        self.parent_a.as_ref().or(self.parent_b.as_ref())
    }

    /// The non-preferred filled parent slot, when both slots are set.
    #[must_use]
    pub fn secondary_parent(&self) -> Option<&PersonId> {
        match (&self.parent_a, &self.parent_b) {
            (Some(_), Some(b)) => Some(b),
            _ => None,
        }
    }

    /// Count of filled parent slots (0, 1, or 2).
    #[must_use]
    pub fn parent_count(&self) -> usize {
        usize::from(self.parent_a.is_some()) + usize::from(self.parent_b.is_some())
    }

    /// The single filled parent slot, if exactly one is set.
    #[must_use]
    pub fn sole_parent(&self) -> Option<(&PersonId, ParentSlot)> {
        match (&self.parent_a, &self.parent_b) {
            (Some(a), None) => Some((a, ParentSlot::A)),
            (None, Some(b)) => Some((b, ParentSlot::B)),
            _ => None,
        }
    }

    /// Returns `true` if any relationship field references the given id.
    #[must_use]
    pub fn references(&self, id: &PersonId) -> bool {
        self.has_parent(id) || self.spouse.as_ref() == Some(id)
    }

    /// Clear every relationship field referencing the given id.
    ///
    /// Returns the number of fields cleared.
    pub fn clear_references_to(&mut self, id: &PersonId) -> usize {
        let mut cleared = 0;
        if self.parent_a.as_ref() == Some(id) {
            self.parent_a = None;
            cleared += 1;
        }
        if self.parent_b.as_ref() == Some(id) {
            self.parent_b = None;
            cleared += 1;
        }
        if self.spouse.as_ref() == Some(id) {
            self.spouse = None;
            cleared += 1;
        }
        cleared
    }

    /// Returns `true` if any relationship field points at the person itself.
    #[must_use]
    pub fn is_self_referential(&self) -> bool {
        self.references(&self.id)
    }
}
