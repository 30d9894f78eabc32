use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier for a [`Person`](super::person::Person).
///
/// The engine never inspects the contents beyond non-emptiness; any
/// non-empty string is a valid id. Two minting conventions exist:
///
/// - `p-<millis>` for interactively created people
/// - `x-<millis>-<ordinal>` for people minted by the entity resolver,
///   where the ordinal guarantees uniqueness within one import batch
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Wrap a raw id string. Leading/trailing whitespace is trimmed.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self(raw.trim().to_string())
    }

    /// Mint an id for an interactively created person.
    #[must_use]
    pub fn minted(millis: i64) -> Self {
        Self(format!("p-{millis}"))
    }

    /// Mint an id for a resolver-created person. `ordinal` is the
    /// candidate's position within the batch, which keeps ids unique even
    /// when a whole batch shares one timestamp.
    #[must_use]
    pub fn minted_batch(millis: i64, ordinal: usize) -> Self {
        Self(format!("x-{millis}-{ordinal}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is usable (non-empty after trimming).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PersonId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
