//! Wire format for extraction responses and its tolerant decoder.
//!
//! The collaborator returns a JSON array of records with string-typed
//! fields. Real responses are messy: unknown genders, year-only dates,
//! missing arrays, or no valid JSON at all. Decoding is lossy by design —
//! a field that does not parse is dropped, and a payload that is not a
//! record array yields zero candidates. Nothing here errors past the
//! reconciliation boundary.

use serde::Deserialize;
use tracing::warn;

use stemma_core::model::date;
use stemma_core::{Candidate, Gender};

/// One record as the collaborator sends it.
///
/// Field names mirror the service contract (`camelCase` on the wire).
/// Father/mother names arrive as separate fields and fold into the
/// engine's parent-name list, father first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractedRecord {
    pub name: String,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub bio: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub spouse_name: Option<String>,
}

impl ExtractedRecord {
    /// Convert into an engine candidate, dropping unparsable fields.
    #[must_use]
    pub fn into_candidate(self) -> Candidate {
        let gender = self.gender.as_deref().and_then(|raw| {
            raw.parse::<Gender>()
                .map_err(|err| warn!(%err, "unparsable extracted gender; dropped"))
                .ok()
        });
        let birth = self.birth_date.as_deref().and_then(date::parse_flexible);

        let parent_names: Vec<String> = [self.father_name, self.mother_name]
            .into_iter()
            .flatten()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        Candidate {
            name: self.name.trim().to_string(),
            gender,
            birth,
            bio: self.bio.filter(|b| !b.trim().is_empty()),
            parent_names,
            spouse_name: self
                .spouse_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        }
    }
}

/// Decode a raw response payload into candidates.
///
/// Accepts exactly one shape — a JSON array of records — and treats
/// everything else as an empty batch. This is the tolerance the
/// reconciliation boundary relies on: a failed or cancelled extraction
/// becomes "no candidates produced," never a partial merge.
#[must_use]
pub fn decode_candidates(payload: &str) -> Vec<Candidate> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<ExtractedRecord>>(trimmed) {
        Ok(records) => records
            .into_iter()
            .map(ExtractedRecord::into_candidate)
            .filter(|c| !c.name.is_empty())
            .collect(),
        Err(err) => {
            warn!(%err, "extraction payload did not decode; treating as zero candidates");
            Vec::new()
        }
    }
}
