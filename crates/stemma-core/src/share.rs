//! Share-export codec: a person set as one transportable string.
//!
//! Encoding is canonical JSON (records in id order) wrapped in URL-safe
//! base64 without padding, so the payload drops straight into a link
//! query parameter. Round-trip fidelity is a hard requirement — shared
//! views are read-only projections of the same data model, so ids, field
//! values, and the reference graph must survive exactly.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use thiserror::Error;

use crate::model::Person;
use crate::set::PersonSet;

/// Failures while decoding a share payload.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("share payload is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("share payload is not a person list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a set into a transportable string.
///
/// Serializing `Vec<Person>` to JSON cannot fail for the types involved,
/// so encoding is total.
#[must_use]
pub fn encode(set: &PersonSet) -> String {
    let json = serde_json::to_vec(&set.to_people()).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a transportable string back into a set.
///
/// # Errors
///
/// Returns [`ShareError`] when the payload is not base64, not UTF-8, or
/// not a JSON person list. Callers surface this as a bad share link; the
/// current set is never touched by a failed decode.
pub fn decode(payload: &str) -> Result<PersonSet, ShareError> {
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim())?;
    let json = String::from_utf8(bytes)?;
    let people: Vec<Person> = serde_json::from_str(&json)?;
    Ok(PersonSet::from_people(people))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Person, PersonId};

    fn sample_set() -> PersonSet {
        let mut set = PersonSet::new();
        let mut a = Person::new("p-1", "Zhang San", Gender::Male);
        a.spouse = Some(PersonId::new("p-2"));
        a.birth = chrono::NaiveDate::from_ymd_opt(1985, 4, 11);
        set.insert(a);
        let mut b = Person::new("p-2", "Li Hua", Gender::Female);
        b.spouse = Some(PersonId::new("p-1"));
        b.bio = Some("Teacher".to_string());
        set.insert(b);
        let mut c = Person::new("p-3", "Xiao Ming", Gender::Other);
        c.parent_a = Some(PersonId::new("p-1"));
        c.parent_b = Some(PersonId::new("p-2"));
        set.insert(c);
        set
    }

    #[test]
    fn round_trip_is_lossless() {
        let set = sample_set();
        let decoded = decode(&encode(&set)).expect("decode");
        assert_eq!(decoded, set);
    }

    #[test]
    fn empty_set_round_trips() {
        let set = PersonSet::new();
        let decoded = decode(&encode(&set)).expect("decode");
        assert!(decoded.is_empty());
    }

    #[test]
    fn payload_is_url_safe() {
        let payload = encode(&sample_set());
        assert!(
            payload
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "payload must need no URL escaping: {payload}"
        );
    }

    #[test]
    fn garbage_payload_is_an_error() {
        assert!(decode("!!! not base64 !!!").is_err());
    }

    #[test]
    fn wrong_json_shape_is_an_error() {
        let payload = URL_SAFE_NO_PAD.encode(b"{\"not\": \"a list\"}");
        assert!(matches!(decode(&payload), Err(ShareError::Json(_))));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let payload = format!("  {}  ", encode(&sample_set()));
        assert!(decode(&payload).is_ok());
    }
}
