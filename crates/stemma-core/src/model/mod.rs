//! Domain types: people, identifiers, candidates, and date parsing.

pub mod candidate;
pub mod date;
pub mod person;
pub mod person_id;

pub use candidate::Candidate;
pub use person::{Gender, ParentSlot, ParseEnumError, Person};
pub use person_id::PersonId;
