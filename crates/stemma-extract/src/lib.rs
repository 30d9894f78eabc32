//! stemma-extract: the extraction-collaborator contract.
//!
//! Free text goes in, [`Candidate`] records come out. The contract is
//! deliberately forgiving on the way back: malformed or failed responses
//! degrade to zero candidates, so nothing here can corrupt the canonical
//! set — which is only touched once a complete batch is in hand.
//!
//! [`Candidate`]: stemma_core::Candidate

pub mod extractor;
pub mod http;
pub mod record;

pub use extractor::{
    ContextPerson, ExtractError, ExtractionContext, Extractor, extract_or_empty,
};
pub use http::HttpExtractor;
pub use record::{ExtractedRecord, decode_candidates};
