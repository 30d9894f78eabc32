//! stemma-core: person model and relationship consistency engine.
//!
//! Every component here is a synchronous, pure transformation over an
//! in-memory [`PersonSet`] snapshot owned by the caller:
//!
//! - [`resolve`] — match extracted candidates to existing people by name,
//!   minting ids for the rest
//! - [`reconcile`] — apply relationship facts and propagate inferred
//!   links (spousal symmetry, triangle completion) to a fixed point
//! - [`edit`] — synchronous spousal-symmetry maintenance for interactive
//!   single-person edits
//! - [`verify`] — read-only invariant checking
//! - [`share`] — lossless transport encoding for read-only shared views
//! - [`repo`] — the {load, save} persistence seam
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums at the seams; total functions
//!   return reports instead of results.
//! - **Logging**: `tracing` macros (`debug!` for engine steps, `warn!`
//!   for tolerated input defects).

pub mod edit;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod repo;
pub mod resolve;
pub mod set;
pub mod share;
pub mod verify;

pub use error::ErrorCode;
pub use model::{Candidate, Gender, ParentSlot, Person, PersonId};
pub use set::{NameLookup, PersonSet};
