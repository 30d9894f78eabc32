//! `stm edit` — change fields on one person.
//!
//! Relationship and optional fields accept the literal `none` to clear.
//! Every edit runs through the invariant maintainer, so spousal symmetry
//! is restored synchronously before the tree is saved.

use clap::Args;
use serde::Serialize;
use std::io::Write as _;

use stemma_core::edit::{EditError, apply_edit};
use stemma_core::{ErrorCode, Gender, PersonId, PersonSet};

use crate::cmd::add::parse_date_arg;
use crate::cmd::show::resolve_person;
use crate::context::CliContext;
use crate::output::{CliError, OutputMode, render, render_error};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Person to edit: id, unique id prefix, or exact name.
    pub person: String,

    /// New display name.
    #[arg(long)]
    pub name: Option<String>,

    /// New gender (male, female, other).
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Birth date (YYYY-MM-DD, bare year, or `none` to clear).
    #[arg(long)]
    pub birth: Option<String>,

    /// Death date (YYYY-MM-DD, bare year, or `none` to clear).
    #[arg(long)]
    pub death: Option<String>,

    /// Biography text (`none` to clear).
    #[arg(long)]
    pub bio: Option<String>,

    /// Photo reference (`none` to clear).
    #[arg(long)]
    pub photo: Option<String>,

    /// Parent in slot A: id, prefix, name, or `none` to clear.
    #[arg(long)]
    pub parent_a: Option<String>,

    /// Parent in slot B: id, prefix, name, or `none` to clear.
    #[arg(long)]
    pub parent_b: Option<String>,

    /// Spouse: id, prefix, name, or `none` to clear.
    #[arg(long)]
    pub spouse: Option<String>,
}

/// `none` clears, anything else resolves to a person.
fn resolve_clearable(
    set: &PersonSet,
    current: &Option<PersonId>,
    raw: Option<&str>,
) -> Result<Option<PersonId>, CliError> {
    match raw.map(str::trim) {
        None => Ok(current.clone()),
        Some("none") => Ok(None),
        Some(value) => resolve_person(set, value).map(Some),
    }
}

fn parse_clearable_date(
    current: Option<chrono::NaiveDate>,
    raw: Option<&str>,
) -> Result<Option<chrono::NaiveDate>, CliError> {
    match raw.map(str::trim) {
        None => Ok(current),
        Some("none") => Ok(None),
        Some(value) => parse_date_arg(value).map(Some).map_err(CliError::new),
    }
}

#[derive(Debug, Serialize)]
struct EditOutput {
    id: PersonId,
    name: String,
}

pub fn run_edit(args: &EditArgs, mode: OutputMode, ctx: &CliContext) -> anyhow::Result<()> {
    let mut set = ctx.load_set()?;

    let outcome = edit_person(&mut set, args);
    let edited = match outcome {
        Ok(edited) => edited,
        Err(err) => {
            render_error(mode, &err)?;
            anyhow::bail!("{}", err.message);
        }
    };

    ctx.save_set(&set)?;

    render(mode, &edited, |o, w| {
        writeln!(w, "updated {} ({})", o.name, o.id)?;
        Ok(())
    })
}

fn edit_person(set: &mut PersonSet, args: &EditArgs) -> Result<EditOutput, CliError> {
    let id = resolve_person(set, &args.person)?;
    let mut edited = set.get(&id).cloned().unwrap_or_default();

    if let Some(name) = args.name.as_deref().map(str::trim) {
        if name.is_empty() {
            return Err(CliError::new("name must not be empty"));
        }
        edited.name = name.to_string();
    }
    if let Some(gender) = args.gender {
        edited.gender = gender;
    }
    edited.birth = parse_clearable_date(edited.birth, args.birth.as_deref())?;
    edited.death = parse_clearable_date(edited.death, args.death.as_deref())?;
    edited.bio = match args.bio.as_deref() {
        None => edited.bio,
        Some("none") => None,
        Some(text) => Some(text.to_string()),
    };
    edited.photo = match args.photo.as_deref() {
        None => edited.photo,
        Some("none") => None,
        Some(reference) => Some(reference.to_string()),
    };
    edited.parent_a = resolve_clearable(set, &edited.parent_a, args.parent_a.as_deref())?;
    edited.parent_b = resolve_clearable(set, &edited.parent_b, args.parent_b.as_deref())?;
    edited.spouse = resolve_clearable(set, &edited.spouse, args.spouse.as_deref())?;

    let out = EditOutput {
        id: edited.id.clone(),
        name: edited.name.clone(),
    };
    apply_edit(set, edited).map_err(|err| {
        let code = match &err {
            EditError::PersonNotFound(_) => ErrorCode::PersonNotFound,
            EditError::SelfReference(_) => ErrorCode::SelfReference,
            EditError::DuplicateParents(_) => ErrorCode::DuplicateParents,
            EditError::UnknownReference(_) => ErrorCode::DanglingReference,
        };
        CliError::new(err.to_string()).with_code(code)
    })?;

    Ok(out)
}
