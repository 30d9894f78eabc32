//! `stm show` — full details for one person.
//!
//! Also home to [`resolve_person`], the id/name/prefix resolution shared
//! by every command that takes a person argument.

use clap::Args;
use serde::Serialize;

use stemma_core::{ErrorCode, Person, PersonId, PersonSet};

use crate::context::CliContext;
use crate::output::{CliError, OutputMode, kv, render, render_error};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Person to show: id, unique id prefix, or exact name.
    pub person: String,
}

/// Resolve user input to a person id.
///
/// Tried in order: exact id, exact name, unique id prefix. Ambiguous
/// prefixes and unknown inputs produce a typed error.
pub fn resolve_person(set: &PersonSet, input: &str) -> Result<PersonId, CliError> {
    let input = input.trim();

    let exact = PersonId::new(input);
    if set.contains(&exact) {
        return Ok(exact);
    }

    if let Some(id) = set.name_index().get(input) {
        return Ok(id.clone());
    }

    let matches: Vec<PersonId> = set
        .ids()
        .into_iter()
        .filter(|id| id.as_str().starts_with(input))
        .collect();
    match matches.as_slice() {
        [only] => Ok(only.clone()),
        [] => Err(
            CliError::new(format!("no person matches '{input}'"))
                .with_code(ErrorCode::PersonNotFound),
        ),
        many => Err(CliError::new(format!(
            "'{input}' is ambiguous ({} matches); use a longer prefix",
            many.len()
        ))),
    }
}

#[derive(Debug, Serialize)]
struct ShowOutput {
    #[serde(flatten)]
    person: Person,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_a_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_b_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spouse_name: Option<String>,
    is_me: bool,
}

pub fn run_show(args: &ShowArgs, mode: OutputMode, ctx: &CliContext) -> anyhow::Result<()> {
    let set = ctx.load_set()?;
    let id = match resolve_person(&set, &args.person) {
        Ok(id) => id,
        Err(err) => {
            render_error(mode, &err)?;
            anyhow::bail!("{}", err.message);
        }
    };

    let person = set.get(&id).cloned().unwrap_or_default();
    let name_of = |id: &Option<PersonId>| {
        id.as_ref()
            .and_then(|id| set.get(id))
            .map(|p| p.name.clone())
    };

    let state = ctx.load_state()?;
    let out = ShowOutput {
        parent_a_name: name_of(&person.parent_a),
        parent_b_name: name_of(&person.parent_b),
        spouse_name: name_of(&person.spouse),
        is_me: state.me.as_ref() == Some(&person.id),
        person,
    };

    render(mode, &out, |o, w| {
        kv(w, "id", o.person.id.as_str())?;
        kv(w, "name", &o.person.name)?;
        kv(w, "gender", o.person.gender.to_string())?;
        if let Some(birth) = o.person.birth {
            kv(w, "birth", birth.to_string())?;
        }
        if let Some(death) = o.person.death {
            kv(w, "death", death.to_string())?;
        }
        if let Some(bio) = &o.person.bio {
            kv(w, "bio", bio)?;
        }
        if let Some(photo) = &o.person.photo {
            kv(w, "photo", photo)?;
        }
        if let (Some(id), Some(name)) = (&o.person.parent_a, &o.parent_a_name) {
            kv(w, "parent A", format!("{name} ({id})"))?;
        }
        if let (Some(id), Some(name)) = (&o.person.parent_b, &o.parent_b_name) {
            kv(w, "parent B", format!("{name} ({id})"))?;
        }
        if let (Some(id), Some(name)) = (&o.person.spouse, &o.spouse_name) {
            kv(w, "spouse", format!("{name} ({id})"))?;
        }
        if o.is_me {
            kv(w, "marker", "me")?;
        }
        Ok(())
    })
}
