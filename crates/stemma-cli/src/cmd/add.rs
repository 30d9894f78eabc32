//! `stm add` — create a person interactively.

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::io::Write as _;

use stemma_core::model::date;
use stemma_core::{Gender, Person, PersonId, PersonSet};

use crate::context::CliContext;
use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Display name of the new person.
    pub name: String,

    /// Gender (male, female, other). Defaults to male.
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Birth date, YYYY-MM-DD or bare year.
    #[arg(long, value_parser = parse_date_arg)]
    pub birth: Option<NaiveDate>,

    /// Death date, YYYY-MM-DD or bare year.
    #[arg(long, value_parser = parse_date_arg)]
    pub death: Option<NaiveDate>,

    /// Free-text biography.
    #[arg(long)]
    pub bio: Option<String>,

    /// Photo reference (opaque string).
    #[arg(long)]
    pub photo: Option<String>,

    /// Mark the new person as "me".
    #[arg(long)]
    pub me: bool,
}

pub(crate) fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    date::parse_flexible(raw)
        .ok_or_else(|| format!("'{raw}' is not a YYYY-MM-DD date or bare year"))
}

/// Mint an interactive id, bumping past millisecond collisions.
pub(crate) fn mint_unique(set: &PersonSet, mut millis: i64) -> PersonId {
    loop {
        let id = PersonId::minted(millis);
        if !set.contains(&id) {
            return id;
        }
        millis += 1;
    }
}

#[derive(Debug, Serialize)]
struct AddOutput {
    id: PersonId,
    name: String,
    is_me: bool,
}

pub fn run_add(args: &AddArgs, mode: OutputMode, ctx: &CliContext) -> anyhow::Result<()> {
    let name = args.name.trim();
    if name.is_empty() {
        anyhow::bail!("name must not be empty");
    }

    let mut set = ctx.load_set()?;
    let id = mint_unique(&set, ctx.now_millis());

    let mut person = Person::new(id.clone(), name, args.gender.unwrap_or_default());
    person.birth = args.birth;
    person.death = args.death;
    person.bio = args.bio.clone();
    person.photo = args.photo.clone();
    set.insert(person);
    ctx.save_set(&set)?;

    if args.me {
        let mut state = ctx.load_state()?;
        state.me = Some(id.clone());
        ctx.save_state(&state)?;
    }

    let out = AddOutput {
        id,
        name: name.to_string(),
        is_me: args.me,
    };
    render(mode, &out, |o, w| {
        writeln!(w, "added {} ({})", o.name, o.id)?;
        if o.is_me {
            writeln!(w, "marked as me")?;
        }
        Ok(())
    })
}
