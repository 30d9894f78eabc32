//! `stm list` — one line per person.

use clap::Args;
use serde::Serialize;
use std::io::Write as _;

use stemma_core::{Person, PersonSet};

use crate::context::CliContext;
use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct ListArgs {}

#[derive(Debug, Serialize)]
struct ListRow {
    id: String,
    name: String,
    gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spouse: Option<String>,
    parents: usize,
}

#[derive(Debug, Serialize)]
struct ListOutput {
    people: Vec<ListRow>,
}

fn row(set: &PersonSet, person: &Person) -> ListRow {
    ListRow {
        id: person.id.to_string(),
        name: person.name.clone(),
        gender: person.gender.to_string(),
        birth: person.birth.map(|d| d.to_string()),
        spouse: person
            .spouse
            .as_ref()
            .and_then(|id| set.get(id))
            .map(|p| p.name.clone()),
        parents: person.parent_count(),
    }
}

pub fn run_list(_args: &ListArgs, mode: OutputMode, ctx: &CliContext) -> anyhow::Result<()> {
    let set = ctx.load_set()?;
    let out = ListOutput {
        people: set.iter().map(|p| row(&set, p)).collect(),
    };

    render(mode, &out, |o, w| {
        if o.people.is_empty() {
            writeln!(w, "no people yet — try `stm add` or `stm import`")?;
            return Ok(());
        }
        for p in &o.people {
            let birth = p.birth.as_deref().unwrap_or("-");
            let spouse = p.spouse.as_deref().unwrap_or("-");
            writeln!(
                w,
                "{:<20} {:<20} {:<8} {:<12} spouse: {}",
                p.id, p.name, p.gender, birth, spouse
            )?;
        }
        writeln!(w, "{} people", o.people.len())?;
        Ok(())
    })
}
