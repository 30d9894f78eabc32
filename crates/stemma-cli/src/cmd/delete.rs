//! `stm delete` — remove a person transactionally.
//!
//! Removal scrubs every reference to the removed id from the rest of the
//! set, so deletion never leaves dangling parent or spouse links. The
//! "me" marker is cleared if it pointed at the removed person.

use clap::Args;
use serde::Serialize;
use std::io::{IsTerminal, Write as _};

use stemma_core::PersonId;

use crate::cmd::show::resolve_person;
use crate::context::CliContext;
use crate::output::{OutputMode, render, render_error};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Person to delete: id, unique id prefix, or exact name.
    pub person: String,

    /// Skip interactive confirmation prompt.
    #[arg(long)]
    pub force: bool,
}

fn confirm_delete(id: &PersonId, name: &str) -> anyhow::Result<bool> {
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        return Ok(true);
    }

    eprint!("Delete {id} '{name}'? [y/N] ");
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let answer = input.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[derive(Debug, Serialize)]
struct DeleteOutput {
    id: PersonId,
    name: String,
    cleared_me: bool,
}

pub fn run_delete(args: &DeleteArgs, mode: OutputMode, ctx: &CliContext) -> anyhow::Result<()> {
    let mut set = ctx.load_set()?;
    let id = match resolve_person(&set, &args.person) {
        Ok(id) => id,
        Err(err) => {
            render_error(mode, &err)?;
            anyhow::bail!("{}", err.message);
        }
    };

    let name = set.get(&id).map(|p| p.name.clone()).unwrap_or_default();
    if !args.force && !confirm_delete(&id, &name)? {
        anyhow::bail!("aborted");
    }

    set.remove(&id);
    ctx.save_set(&set)?;

    let mut state = ctx.load_state()?;
    let cleared_me = state.me.as_ref() == Some(&id);
    if cleared_me {
        state.me = None;
        ctx.save_state(&state)?;
    }

    let out = DeleteOutput {
        id,
        name,
        cleared_me,
    };
    render(mode, &out, |o, w| {
        writeln!(w, "deleted {} ({})", o.name, o.id)?;
        if o.cleared_me {
            writeln!(w, "cleared the me marker")?;
        }
        Ok(())
    })
}
