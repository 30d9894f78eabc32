//! `stm me` — show or set the "me" marker.
//!
//! The marker is application state, not a `Person` attribute; it lives in
//! the session-state file beside the tree.

use clap::Args;
use serde::Serialize;
use std::io::Write as _;

use crate::cmd::show::resolve_person;
use crate::context::CliContext;
use crate::output::{OutputMode, render, render_error};

#[derive(Args, Debug)]
pub struct MeArgs {
    /// Person to mark as me; omit to show the current marker.
    pub person: Option<String>,
}

#[derive(Debug, Serialize)]
struct MeOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

pub fn run_me(args: &MeArgs, mode: OutputMode, ctx: &CliContext) -> anyhow::Result<()> {
    let set = ctx.load_set()?;
    let mut state = ctx.load_state()?;

    if let Some(input) = &args.person {
        let id = match resolve_person(&set, input) {
            Ok(id) => id,
            Err(err) => {
                render_error(mode, &err)?;
                anyhow::bail!("{}", err.message);
            }
        };
        state.me = Some(id);
        ctx.save_state(&state)?;
    }

    let out = MeOutput {
        name: state
            .me
            .as_ref()
            .and_then(|id| set.get(id))
            .map(|p| p.name.clone()),
        id: state.me.as_ref().map(ToString::to_string),
    };

    render(mode, &out, |o, w| {
        match (&o.id, &o.name) {
            (Some(id), Some(name)) => writeln!(w, "me: {name} ({id})")?,
            (Some(id), None) => writeln!(w, "me: {id} (no longer in the tree)")?,
            _ => writeln!(w, "no me marker set")?,
        }
        Ok(())
    })
}
