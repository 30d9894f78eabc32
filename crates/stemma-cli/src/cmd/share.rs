//! `stm share` — encode the tree into a transportable payload.

use clap::Args;
use serde::Serialize;
use std::io::Write as _;

use stemma_core::share;

use crate::context::CliContext;
use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct ShareArgs {}

#[derive(Debug, Serialize)]
struct ShareOutput {
    payload: String,
    people: usize,
}

pub fn run_share(_args: &ShareArgs, mode: OutputMode, ctx: &CliContext) -> anyhow::Result<()> {
    let set = ctx.load_set()?;
    let out = ShareOutput {
        payload: share::encode(&set),
        people: set.len(),
    };

    render(mode, &out, |o, w| {
        writeln!(w, "{}", o.payload)?;
        Ok(())
    })
}
