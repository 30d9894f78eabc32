//! `stm verify` — check every graph invariant and report violations.
//!
//! Exits non-zero when violations exist, so scripts can gate on a clean
//! tree.

use clap::Args;
use serde::Serialize;
use std::io::Write as _;

use stemma_core::verify::check;

use crate::context::CliContext;
use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct VerifyArgs {}

#[derive(Debug, Serialize)]
struct VerifyOutput {
    people: usize,
    violations: Vec<String>,
}

pub fn run_verify(_args: &VerifyArgs, mode: OutputMode, ctx: &CliContext) -> anyhow::Result<()> {
    let set = ctx.load_set()?;
    let violations = check(&set);

    let out = VerifyOutput {
        people: set.len(),
        violations: violations.iter().map(ToString::to_string).collect(),
    };

    render(mode, &out, |o, w| {
        if o.violations.is_empty() {
            writeln!(w, "ok: {} people, no violations", o.people)?;
        } else {
            for v in &o.violations {
                writeln!(w, "violation: {v}")?;
            }
            writeln!(w, "{} violations in {} people", o.violations.len(), o.people)?;
        }
        Ok(())
    })?;

    if !violations.is_empty() {
        anyhow::bail!("{} invariant violations", violations.len());
    }
    Ok(())
}
