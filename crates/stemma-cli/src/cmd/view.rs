//! `stm view` — decode a shared payload and list its people.
//!
//! Shared trees are read-only projections: viewing never touches the
//! local tree file. Pass `--adopt` to replace the local tree with the
//! decoded one.

use clap::Args;
use serde::Serialize;
use std::io::Write as _;

use stemma_core::{ErrorCode, share};

use crate::context::CliContext;
use crate::output::{CliError, OutputMode, render, render_error};

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Encoded share payload.
    pub payload: String,

    /// Replace the local tree with the decoded one.
    #[arg(long)]
    pub adopt: bool,
}

#[derive(Debug, Serialize)]
struct ViewRow {
    id: String,
    name: String,
    gender: String,
}

#[derive(Debug, Serialize)]
struct ViewOutput {
    people: Vec<ViewRow>,
    adopted: bool,
}

pub fn run_view(args: &ViewArgs, mode: OutputMode, ctx: &CliContext) -> anyhow::Result<()> {
    let set = match share::decode(&args.payload) {
        Ok(set) => set,
        Err(err) => {
            let cli_err =
                CliError::new(err.to_string()).with_code(ErrorCode::ShareDecodeFailed);
            render_error(mode, &cli_err)?;
            anyhow::bail!("{}", cli_err.message);
        }
    };

    if args.adopt {
        ctx.save_set(&set)?;
    }

    let out = ViewOutput {
        people: set
            .iter()
            .map(|p| ViewRow {
                id: p.id.to_string(),
                name: p.name.clone(),
                gender: p.gender.to_string(),
            })
            .collect(),
        adopted: args.adopt,
    };

    render(mode, &out, |o, w| {
        for p in &o.people {
            writeln!(w, "{:<20} {:<20} {}", p.id, p.name, p.gender)?;
        }
        writeln!(w, "{} people (shared, read-only)", o.people.len())?;
        if o.adopted {
            writeln!(w, "adopted as the local tree")?;
        }
        Ok(())
    })
}
