//! `stm layout` — compute the positioned tree and auxiliary edges.
//!
//! JSON output is the renderer-facing contract: positioned nodes plus
//! primary/secondary/spousal edges with resolved coordinates.

use clap::Args;
use serde::Serialize;
use std::io::Write as _;

use stemma_core::ErrorCode;
use stemma_layout::{EdgeKind, LayoutEdge, PositionedNode, build_layout};

use crate::context::CliContext;
use crate::output::{CliError, OutputMode, render, render_error};

#[derive(Args, Debug)]
pub struct LayoutArgs {}

#[derive(Debug, Serialize)]
struct LayoutOutput {
    nodes: Vec<PositionedNode>,
    edges: Vec<LayoutEdge>,
}

pub fn run_layout(_args: &LayoutArgs, mode: OutputMode, ctx: &CliContext) -> anyhow::Result<()> {
    let set = ctx.load_set()?;

    let layout = match build_layout(&set, &ctx.config.layout) {
        Ok(layout) => layout,
        Err(err) => {
            let cli_err =
                CliError::new(err.to_string()).with_code(ErrorCode::InvalidStructure);
            render_error(mode, &cli_err)?;
            anyhow::bail!("{}", cli_err.message);
        }
    };

    let out = LayoutOutput {
        nodes: layout.nodes,
        edges: layout.edges,
    };

    render(mode, &out, |o, w| {
        let primaries = o.edges.iter().filter(|e| e.kind == EdgeKind::Primary).count();
        let secondaries = o
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Secondary)
            .count();
        let spousal = o.edges.iter().filter(|e| e.kind == EdgeKind::Spousal).count();

        for node in &o.nodes {
            writeln!(
                w,
                "{:<20} depth {:<3} ({:>8.1}, {:>8.1})",
                node.id, node.depth, node.x, node.y
            )?;
        }
        writeln!(
            w,
            "{} nodes; edges: {primaries} primary, {secondaries} secondary, {spousal} spousal",
            o.nodes.len()
        )?;
        Ok(())
    })
}
