//! `stm import` — bulk import through the extraction collaborator.
//!
//! Free text goes to the configured extraction endpoint (or a prepared
//! candidate file is read directly with `--candidates`, which needs no
//! network). The canonical set is only touched once a complete candidate
//! batch is in hand: a failed or empty extraction changes nothing.

use clap::Args;
use serde::Serialize;
use std::io::{Read as _, Write as _};
use std::path::PathBuf;

use stemma_core::reconcile::reconcile;
use stemma_core::resolve::resolve_candidates;
use stemma_core::{Candidate, ErrorCode};
use stemma_extract::{ExtractionContext, HttpExtractor, decode_candidates, extract_or_empty};

use crate::context::CliContext;
use crate::output::{CliError, OutputMode, render, render_error};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Free text describing family members; reads stdin when omitted.
    pub text: Option<String>,

    /// Read the free text from a file instead.
    #[arg(long, value_name = "PATH", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Skip extraction and read a prepared candidate JSON file.
    #[arg(long, value_name = "PATH", conflicts_with_all = ["text", "file"])]
    pub candidates: Option<PathBuf>,

    /// Override the configured extraction endpoint.
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct ImportReport {
    candidates: usize,
    created: usize,
    updated: usize,
    spouses_linked: usize,
    parents_linked: usize,
    names_dropped: usize,
    inferred_spouses: usize,
    inferred_parents: usize,
}

pub fn run_import(args: &ImportArgs, mode: OutputMode, ctx: &CliContext) -> anyhow::Result<()> {
    let mut set = ctx.load_set()?;

    let batch: Vec<Candidate> = if let Some(path) = &args.candidates {
        let content = std::fs::read_to_string(path)
            .map_err(|err| anyhow::anyhow!("failed to read {}: {err}", path.display()))?;
        decode_candidates(&content)
    } else {
        let text = read_text(args)?;
        if text.trim().is_empty() {
            anyhow::bail!("nothing to import: empty text");
        }

        let endpoint = args
            .endpoint
            .clone()
            .or_else(|| ctx.config.extractor_endpoint.clone());
        let Some(endpoint) = endpoint else {
            let err = CliError::new("no extraction endpoint configured")
                .with_code(ErrorCode::ExtractionFailure);
            render_error(mode, &err)?;
            anyhow::bail!("{}", err.message);
        };

        let extractor = HttpExtractor::new(endpoint);
        let context = ExtractionContext::from_set(&set);
        extract_or_empty(&extractor, &text, &context)
    };

    let mut report = ImportReport {
        candidates: batch.len(),
        ..ImportReport::default()
    };

    // Zero candidates — extraction failed or found nothing. The set is
    // left untouched either way.
    if !batch.is_empty() {
        let (lookup, resolve_report) = resolve_candidates(&mut set, &batch, ctx.now_millis());
        let reconcile_report = reconcile(&mut set, &batch, &lookup);
        ctx.save_set(&set)?;

        report.created = resolve_report.created;
        report.updated = resolve_report.updated;
        report.spouses_linked = reconcile_report.explicit.spouses_linked;
        report.parents_linked = reconcile_report.explicit.parents_linked;
        report.names_dropped = reconcile_report.explicit.names_dropped;
        report.inferred_spouses = reconcile_report.propagation.mirrored_spouses;
        report.inferred_parents = reconcile_report.propagation.completed_parents;
    }

    render(mode, &report, |r, w| {
        if r.candidates == 0 {
            writeln!(w, "no candidates produced; tree unchanged")?;
            return Ok(());
        }
        writeln!(
            w,
            "{} candidates: {} created, {} updated",
            r.candidates, r.created, r.updated
        )?;
        writeln!(
            w,
            "links: {} spouses, {} parents ({} inferred spouses, {} inferred parents)",
            r.spouses_linked, r.parents_linked, r.inferred_spouses, r.inferred_parents
        )?;
        if r.names_dropped > 0 {
            writeln!(w, "{} relationship names did not resolve", r.names_dropped)?;
        }
        Ok(())
    })
}

fn read_text(args: &ImportArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .map_err(|err| anyhow::anyhow!("failed to read {}: {err}", path.display()));
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
