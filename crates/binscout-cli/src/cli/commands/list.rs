//! `binscout list` - filtered views over a fresh scan.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::ListArgs;
use crate::output::{self, RenderOptions};

pub async fn execute(ctx: Context, args: ListArgs) -> Result<()> {
    let scanner = ctx.scanner();
    let scan_ctx = ctx.scan_context(None);

    let outcome = scanner.scan(&scan_ctx).await;
    if let Some(warning) = outcome.warning() {
        eprintln!("{}", format!("warning: {warning}").yellow());
    }

    output::render(
        &outcome.report,
        &RenderOptions {
            format: ctx.output_format,
            ghosts_only: args.ghosts,
            conflicts_only: args.conflicts,
        },
    )
}
