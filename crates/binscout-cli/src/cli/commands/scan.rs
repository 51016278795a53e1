//! `binscout scan` - discover binaries across all package managers.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use super::Context;
use crate::cli::args::ScanArgs;
use crate::output::{self, RenderOptions};

pub async fn execute(ctx: Context, args: ScanArgs) -> Result<()> {
    let scanner = ctx.scanner();
    let scan_ctx = ctx.scan_context(args.timeout);

    let spinner = scan_spinner(&ctx);

    let (report, warning) = if let Some(manager) = &args.manager {
        let report = match scanner.scan_single(&scan_ctx, manager).await {
            Ok(report) => report,
            Err(error) => {
                spinner.finish_and_clear();
                return Err(error.into());
            }
        };
        (report, None)
    } else {
        let outcome = scanner.scan(&scan_ctx).await;
        let warning = outcome.warning();
        (outcome.report, warning)
    };

    spinner.finish_and_clear();

    // Partial scans are advisory: report what succeeded, warn about the rest.
    if let Some(warning) = warning {
        eprintln!("{}", format!("warning: {warning}").yellow());
    }

    output::render(
        &report,
        &RenderOptions {
            format: ctx.output_format,
            ..RenderOptions::default()
        },
    )
}

fn scan_spinner(ctx: &Context) -> ProgressBar {
    if ctx.output_format.is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Scanning system for binaries...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
