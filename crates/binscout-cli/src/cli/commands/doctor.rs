//! `binscout doctor` - check which package managers are available.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use binscout_backends::{standard_backends, CommandRunner, ManualSweep, SystemRunner};

use super::Context;

pub async fn execute(ctx: Context) -> Result<()> {
    let scan_ctx = ctx.scan_context(None);

    println!(
        "{} Platform: {} ({})",
        "i".cyan(),
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    println!();
    println!("Package managers:");

    let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new());
    let mut backends = standard_backends(runner);
    backends.push(Arc::new(ManualSweep::new()));

    for backend in &backends {
        let status = if backend.is_available(&scan_ctx).await {
            "available".green()
        } else {
            "not installed".red()
        };
        println!("  {:10} {status}", backend.name());
    }

    Ok(())
}
