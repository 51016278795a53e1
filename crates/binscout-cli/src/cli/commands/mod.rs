//! Command implementations.

pub mod doctor;
pub mod list;
pub mod scan;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use binscout_backends::{standard_backends, CommandRunner, ManualSweep, SystemRunner};
use binscout_core::{ScanContext, Scanner};

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,

    /// Loaded configuration file
    pub config: Config,
}

impl Context {
    /// Execution context with the configured deadlines; a flag override
    /// wins over the config file.
    pub fn scan_context(&self, timeout_override: Option<u64>) -> ScanContext {
        let ctx = ScanContext::new();
        match timeout_override.or(self.config.command_timeout_secs) {
            Some(secs) => ctx.with_command_timeout(Duration::from_secs(secs)),
            None => ctx,
        }
    }

    /// Scanner over the standard backends plus the manual sweep.
    pub fn scanner(&self) -> Scanner {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new());
        let sweep = ManualSweep::new()
            .with_extra_roots(self.config.sweep_paths.iter().map(PathBuf::from));
        Scanner::new(standard_backends(runner)).with_sweep(Arc::new(sweep))
    }
}
