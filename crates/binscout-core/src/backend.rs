//! Backend contract — the capability every discovery source implements.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Binary;

/// Default deadline for one external tool invocation.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Default deadline for an availability probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Execution context carried into every probe and scan.
///
/// Deadlines apply per external command, independent of how long the
/// overall scan takes.
#[derive(Debug, Clone)]
pub struct ScanContext {
    /// Deadline for one external tool invocation
    pub command_timeout: Duration,
    /// Deadline for an availability probe
    pub probe_timeout: Duration,
}

impl Default for ScanContext {
    fn default() -> Self {
        Self {
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl ScanContext {
    /// Context with the default deadlines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the per-command deadline.
    #[must_use]
    pub const fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Override the availability-probe deadline.
    #[must_use]
    pub const fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}

/// A discovery source attributing binaries to one package manager (or to
/// none at all).
///
/// Implementations shell out to their tool, parse its output, and map the
/// result into [`Binary`] records; the orchestrator makes no assumption
/// about the tool's output format. A scan may fail with a backend-specific
/// error but must never panic.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Stable identifier, used as `Binary::source` and for filtering.
    fn name(&self) -> &str;

    /// Probe whether the underlying tool exists on this host.
    ///
    /// Must complete quickly and never block indefinitely; any probe
    /// error reads as "not available", not as a failure.
    async fn is_available(&self, ctx: &ScanContext) -> bool;

    /// Discover every binary this backend can attribute.
    async fn scan(&self, ctx: &ScanContext) -> Result<Vec<Binary>>;
}

/// A backend that sweeps for binaries *nobody else* claims.
///
/// The sweep must observe the names every other backend reported before
/// it runs, so the orchestrator schedules it as a second phase after the
/// concurrent phase's barrier. Interior mutability keeps the setter
/// callable through a shared handle.
pub trait SweepBackend: Backend {
    /// Supply the binaries already claimed by other backends so the sweep
    /// can exclude their names. Replaces any previously supplied set.
    fn set_known_binaries(&self, known: &[Binary]);
}
