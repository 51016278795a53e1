//! Scan orchestration — run every available backend concurrently and
//! merge their results into one report.

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::backend::{Backend, ScanContext, SweepBackend};
use crate::error::{Result, ScanError};
use crate::types::ScanReport;

/// One backend's scan failure, named so callers can attribute it.
#[derive(Debug)]
pub struct BackendFailure {
    /// Name of the backend that failed
    pub backend: String,
    /// What went wrong
    pub error: ScanError,
}

impl fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.backend, self.error)
    }
}

/// Finalized report plus whatever went wrong along the way.
///
/// Failures are advisory: the report is complete for every backend that
/// succeeded, and callers decide whether a partial scan is acceptable.
#[derive(Debug)]
pub struct ScanOutcome {
    /// The finalized, conflict-resolved report
    pub report: ScanReport,
    /// Per-backend scan failures, empty when every backend succeeded
    pub failures: Vec<BackendFailure>,
}

impl ScanOutcome {
    /// Returns true if at least one backend failed to scan.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Aggregated warning text naming each failed backend, or `None`
    /// when the scan was clean.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let causes: Vec<String> = self.failures.iter().map(ToString::to_string).collect();
        Some(format!("some scans failed: {}", causes.join("; ")))
    }
}

/// Orchestrates scanning across discovery backends.
///
/// Backends are supplied explicitly at construction; there is no global
/// registry. An optional sweep backend runs as a second phase, after
/// every concurrent backend has merged, because it must observe the full
/// set of claimed names before it can tell which binaries are unmanaged.
pub struct Scanner {
    backends: Vec<Arc<dyn Backend>>,
    sweep: Option<Arc<dyn SweepBackend>>,
}

impl Scanner {
    /// Create a scanner over an explicit, ordered list of backends.
    #[must_use]
    pub fn new(backends: Vec<Arc<dyn Backend>>) -> Self {
        Self {
            backends,
            sweep: None,
        }
    }

    /// Register the unmanaged-sweep backend for the second scan phase.
    #[must_use]
    pub fn with_sweep(mut self, sweep: Arc<dyn SweepBackend>) -> Self {
        self.sweep = Some(sweep);
        self
    }

    /// Run every available backend concurrently and aggregate results.
    ///
    /// A backend that fails its availability probe is skipped without an
    /// error; a backend whose scan fails is recorded in the outcome's
    /// failures without aborting its siblings. Conflict detection runs
    /// exactly once, after the sweep phase.
    pub async fn scan(&self, ctx: &ScanContext) -> ScanOutcome {
        let report = Arc::new(Mutex::new(ScanReport::new()));
        let mut failures = Vec::new();

        // Probe phase: unavailable backends are expected, not exceptional.
        let mut available = Vec::new();
        for backend in &self.backends {
            if Self::probe(ctx, backend.as_ref()).await {
                available.push(Arc::clone(backend));
            } else {
                debug!(backend = backend.name(), "backend unavailable, skipping");
            }
        }

        // Concurrent phase: one task per backend. Each successful batch is
        // appended under the report lock; the lock is never held across an
        // external command.
        let mut tasks = JoinSet::new();
        for backend in available {
            let report = Arc::clone(&report);
            let ctx = ctx.clone();
            tasks.spawn(async move {
                match backend.scan(&ctx).await {
                    Ok(batch) => {
                        debug!(
                            backend = backend.name(),
                            count = batch.len(),
                            "backend scan complete"
                        );
                        let mut report = report.lock().await;
                        for binary in batch {
                            report.add(binary);
                        }
                        None
                    }
                    Err(error) => Some(BackendFailure {
                        backend: backend.name().to_string(),
                        error,
                    }),
                }
            });
        }

        // Barrier: every launched task is joined exactly once.
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(failure)) => {
                    warn!(%failure, "backend scan failed");
                    failures.push(failure);
                }
                Ok(None) => {}
                Err(join_error) => failures.push(BackendFailure {
                    backend: "scan task".to_string(),
                    error: ScanError::Internal(join_error.to_string()),
                }),
            }
        }

        // Sweep phase: runs only after the barrier, so it observes every
        // name the concurrent backends claimed.
        if let Some(sweep) = &self.sweep {
            if Self::probe(ctx, sweep.as_ref()).await {
                {
                    let report = report.lock().await;
                    sweep.set_known_binaries(report.binaries());
                }
                match sweep.scan(ctx).await {
                    Ok(batch) => {
                        let mut report = report.lock().await;
                        for binary in batch {
                            report.add(binary);
                        }
                    }
                    Err(error) => {
                        let failure = BackendFailure {
                            backend: sweep.name().to_string(),
                            error,
                        };
                        warn!(%failure, "sweep scan failed");
                        failures.push(failure);
                    }
                }
            }
        }

        // All tasks joined; the clone fallback is unreachable in practice.
        let mut report = match Arc::try_unwrap(report) {
            Ok(mutex) => mutex.into_inner(),
            Err(arc) => arc.lock().await.clone(),
        };
        report.detect_conflicts();

        ScanOutcome { report, failures }
    }

    /// Scan exactly one backend, bypassing concurrency.
    ///
    /// Fails with [`ScanError::UnknownBackend`] when no backend carries
    /// `name`, and with [`ScanError::Unavailable`] when the backend exists
    /// but its tool is not installed. The sweep backend may be named too;
    /// it runs with an empty known set.
    pub async fn scan_single(&self, ctx: &ScanContext, name: &str) -> Result<ScanReport> {
        if let Some(backend) = self.backends.iter().find(|b| b.name() == name) {
            return Self::run_one(ctx, backend.as_ref()).await;
        }
        if let Some(sweep) = self.sweep.as_deref() {
            if sweep.name() == name {
                sweep.set_known_binaries(&[]);
                return Self::run_one(ctx, sweep).await;
            }
        }
        Err(ScanError::UnknownBackend {
            name: name.to_string(),
        })
    }

    async fn run_one<B: Backend + ?Sized>(ctx: &ScanContext, backend: &B) -> Result<ScanReport> {
        if !Self::probe(ctx, backend).await {
            return Err(ScanError::Unavailable {
                name: backend.name().to_string(),
            });
        }

        let mut report = ScanReport::new();
        for binary in backend.scan(ctx).await? {
            report.add(binary);
        }
        report.detect_conflicts();
        Ok(report)
    }

    /// Probe availability under the probe deadline; a probe that runs past
    /// it reads as unavailable.
    async fn probe<B: Backend + ?Sized>(ctx: &ScanContext, backend: &B) -> bool {
        timeout(ctx.probe_timeout, backend.is_available(ctx))
            .await
            .unwrap_or(false)
    }
}
