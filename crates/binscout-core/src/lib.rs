//! # binscout-core
//!
//! Data model, backend contract, and scan orchestration for binscout.
//!
//! A scan runs every available discovery [`Backend`] concurrently, merges
//! each one's binaries into a single [`ScanReport`], then classifies the
//! result: binaries nobody claims are *ghosts*, same-named binaries from
//! different places are *conflicts*.
//!
//! ## Scan phases
//!
//! ```text
//! probe      is_available() per backend; unavailable backends drop out
//! scan       one task per backend, batches merged under one lock
//! barrier    every task joined; failures collected, never fatal
//! sweep      the unmanaged sweep runs last, against the claimed names
//! resolve    detect_conflicts() exactly once over the final report
//! ```
//!
//! The concrete backends live in `binscout-backends`; this crate knows
//! nothing about any particular package manager.

mod backend;
mod error;
mod scanner;
mod types;

pub use backend::{
    Backend, ScanContext, SweepBackend, DEFAULT_COMMAND_TIMEOUT, DEFAULT_PROBE_TIMEOUT,
};
pub use error::{Result, ScanError};
pub use scanner::{BackendFailure, ScanOutcome, Scanner};
pub use types::{Binary, ScanReport, UNMANAGED_SOURCE};
