//! # binscout-backends
//!
//! Concrete discovery backends for binscout: Homebrew, npm, pip, and the
//! manual sweep that catches whatever nobody claims.
//!
//! Each backend implements the [`Backend`] contract from `binscout-core`
//! and talks to its tool through the [`CommandRunner`] seam, which keeps
//! parsers testable without any package manager installed.
//!
//! [`Backend`]: binscout_core::Backend

mod exec;
mod homebrew;
mod manual;
mod npm;
mod paths;
mod pip;

pub use exec::{CommandRunner, SystemRunner};
pub use homebrew::Homebrew;
pub use manual::ManualSweep;
pub use npm::Npm;
pub use paths::{common_binary_paths, is_executable};
pub use pip::Pip;

use std::sync::Arc;

use binscout_core::Backend;

/// The standard package-manager backends, in probe order.
///
/// The sweep is not included; register a [`ManualSweep`] separately via
/// `Scanner::with_sweep` so it runs after the concurrent phase.
#[must_use]
pub fn standard_backends(runner: Arc<dyn CommandRunner>) -> Vec<Arc<dyn Backend>> {
    vec![
        Arc::new(Homebrew::new(Arc::clone(&runner))),
        Arc::new(Npm::new(Arc::clone(&runner))),
        Arc::new(Pip::new(runner)),
    ]
}
