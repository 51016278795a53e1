//! Unmanaged sweep — executables no package manager claims.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::debug;
use walkdir::WalkDir;

use binscout_core::{Backend, Binary, Result, ScanContext, SweepBackend, UNMANAGED_SOURCE};

use crate::paths::{common_binary_paths, is_executable};

/// Sweeps well-known binary directories for ghost binaries.
///
/// Runs as the orchestrator's second phase: `set_known_binaries` must be
/// fed the names every other backend claimed before `scan`, otherwise the
/// sweep reports everything it finds.
pub struct ManualSweep {
    roots: Vec<PathBuf>,
    known: RwLock<HashSet<String>>,
}

impl ManualSweep {
    /// Sweep the platform's common binary directories.
    #[must_use]
    pub fn new() -> Self {
        Self::with_roots(common_binary_paths())
    }

    /// Sweep an explicit set of directories.
    #[must_use]
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            known: RwLock::new(HashSet::new()),
        }
    }

    /// Add directories on top of the current roots.
    #[must_use]
    pub fn with_extra_roots(mut self, extra: impl IntoIterator<Item = PathBuf>) -> Self {
        self.roots.extend(extra);
        self
    }
}

impl Default for ManualSweep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for ManualSweep {
    fn name(&self) -> &str {
        UNMANAGED_SOURCE
    }

    /// The sweep needs no external tool.
    async fn is_available(&self, _ctx: &ScanContext) -> bool {
        true
    }

    async fn scan(&self, _ctx: &ScanContext) -> Result<Vec<Binary>> {
        let known = self
            .known
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut binaries = Vec::new();
        for root in &self.roots {
            if !root.is_dir() {
                debug!(root = %root.display(), "skipping missing sweep directory");
                continue;
            }

            let entries = WalkDir::new(root)
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(std::result::Result::ok);

            for entry in entries {
                let name = entry.file_name().to_string_lossy().into_owned();
                if known.contains(&name) {
                    continue;
                }
                let path = entry.path();
                if !is_executable(path) {
                    continue;
                }
                binaries.push(Binary::new(name, path, UNMANAGED_SOURCE));
            }
        }

        Ok(binaries)
    }
}

impl SweepBackend for ManualSweep {
    /// Replaces any previously supplied set, so a reused sweep never
    /// carries names over from an earlier scan.
    fn set_known_binaries(&self, known: &[Binary]) {
        let mut set = HashSet::with_capacity(known.len());
        for binary in known {
            if let Some(name) = binary.path.file_name() {
                set.insert(name.to_string_lossy().into_owned());
            }
        }
        *self.known.write().unwrap_or_else(PoisonError::into_inner) = set;
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn write_executable(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_sweep_reports_unclaimed_executables() {
        let dir = tempfile::tempdir().unwrap();
        write_executable(dir.path(), "mystery");
        std::fs::write(dir.path().join("README"), b"not executable").unwrap();

        let sweep = ManualSweep::with_roots(vec![dir.path().to_path_buf()]);
        let binaries = sweep.scan(&ScanContext::new()).await.unwrap();

        assert_eq!(binaries.len(), 1);
        assert_eq!(binaries[0].name, "mystery");
        assert_eq!(binaries[0].source, UNMANAGED_SOURCE);
        assert!(binaries[0].is_unmanaged());
        assert_eq!(binaries[0].version, None);
    }

    #[tokio::test]
    async fn test_sweep_excludes_known_names() {
        let dir = tempfile::tempdir().unwrap();
        let node = write_executable(dir.path(), "node");
        write_executable(dir.path(), "mystery");

        let sweep = ManualSweep::with_roots(vec![dir.path().to_path_buf()]);
        sweep.set_known_binaries(&[Binary::new("node", node, "homebrew")]);

        let binaries = sweep.scan(&ScanContext::new()).await.unwrap();

        assert_eq!(binaries.len(), 1);
        assert_eq!(binaries[0].name, "mystery");
    }

    #[tokio::test]
    async fn test_set_known_binaries_replaces_previous_set() {
        let dir = tempfile::tempdir().unwrap();
        let node = write_executable(dir.path(), "node");

        let sweep = ManualSweep::with_roots(vec![dir.path().to_path_buf()]);
        sweep.set_known_binaries(&[Binary::new("node", node, "homebrew")]);
        // A later, empty set must not keep excluding "node".
        sweep.set_known_binaries(&[]);

        let binaries = sweep.scan(&ScanContext::new()).await.unwrap();
        assert_eq!(binaries.len(), 1);
        assert_eq!(binaries[0].name, "node");
    }

    #[tokio::test]
    async fn test_sweep_skips_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        write_executable(dir.path(), "tool");

        let sweep = ManualSweep::with_roots(vec![
            PathBuf::from("/nonexistent/sweep/dir"),
            dir.path().to_path_buf(),
        ]);

        let binaries = sweep.scan(&ScanContext::new()).await.unwrap();
        assert_eq!(binaries.len(), 1);
    }

    #[tokio::test]
    async fn test_sweep_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        write_executable(&nested, "hidden");

        let sweep = ManualSweep::with_roots(vec![dir.path().to_path_buf()]);
        let binaries = sweep.scan(&ScanContext::new()).await.unwrap();
        assert!(binaries.is_empty());
    }
}
