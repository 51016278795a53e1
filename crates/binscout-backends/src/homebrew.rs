//! Homebrew backend — formulae and the binaries they link.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use binscout_core::{Backend, Binary, Result, ScanContext};

use crate::exec::CommandRunner;
use crate::paths::is_executable;

/// Prefixes Homebrew installs under (Apple Silicon, then Intel/Linux).
const DEFAULT_PREFIXES: &[&str] = &["/opt/homebrew", "/usr/local"];

/// Discovers binaries installed by Homebrew formulae.
pub struct Homebrew {
    runner: Arc<dyn CommandRunner>,
    prefixes: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct BrewInfo {
    #[serde(default)]
    formulae: Vec<Formula>,
}

#[derive(Debug, Deserialize)]
struct Formula {
    name: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    installed: Vec<InstalledVersion>,
}

#[derive(Debug, Deserialize)]
struct InstalledVersion {
    version: String,
}

impl Homebrew {
    /// Create a Homebrew backend over the given command runner.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            prefixes: DEFAULT_PREFIXES.iter().map(PathBuf::from).collect(),
        }
    }

    /// Override the install prefixes inspected for linked binaries.
    #[must_use]
    pub fn with_prefixes(mut self, prefixes: Vec<PathBuf>) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Resolve the binaries one formula links into a prefix's bin dir.
    async fn package_binaries(&self, ctx: &ScanContext, package: &str) -> Result<Vec<Binary>> {
        let output = self
            .runner
            .run(ctx, "brew", &["info", "--json=v2", package])
            .await?;
        let info: BrewInfo = serde_json::from_str(&output)?;

        let mut binaries = Vec::new();
        for formula in &info.formulae {
            // Prefer the actually-installed version over the formula's.
            let version = formula
                .installed
                .first()
                .map(|i| i.version.clone())
                .or_else(|| formula.version.clone());

            for prefix in &self.prefixes {
                let cellar = prefix.join("Cellar");
                if !cellar.is_dir() {
                    continue;
                }

                let mut found_in_cellar = false;
                if let Some(v) = &version {
                    let cellar_bin = cellar.join(&formula.name).join(v).join("bin");
                    if let Ok(entries) = std::fs::read_dir(&cellar_bin) {
                        for entry in entries.flatten() {
                            let name = entry.file_name().to_string_lossy().into_owned();
                            let linked = prefix.join("bin").join(&name);
                            if is_executable(&linked) {
                                found_in_cellar = true;
                                binaries.push(
                                    Binary::new(name, linked, self.name())
                                        .with_version(v.clone())
                                        .with_package(package),
                                );
                            }
                        }
                    }
                }

                if !found_in_cellar {
                    // Library-only or keg-only formulae sometimes still
                    // link a single binary named after themselves.
                    let linked = prefix.join("bin").join(&formula.name);
                    if is_executable(&linked) {
                        let mut binary = Binary::new(formula.name.clone(), linked, self.name())
                            .with_package(package);
                        if let Some(v) = &version {
                            binary = binary.with_version(v.clone());
                        }
                        binaries.push(binary);
                    }
                }
            }
        }

        Ok(binaries)
    }
}

#[async_trait]
impl Backend for Homebrew {
    fn name(&self) -> &str {
        "homebrew"
    }

    async fn is_available(&self, _ctx: &ScanContext) -> bool {
        self.runner.lookup("brew")
    }

    async fn scan(&self, ctx: &ScanContext) -> Result<Vec<Binary>> {
        let output = self
            .runner
            .run(ctx, "brew", &["list", "--formula"])
            .await?;

        let mut binaries = Vec::new();
        for package in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match self.package_binaries(ctx, package).await {
                Ok(found) => binaries.extend(found),
                Err(error) => {
                    // One broken formula shouldn't sink the whole scan.
                    debug!(package, %error, "skipping formula");
                }
            }
        }

        Ok(binaries)
    }
}
