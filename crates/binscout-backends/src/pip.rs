//! pip backend — console binaries of installed Python packages.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use directories::BaseDirs;
use serde::Deserialize;
use tracing::debug;

use binscout_core::{Backend, Binary, Result, ScanContext};

use crate::exec::CommandRunner;
use crate::paths::is_executable;

/// Discovers console binaries installed by pip.
pub struct Pip {
    runner: Arc<dyn CommandRunner>,
}

#[derive(Debug, Deserialize)]
struct PipPackage {
    name: String,
    #[serde(default)]
    version: Option<String>,
}

impl Pip {
    /// Create a pip backend over the given command runner.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Prefer pip3, fall back to pip.
    fn pip_command(&self) -> &'static str {
        if self.runner.lookup("pip3") {
            "pip3"
        } else {
            "pip"
        }
    }

    /// Find the console binary for one package, if it has any.
    async fn package_binary(
        &self,
        ctx: &ScanContext,
        pip: &str,
        package: &PipPackage,
    ) -> Result<Option<Binary>> {
        let output = self.runner.run(ctx, pip, &["show", &package.name]).await?;

        let mut location = None;
        let mut shown_name = None;
        for line in output.lines() {
            if let Some(rest) = line.strip_prefix("Location:") {
                location = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("Name:") {
                shown_name = Some(rest.trim().to_string());
            }
        }

        let Some(location) = location.filter(|l| !l.is_empty()) else {
            return Ok(None);
        };

        // Scripts usually land next to the site-packages tree, with the
        // usual system/user dirs as fallbacks.
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(parent) = Path::new(&location).parent() {
            candidates.push(parent.join("bin"));
        }
        candidates.push(PathBuf::from("/usr/local/bin"));
        if let Some(base) = BaseDirs::new() {
            candidates.push(base.home_dir().join(".local/bin"));
        }

        let name = shown_name.unwrap_or_else(|| package.name.clone());
        let binary_name = package.name.to_lowercase();
        for dir in candidates {
            let path = dir.join(&binary_name);
            if is_executable(&path) {
                let mut binary =
                    Binary::new(name, path, self.name()).with_package(package.name.clone());
                if let Some(version) = &package.version {
                    binary = binary.with_version(version.clone());
                }
                return Ok(Some(binary));
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl Backend for Pip {
    fn name(&self) -> &str {
        "pip"
    }

    async fn is_available(&self, _ctx: &ScanContext) -> bool {
        self.runner.lookup("pip3") || self.runner.lookup("pip")
    }

    async fn scan(&self, ctx: &ScanContext) -> Result<Vec<Binary>> {
        let pip = self.pip_command();
        let output = self
            .runner
            .run(ctx, pip, &["list", "--format=json"])
            .await?;
        let packages: Vec<PipPackage> = serde_json::from_str(&output)?;

        let mut binaries = Vec::new();
        for package in &packages {
            match self.package_binary(ctx, pip, package).await {
                Ok(Some(binary)) => binaries.push(binary),
                Ok(None) => {}
                Err(error) => {
                    debug!(package = %package.name, %error, "skipping package");
                }
            }
        }

        Ok(binaries)
    }
}
