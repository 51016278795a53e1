//! npm backend — globally installed packages.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use binscout_core::{Backend, Binary, Result, ScanContext, ScanError};

use crate::exec::CommandRunner;

/// Discovers binaries installed globally by npm.
pub struct Npm {
    runner: Arc<dyn CommandRunner>,
}

#[derive(Debug, Deserialize)]
struct NpmList {
    // BTreeMap keeps the report order stable across runs.
    #[serde(default)]
    dependencies: BTreeMap<String, NpmDependency>,
}

#[derive(Debug, Deserialize)]
struct NpmDependency {
    #[serde(default)]
    version: Option<String>,
}

impl Npm {
    /// Create an npm backend over the given command runner.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Backend for Npm {
    fn name(&self) -> &str {
        "npm"
    }

    async fn is_available(&self, _ctx: &ScanContext) -> bool {
        self.runner.lookup("npm")
    }

    async fn scan(&self, ctx: &ScanContext) -> Result<Vec<Binary>> {
        // npm exits non-zero on peer-dependency noise while still printing
        // the tree, so take whatever stdout it gives us.
        let output = self
            .runner
            .run_lenient(ctx, "npm", &["list", "-g", "--depth=0", "--json"])
            .await?;
        let list: NpmList = serde_json::from_str(&output)?;

        let bin_dir = self.runner.run(ctx, "npm", &["bin", "-g"]).await?;
        let bin_dir = Path::new(bin_dir.trim());
        if bin_dir.as_os_str().is_empty() {
            return Err(ScanError::Parse {
                tool: "npm".to_string(),
                reason: "empty global bin directory".to_string(),
            });
        }

        let mut binaries = Vec::new();
        for (name, dependency) in list.dependencies {
            let path = bin_dir.join(&name);
            let mut binary = Binary::new(name.clone(), path, self.name()).with_package(name);
            if let Some(version) = dependency.version {
                binary = binary.with_version(version);
            }
            binaries.push(binary);
        }

        Ok(binaries)
    }
}
