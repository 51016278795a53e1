//! Discovered binary record.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Source marker for binaries no package manager claims.
pub const UNMANAGED_SOURCE: &str = "manual";

/// One executable discovered on the host.
///
/// A `Binary` is plain data except for its conflict back-references, which
/// are written exactly once by [`ScanReport::detect_conflicts`] after all
/// backends have reported.
///
/// [`ScanReport::detect_conflicts`]: crate::ScanReport::detect_conflicts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binary {
    /// Base filename of `path`; backends derive it
    pub name: String,
    /// Absolute path on disk, never empty
    pub path: PathBuf,
    /// Name of the backend that discovered this binary ("homebrew",
    /// "npm", "pip", or [`UNMANAGED_SOURCE`])
    pub source: String,
    /// Version string, if the backend could determine one
    pub version: Option<String>,
    /// Owning package, empty when unknown
    pub package: String,
    /// Indices of same-named binaries in the owning report's primary
    /// sequence. Never contains this binary's own index.
    #[serde(skip)]
    pub(crate) conflicting_with: Vec<usize>,
}

impl Binary {
    /// Create a record with no version or package information.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            source: source.into(),
            version: None,
            package: String::new(),
            conflicting_with: Vec::new(),
        }
    }

    /// Set the version string.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the owning package.
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Returns true if no package manager claims this binary.
    #[must_use]
    pub fn is_unmanaged(&self) -> bool {
        self.source == UNMANAGED_SOURCE
    }

    /// Returns true if conflict detection found other binaries with this
    /// name.
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.conflicting_with.is_empty()
    }

    /// Indices of the binaries this record conflicts with, in the owning
    /// report's primary sequence.
    #[must_use]
    pub fn conflicting_with(&self) -> &[usize] {
        &self.conflicting_with
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path.display())?;
        if let Some(version) = &self.version {
            write!(f, " v{version}")?;
        }
        write!(f, " [{}]", self.source)
    }
}
