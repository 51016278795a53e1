//! Rendering for scan reports — tables and JSON.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tabled::{settings::Style, Table, Tabled};

use binscout_core::{Binary, ScanReport};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed table
    #[default]
    Table,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// Returns true for machine-readable output.
    #[must_use]
    pub fn is_json(self) -> bool {
        self == Self::Json
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// How to render a report.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderOptions {
    /// Table or JSON
    pub format: OutputFormat,
    /// Show only ghost binaries
    pub ghosts_only: bool,
    /// Show only binaries with name conflicts
    pub conflicts_only: bool,
}

impl RenderOptions {
    fn keeps(&self, binary: &Binary) -> bool {
        if self.ghosts_only {
            binary.is_unmanaged()
        } else if self.conflicts_only {
            binary.has_conflicts()
        } else {
            true
        }
    }
}

#[derive(Tabled)]
struct BinaryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Conflicts With")]
    conflicts: String,
}

#[derive(Serialize)]
struct ReportView {
    binaries: Vec<BinaryView>,
    conflicts: Vec<ConflictView>,
    summary: Summary,
}

#[derive(Serialize)]
struct BinaryView {
    name: String,
    path: String,
    source: String,
    version: Option<String>,
    package: String,
    conflicts_with: Vec<String>,
}

#[derive(Serialize)]
struct ConflictView {
    name: String,
    members: Vec<ConflictMember>,
}

#[derive(Serialize)]
struct ConflictMember {
    source: String,
    version: Option<String>,
    path: String,
}

#[derive(Serialize)]
struct Summary {
    total: usize,
    conflicts: usize,
    ghosts: usize,
}

/// Render a finalized report to stdout. Never mutates the report.
pub fn render(report: &ScanReport, options: &RenderOptions) -> Result<()> {
    match options.format {
        OutputFormat::Json => render_json(report, options),
        OutputFormat::Table => {
            render_table(report, options);
            Ok(())
        }
    }
}

fn render_json(report: &ScanReport, options: &RenderOptions) -> Result<()> {
    let binaries = report
        .binaries()
        .iter()
        .enumerate()
        .filter(|(_, binary)| options.keeps(binary))
        .map(|(index, binary)| BinaryView {
            name: binary.name.clone(),
            path: binary.path.display().to_string(),
            source: binary.source.clone(),
            version: binary.version.clone(),
            package: binary.package.clone(),
            conflicts_with: report
                .conflict_partners(index)
                .map(|partner| partner.path.display().to_string())
                .collect(),
        })
        .collect();

    let conflicts = report
        .conflicts()
        .map(|(name, members)| ConflictView {
            name: name.to_string(),
            members: members
                .into_iter()
                .map(|binary| ConflictMember {
                    source: binary.source.clone(),
                    version: binary.version.clone(),
                    path: binary.path.display().to_string(),
                })
                .collect(),
        })
        .collect();

    let view = ReportView {
        binaries,
        conflicts,
        summary: Summary {
            total: report.total_count(),
            conflicts: report.conflict_count(),
            ghosts: report.unmanaged_count(),
        },
    };

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn render_table(report: &ScanReport, options: &RenderOptions) {
    let rows: Vec<BinaryRow> = report
        .binaries()
        .iter()
        .enumerate()
        .filter(|(_, binary)| options.keeps(binary))
        .map(|(index, binary)| BinaryRow {
            name: binary.name.clone(),
            version: binary.version.clone().unwrap_or_else(|| "-".to_string()),
            source: binary.source.clone(),
            package: if binary.package.is_empty() {
                "-".to_string()
            } else {
                binary.package.clone()
            },
            path: binary.path.display().to_string(),
            conflicts: describe_partners(report, index),
        })
        .collect();

    if rows.is_empty() {
        println!("{}", "No binaries found.".dimmed());
    } else {
        let table = Table::new(&rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    println!();
    let conflicts = report.conflict_count();
    let ghosts = report.unmanaged_count();
    println!(
        "{} binaries, {} conflicting names, {} ghosts",
        report.total_count().to_string().bold(),
        if conflicts > 0 {
            conflicts.to_string().red().bold()
        } else {
            conflicts.to_string().green()
        },
        if ghosts > 0 {
            ghosts.to_string().yellow().bold()
        } else {
            ghosts.to_string().green()
        }
    );
}

fn describe_partners(report: &ScanReport, index: usize) -> String {
    let partners: Vec<String> = report
        .conflict_partners(index)
        .map(|partner| match &partner.version {
            Some(version) => format!("{} v{}", partner.source, version),
            None => partner.source.clone(),
        })
        .collect();
    if partners.is_empty() {
        "-".to_string()
    } else {
        partners.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binscout_core::UNMANAGED_SOURCE;

    fn sample_report() -> ScanReport {
        let mut report = ScanReport::new();
        report.add(
            Binary::new("node", "/opt/homebrew/bin/node", "homebrew").with_version("20.0.0"),
        );
        report.add(
            Binary::new("node", "/usr/local/bin/node", UNMANAGED_SOURCE).with_version("18.0.0"),
        );
        report.add(Binary::new("jq", "/opt/homebrew/bin/jq", "homebrew"));
        report.detect_conflicts();
        report
    }

    #[test]
    fn test_filters() {
        let report = sample_report();

        let everything = RenderOptions::default();
        assert_eq!(
            report.binaries().iter().filter(|b| everything.keeps(b)).count(),
            3
        );

        let ghosts = RenderOptions {
            ghosts_only: true,
            ..RenderOptions::default()
        };
        assert_eq!(
            report.binaries().iter().filter(|b| ghosts.keeps(b)).count(),
            1
        );

        let conflicts = RenderOptions {
            conflicts_only: true,
            ..RenderOptions::default()
        };
        assert_eq!(
            report.binaries().iter().filter(|b| conflicts.keeps(b)).count(),
            2
        );
    }

    #[test]
    fn test_partner_descriptions() {
        let report = sample_report();
        let description = describe_partners(&report, 0);
        assert_eq!(description, "manual v18.0.0");
        assert_eq!(describe_partners(&report, 2), "-");
    }
}
