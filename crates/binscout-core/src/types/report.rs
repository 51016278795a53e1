//! Scan report — the aggregate that accumulates discovered binaries.

use std::collections::{BTreeMap, HashMap};

use super::Binary;

/// Accumulated results of one scan invocation.
///
/// The report owns every [`Binary`] it holds; the `conflicts` and
/// `unmanaged` views are index lists into the primary `binaries`
/// sequence, never copies. A report lives for one scan and is discarded
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// All binaries in discovery order
    binaries: Vec<Binary>,
    /// Name -> indices of same-named binaries, only for names with >= 2
    conflicts: BTreeMap<String, Vec<usize>>,
    /// Indices of binaries whose source is the unmanaged marker
    unmanaged: Vec<usize>,
}

impl ScanReport {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one binary, updating the unmanaged view incrementally.
    ///
    /// Callers are trusted to have populated `name` and `path` per the
    /// backend contract; no validation happens here.
    pub fn add(&mut self, binary: Binary) {
        let index = self.binaries.len();
        if binary.is_unmanaged() {
            self.unmanaged.push(index);
        }
        self.binaries.push(binary);
    }

    /// Group all current binaries by name and record every group with two
    /// or more members as a conflict, wiring up back-references between
    /// the members.
    ///
    /// Must be called exactly once per report, after all `add` calls: the
    /// conflict map is rebuilt from scratch on every call, but each call
    /// appends to the per-binary back-reference lists.
    pub fn detect_conflicts(&mut self) {
        // Stable grouping: order within a group follows insertion order.
        let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
        for (index, binary) in self.binaries.iter().enumerate() {
            groups.entry(&binary.name).or_default().push(index);
        }

        let mut conflicts = BTreeMap::new();
        let mut back_refs: Vec<(usize, Vec<usize>)> = Vec::new();
        for (name, group) in groups {
            if group.len() < 2 {
                continue;
            }
            for &member in &group {
                let others: Vec<usize> =
                    group.iter().copied().filter(|&j| j != member).collect();
                back_refs.push((member, others));
            }
            conflicts.insert(name.to_string(), group);
        }

        self.conflicts = conflicts;
        for (member, others) in back_refs {
            self.binaries[member].conflicting_with.extend(others);
        }
    }

    /// Total number of binaries discovered.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.binaries.len()
    }

    /// Number of names claimed by more than one binary.
    #[must_use]
    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    /// Number of binaries no package manager claims.
    #[must_use]
    pub fn unmanaged_count(&self) -> usize {
        self.unmanaged.len()
    }

    /// All binaries in discovery order.
    #[must_use]
    pub fn binaries(&self) -> &[Binary] {
        &self.binaries
    }

    /// Conflicting names with the members of each group.
    pub fn conflicts(&self) -> impl Iterator<Item = (&str, Vec<&Binary>)> {
        self.conflicts.iter().map(|(name, group)| {
            let members = group.iter().map(|&i| &self.binaries[i]).collect();
            (name.as_str(), members)
        })
    }

    /// Members of the conflict group for `name`, if that name conflicts.
    #[must_use]
    pub fn conflict_group(&self, name: &str) -> Option<Vec<&Binary>> {
        self.conflicts
            .get(name)
            .map(|group| group.iter().map(|&i| &self.binaries[i]).collect())
    }

    /// Binaries no package manager claims, in discovery order.
    pub fn unmanaged(&self) -> impl Iterator<Item = &Binary> {
        self.unmanaged.iter().map(|&i| &self.binaries[i])
    }

    /// The binaries a given record conflicts with.
    pub fn conflict_partners(&self, index: usize) -> impl Iterator<Item = &Binary> {
        self.binaries
            .get(index)
            .map(Binary::conflicting_with)
            .unwrap_or_default()
            .iter()
            .map(|&j| &self.binaries[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNMANAGED_SOURCE;

    fn bin(name: &str, path: &str, source: &str) -> Binary {
        Binary::new(name, path, source)
    }

    #[test]
    fn test_counts_track_adds() {
        let mut report = ScanReport::new();
        report.add(bin("node", "/opt/homebrew/bin/node", "homebrew"));
        report.add(bin("jq", "/opt/homebrew/bin/jq", "homebrew"));
        report.add(bin("mystery", "/usr/local/bin/mystery", UNMANAGED_SOURCE));

        assert_eq!(report.total_count(), 3);
        assert_eq!(report.unmanaged_count(), 1);
        assert_eq!(report.conflict_count(), 0);
        assert_eq!(
            report.unmanaged().map(|b| b.name.as_str()).collect::<Vec<_>>(),
            vec!["mystery"]
        );
    }

    #[test]
    fn test_conflict_grouping() {
        let mut report = ScanReport::new();
        report.add(
            bin("node", "/opt/homebrew/bin/node", "homebrew").with_version("20.0.0"),
        );
        report.add(bin("jq", "/opt/homebrew/bin/jq", "homebrew"));
        report.add(
            bin("node", "/usr/local/bin/node", UNMANAGED_SOURCE).with_version("18.0.0"),
        );

        report.detect_conflicts();

        assert_eq!(report.conflict_count(), 1);
        assert_eq!(report.unmanaged_count(), 1);
        let group = report.conflict_group("node").unwrap();
        assert_eq!(group.len(), 2);
        // Group order follows insertion order.
        assert_eq!(group[0].source, "homebrew");
        assert_eq!(group[1].source, UNMANAGED_SOURCE);
        assert!(report.conflict_group("jq").is_none());
    }

    #[test]
    fn test_back_references_exclude_self() {
        let mut report = ScanReport::new();
        report.add(bin("python", "/usr/bin/python", "pip"));
        report.add(bin("python", "/opt/homebrew/bin/python", "homebrew"));
        report.add(bin("python", "/usr/local/bin/python", UNMANAGED_SOURCE));

        report.detect_conflicts();

        for (index, binary) in report.binaries().iter().enumerate() {
            assert!(binary.has_conflicts());
            assert_eq!(binary.conflicting_with().len(), 2);
            assert!(!binary.conflicting_with().contains(&index));
            let partners: Vec<&str> = report
                .conflict_partners(index)
                .map(|b| b.name.as_str())
                .collect();
            assert_eq!(partners, vec!["python", "python"]);
        }
    }

    #[test]
    fn test_conflict_content_idempotent() {
        let mut report = ScanReport::new();
        report.add(bin("go", "/opt/homebrew/bin/go", "homebrew"));
        report.add(bin("go", "/usr/local/bin/go", UNMANAGED_SOURCE));

        report.detect_conflicts();
        let first: Vec<String> = report
            .conflicts()
            .map(|(name, group)| format!("{name}:{}", group.len()))
            .collect();

        // Repeat calls rebuild the same conflict map. Back-reference lists
        // are NOT protected against duplication; callers call this once.
        report.detect_conflicts();
        let second: Vec<String> = report
            .conflicts()
            .map(|(name, group)| format!("{name}:{}", group.len()))
            .collect();

        assert_eq!(first, second);
        assert_eq!(report.conflict_count(), 1);
    }

    #[test]
    fn test_identical_paths_still_conflict() {
        // Double-reported paths are not deduplicated before grouping.
        let mut report = ScanReport::new();
        report.add(bin("rg", "/usr/local/bin/rg", "homebrew"));
        report.add(bin("rg", "/usr/local/bin/rg", UNMANAGED_SOURCE));

        report.detect_conflicts();

        assert_eq!(report.conflict_count(), 1);
        assert_eq!(report.conflict_group("rg").unwrap().len(), 2);
    }

    #[test]
    fn test_empty_report() {
        let mut report = ScanReport::new();
        report.detect_conflicts();
        assert_eq!(report.total_count(), 0);
        assert_eq!(report.conflict_count(), 0);
        assert_eq!(report.unmanaged_count(), 0);
    }
}
