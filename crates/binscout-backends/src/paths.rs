//! Well-known binary directories and executable checks.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// Directories the unmanaged sweep inspects by default.
///
/// `/usr/local/bin` everywhere, the Apple Silicon Homebrew prefix on
/// macOS, plus the user's `~/.local/bin` and `~/bin`.
#[must_use]
pub fn common_binary_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/usr/local/bin")];

    if cfg!(target_os = "macos") {
        paths.push(PathBuf::from("/opt/homebrew/bin"));
    }

    if let Some(base) = BaseDirs::new() {
        let home = base.home_dir();
        paths.push(home.join(".local/bin"));
        paths.push(home.join("bin"));
    }

    paths
}

/// Check that a path is a regular file with an execute bit set.
///
/// Follows symlinks, so a Homebrew-style link into a Cellar counts as
/// long as its target is executable. Any I/O error reads as "no".
#[must_use]
pub fn is_executable(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    meta.is_file() && has_execute_bit(&meta)
}

#[cfg(unix)]
fn has_execute_bit(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_execute_bit(_meta: &std::fs::Metadata) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_paths_include_usr_local() {
        let paths = common_binary_paths();
        assert!(paths.contains(&PathBuf::from("/usr/local/bin")));
    }

    #[test]
    fn test_missing_path_is_not_executable() {
        assert!(!is_executable(Path::new("/nonexistent/definitely/missing")));
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_bit_required() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain");
        std::fs::write(&plain, b"#!/bin/sh\n").unwrap();
        assert!(!is_executable(&plain));

        std::fs::set_permissions(&plain, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(is_executable(&plain));

        // Directories never count, executable bit or not.
        assert!(!is_executable(dir.path()));
    }
}
