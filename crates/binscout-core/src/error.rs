use thiserror::Error;

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that can occur while discovering binaries
#[derive(Error, Debug)]
pub enum ScanError {
    /// External command could not be spawned
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        /// The command line that failed
        command: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// External command ran but exited with a failure status
    #[error("command '{command}' failed: {stderr}")]
    Command {
        /// The command line that failed
        command: String,
        /// Trimmed stderr from the tool
        stderr: String,
    },

    /// External command exceeded its deadline
    #[error("command '{command}' timed out after {secs} seconds")]
    Timeout {
        /// The command line that timed out
        command: String,
        /// Deadline in seconds
        secs: u64,
    },

    /// Tool output could not be interpreted
    #[error("unparsable {tool} output: {reason}")]
    Parse {
        /// The tool whose output was malformed
        tool: String,
        /// What was wrong with it
        reason: String,
    },

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No registered backend carries this name
    #[error("package manager '{name}' not found")]
    UnknownBackend {
        /// The requested backend name
        name: String,
    },

    /// The backend exists but its tool is not installed
    #[error("package manager '{name}' is not available on this system")]
    Unavailable {
        /// The requested backend name
        name: String,
    },

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ScanError {
    /// Returns true if the error identifies a backend the caller asked for
    /// by name, as opposed to a failure inside a scan.
    #[must_use]
    pub const fn is_lookup_error(&self) -> bool {
        matches!(self, Self::UnknownBackend { .. } | Self::Unavailable { .. })
    }
}
