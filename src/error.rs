//! Fatal error types. Non-fatal conditions (malformed records, capacity
//! overflow, unknown task references) are logged warnings, not errors —
//! see spec.md §7 and [`crate::parser`].

use std::path::PathBuf;

/// Errors that abort the run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A required input or output file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SimError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SimError::Io {
            path: path.into(),
            source,
        }
    }
}
