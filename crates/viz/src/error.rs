//! Error type for the viewers.

use sim_snapshot::SnapshotError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end a viewer invocation.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The supplied layout does not have one position per node.
    #[error("layout has {found} positions for {expected} nodes")]
    LayoutMismatch { expected: usize, found: usize },

    /// The window loop exited with an error code.
    #[error("viewer exited with code {0}")]
    AppExit(u8),
}

impl ViewerError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ViewerError::AppExit(code) => *code,
            _ => 1,
        }
    }
}
