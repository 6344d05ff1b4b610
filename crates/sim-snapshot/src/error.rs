//! Error types for snapshot loading and model construction.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which end of a connection failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The `SourceID` column.
    Source,
    /// The `TargetID` column.
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

/// Errors that can occur while loading snapshots or building models from them.
///
/// Every variant is fatal to the current invocation: nothing is retried and
/// nothing is partially rendered.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A required column is missing or a value fails validation.
    #[error("schema error in {origin}: {message}")]
    Schema {
        /// File path or reader name the table came from.
        origin: String,
        /// What was wrong, including the data row when known.
        message: String,
    },

    /// An animation was requested with zero frames.
    #[error("cannot animate an empty snapshot sequence")]
    EmptySequence,

    /// A connection references a neuron id that does not exist.
    #[error("connection row {row} references unknown {endpoint} neuron {neuron_id}")]
    DanglingReference {
        /// 1-based data row of the offending connection.
        row: usize,
        /// Which endpoint was missing.
        endpoint: Endpoint,
        /// The id that could not be resolved.
        neuron_id: u32,
    },

    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SnapshotError {
    /// Builds a schema error for the given table origin.
    pub fn schema(origin: impl Into<String>, message: impl Into<String>) -> Self {
        SnapshotError::Schema {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Returns true for schema failures.
    pub fn is_schema(&self) -> bool {
        matches!(self, SnapshotError::Schema { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_reference_message() {
        let err = SnapshotError::DanglingReference {
            row: 3,
            endpoint: Endpoint::Target,
            neuron_id: 42,
        };
        assert_eq!(
            err.to_string(),
            "connection row 3 references unknown target neuron 42"
        );
    }

    #[test]
    fn test_schema_helper() {
        let err = SnapshotError::schema("grid.csv", "missing required column `X`");
        assert!(err.is_schema());
        assert_eq!(
            err.to_string(),
            "schema error in grid.csv: missing required column `X`"
        );
    }
}
