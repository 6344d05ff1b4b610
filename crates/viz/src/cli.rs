//! Shared command-line helpers for the viewer binaries.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber, honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();
}

/// Path of `name` in the directory holding the running executable.
///
/// Falls back to `name` relative to the working directory when the
/// executable path is unavailable.
pub fn sibling_path(name: &str) -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => exe.with_file_name(name),
        Err(e) => {
            tracing::warn!("Cannot locate executable ({}), using ./{}", e, name);
            PathBuf::from(name)
        }
    }
}
