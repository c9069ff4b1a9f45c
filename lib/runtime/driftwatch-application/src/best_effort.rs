use anyhow::Result;
use tracing::warn;

/// Runs one external call, logging a failure as a warning instead of
/// propagating it. Every outbound call site in a cycle goes through here.
pub fn attempt<T>(operation: &str, call: impl FnOnce() -> Result<T>) -> Option<T> {
    match call() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Failed to {operation}: {err:#}");
            None
        }
    }
}
