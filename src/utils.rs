//! File system and argument helpers for the CLI driver.

use crate::error::Result;
use crate::models::SitemapKind;
use itertools::Itertools;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
/// Run before rendering so a bad `--output-dir` fails fast.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<()> {
    fs::create_dir_all(path).await?;
    // Sync probe: simpler error surface than the async one.
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    if let Err(e) = stdfs::remove_file(&probe_path) {
        warn!(path = %probe_path, error = %e, "Could not remove write probe");
    }
    info!("Output directory is writable");
    Ok(())
}

/// The kinds to generate: the requested ones without repeats, in request
/// order, or all of them when none were requested.
pub fn selected_kinds(requested: &[SitemapKind]) -> Vec<SitemapKind> {
    if requested.is_empty() {
        SitemapKind::ALL.to_vec()
    } else {
        requested.iter().copied().unique().collect()
    }
}
