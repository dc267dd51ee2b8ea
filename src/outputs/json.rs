//! JSON dump of the sitemap catalog.
//!
//! The marketing team reviews the URL inventory as JSON rather than
//! reading the XML. The dump keeps the category grouping the XML discards:
//!
//! ```text
//! output_dir/
//! └── sitemap-catalog.json
//! ```

use crate::error::Result;
use crate::models::SitemapCategory;
use tokio::fs;
use tracing::{error, info, instrument};

pub const CATALOG_FILE_NAME: &str = "sitemap-catalog.json";

/// Write `catalog` as pretty-printed JSON to `{output_dir}/sitemap-catalog.json`.
///
/// Returns the path written.
#[instrument(level = "info", skip_all, fields(%output_dir, categories = catalog.len()))]
pub async fn write_catalog(catalog: &[SitemapCategory], output_dir: &str) -> Result<String> {
    let json = serde_json::to_string_pretty(catalog)?;
    let path = format!("{}/{}", output_dir.trim_end_matches('/'), CATALOG_FILE_NAME);

    info!(%path, "Writing catalog JSON");
    if let Err(e) = fs::write(&path, json).await {
        error!(%path, error = %e, "Failed to write catalog JSON");
        return Err(e.into());
    }
    info!(%path, "Wrote catalog JSON");
    Ok(path)
}
