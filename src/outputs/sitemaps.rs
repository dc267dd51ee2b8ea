//! Writes rendered sitemap documents to disk.
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── sitemap.xml
//! ├── sitemap-index.xml
//! ├── sitemap-mobile.xml
//! ├── sitemap-video.xml
//! └── sitemap-news.xml
//! ```
//!
//! Every requested document is rendered before the first file is touched,
//! so a size-guard failure leaves the previous files in place.

use crate::error::Result;
use crate::generator::SitemapGenerator;
use crate::models::SitemapKind;
use futures::stream::{self, StreamExt};
use tokio::fs;
use tracing::{error, info, instrument};

const PARALLEL_WRITES: usize = 5;

/// Write one rendered document as `{output_dir}/{file_name}`.
///
/// Returns the path written.
#[instrument(level = "info", skip_all, fields(%output_dir, %kind))]
pub async fn write_sitemap(output_dir: &str, kind: SitemapKind, xml: &str) -> Result<String> {
    let path = format!("{}/{}", output_dir.trim_end_matches('/'), kind.file_name());
    if let Err(e) = fs::write(&path, xml).await {
        error!(%path, error = %e, "Failed to write sitemap");
        return Err(e.into());
    }
    info!(%path, bytes = xml.len(), "Wrote sitemap");
    Ok(path)
}

/// Render every requested kind, then write them concurrently.
///
/// Returns the written paths in `kinds` order.
#[instrument(level = "info", skip_all, fields(%output_dir, count = kinds.len()))]
pub async fn write_sitemaps(
    generator: &SitemapGenerator,
    kinds: &[SitemapKind],
    output_dir: &str,
) -> Result<Vec<String>> {
    let documents = kinds
        .iter()
        .map(|&kind| generator.generate(kind).map(|xml| (kind, xml)))
        .collect::<Result<Vec<_>>>()?;

    let mut written: Vec<(usize, String)> = stream::iter(documents.iter().enumerate())
        .map(|(i, (kind, xml))| async move {
            write_sitemap(output_dir, *kind, xml).await.map(|path| (i, path))
        })
        .buffer_unordered(PARALLEL_WRITES)
        .collect::<Vec<Result<(usize, String)>>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    written.sort_by_key(|(i, _)| *i);
    Ok(written.into_iter().map(|(_, path)| path).collect())
}
