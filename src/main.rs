//! # Kite Sitemap
//!
//! Generates the XML sitemaps of the kite tours marketing and booking
//! website from the embedded catalog of its public pages.
//!
//! ## Documents
//!
//! - `sitemap.xml`: every canonical page, with crawl hints
//! - `sitemap-index.xml`: points at `sitemap.xml` and `sitemap-images.xml`
//! - `sitemap-mobile.xml`: every page, flagged for mobile crawlers
//! - `sitemap-video.xml`: pages with an embedded video
//! - `sitemap-news.xml`: recent blog articles
//!
//! ## Usage
//!
//! ```sh
//! kite_sitemap -o ./public
//! ```
//!
//! ## Pipeline
//!
//! 1. **Configuration**: CLI flags, environment and optional `site.yaml`
//! 2. **Catalog check**: invariant violations are logged as warnings
//! 3. **Rendering**: every requested document is rendered in memory
//! 4. **Output**: documents are written to the output directory, or stdout

use clap::Parser;
use std::error::Error;
use std::io::Write;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod catalog;
mod cli;
mod config;
mod error;
mod generator;
mod models;
mod outputs;
mod utils;

use catalog::validate_catalog;
use cli::Cli;
use config::{load_config, SiteConfig};
use generator::SitemapGenerator;
use outputs::{json, sitemaps};
use utils::{ensure_writable_dir, selected_kinds};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // stderr, so documents printed to stdout stay clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("kite_sitemap starting up");

    let args = Cli::parse();
    debug!(?args.output_dir, ?args.config, ?args.kinds, "Parsed CLI arguments");

    // ---- Configuration ----
    let site_config = match &args.config {
        Some(path) => load_config(path).await.inspect_err(|e| {
            error!(%path, error = %e, "Failed to load site configuration");
        })?,
        None => SiteConfig::default(),
    };
    let site_config = site_config
        .with_base_url(args.base_url.as_deref())
        .validated()
        .inspect_err(|e| error!(error = %e, "Invalid site configuration"))?;
    info!(base_url = %site_config.base_url, "Using canonical origin");

    let generator = SitemapGenerator::new(&site_config);
    let kinds = selected_kinds(&args.kinds);
    info!(lastmod = %generator.lastmod(), kinds = ?kinds, "Generator initialized");

    // ---- Catalog check ----
    let catalog = generator.generate_sitemap_data();
    let issues = validate_catalog(&catalog, generator.base_url());
    for issue in &issues {
        warn!(%issue, "Catalog entry breaks a sitemap invariant");
    }
    info!(
        categories = catalog.len(),
        pages = catalog.iter().map(|c| c.pages.len()).sum::<usize>(),
        issues = issues.len(),
        "Catalog checked"
    );

    // ---- Output ----
    match &args.output_dir {
        Some(output_dir) => {
            if let Err(e) = ensure_writable_dir(output_dir).await {
                error!(
                    path = %output_dir,
                    error = %e,
                    "Output directory is not writable (fix perms or choose a different path)"
                );
                return Err(e.into());
            }

            let paths = sitemaps::write_sitemaps(&generator, &kinds, output_dir)
                .await
                .inspect_err(|e| error!(error = %e, "Failed to write sitemaps"))?;
            info!(count = paths.len(), "Sitemaps written");

            if args.catalog_json {
                json::write_catalog(&catalog, output_dir)
                    .await
                    .inspect_err(|e| error!(error = %e, "Failed to write catalog JSON"))?;
            }
        }
        None => print_documents(&generator, &kinds)?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Print the requested documents to stdout, one after the other.
fn print_documents(
    generator: &SitemapGenerator,
    kinds: &[models::SitemapKind],
) -> Result<(), Box<dyn Error>> {
    let documents = kinds
        .iter()
        .map(|&kind| generator.generate(kind))
        .collect::<error::Result<Vec<_>>>()
        .inspect_err(|e| error!(error = %e, "Failed to render sitemaps"))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for xml in documents {
        out.write_all(xml.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
