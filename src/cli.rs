//! Command-line interface definitions.
//!
//! All options can be given as flags; the base URL can also come from the
//! environment so deploy scripts can point a staging build at its own host.

use crate::models::SitemapKind;
use clap::Parser;

/// Generate the XML sitemaps of the kite tours website.
///
/// # Examples
///
/// ```sh
/// # Write all five sitemaps into ./public
/// kite_sitemap -o ./public
///
/// # Only the news sitemap, printed to stdout
/// kite_sitemap -k news
///
/// # Staging host, with the catalog dump for review
/// SITEMAP_BASE_URL=https://staging.example.com kite_sitemap -o ./public --catalog-json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory to write the sitemaps into (printed to stdout when omitted)
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Optional path to a site.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Canonical origin of the site, overriding the config file
    #[arg(long, env = "SITEMAP_BASE_URL")]
    pub base_url: Option<String>,

    /// Sitemap kinds to generate (repeatable; all when omitted)
    #[arg(short, long = "kind", value_enum)]
    pub kinds: Vec<SitemapKind>,

    /// Also write sitemap-catalog.json next to the sitemaps
    #[arg(long, requires = "output_dir")]
    pub catalog_json: bool,
}
