//! Data models for the sitemap catalog and the documents built from it.
//!
//! - [`SitemapEntry`]: one canonical URL with its crawl hints
//! - [`SitemapCategory`]: an organizational group of entries
//! - [`VideoPage`] / [`NewsPage`]: pages listed by the video and news sitemaps
//! - [`SitemapRef`]: one `<sitemap>` element of the sitemap index
//! - [`SitemapKind`]: the five document flavors and their file names

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Crawler hint for how often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    /// The literal emitted inside `<changefreq>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single canonical URL of the site.
///
/// `priority` is expected to lie in `[0.0, 1.0]`; the serializers emit it
/// as given and leave validation to [`crate::catalog::validate_catalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    /// Absolute URL under the site's canonical origin.
    pub url: String,
    /// Date of generation in `YYYY-MM-DD` format.
    pub lastmod: String,
    pub changefreq: ChangeFreq,
    pub priority: f64,
    /// Image URLs shown on the page. Carried for the images sitemap, which
    /// is produced elsewhere; none of the serializers here read it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// An organizational group of entries.
///
/// The category's own `priority` and `changefreq` are the defaults its pages
/// were declared with; they are not enforced on the entries and the name is
/// never emitted to XML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapCategory {
    pub name: String,
    pub priority: f64,
    pub changefreq: ChangeFreq,
    pub pages: Vec<SitemapEntry>,
}

/// A page carrying an embedded video, listed by the video sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoPage {
    pub url: String,
    pub thumbnail_loc: String,
    pub title: String,
    pub description: String,
    /// Running time in seconds.
    pub duration: u32,
    /// Publication date in `YYYY-MM-DD` format.
    pub publication_date: String,
    pub category: String,
    pub family_friendly: bool,
    pub lastmod: String,
    pub changefreq: ChangeFreq,
    pub priority: f64,
}

/// Publisher block shared by every news entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Publication {
    pub name: String,
    /// ISO 639 language code.
    pub language: String,
}

/// A news article listed by the news sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsPage {
    pub url: String,
    pub publication: Publication,
    pub publication_date: String,
    pub title: String,
    /// Comma-separated keyword list.
    pub keywords: String,
    pub lastmod: String,
    pub changefreq: ChangeFreq,
    pub priority: f64,
}

/// One `<sitemap>` element of the sitemap index.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapRef {
    pub loc: String,
    pub lastmod: String,
}

/// The document flavors this crate knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SitemapKind {
    /// `sitemap.xml`, the full catalog
    Standard,
    /// `sitemap-index.xml`, pointing at the per-topic sitemaps
    Index,
    /// `sitemap-mobile.xml`, the catalog flagged for mobile crawlers
    Mobile,
    /// `sitemap-video.xml`, pages with embedded videos
    Video,
    /// `sitemap-news.xml`, recent blog articles
    News,
}

impl SitemapKind {
    pub const ALL: [SitemapKind; 5] = [
        SitemapKind::Standard,
        SitemapKind::Index,
        SitemapKind::Mobile,
        SitemapKind::Video,
        SitemapKind::News,
    ];

    /// File name the document is written to and served under.
    pub fn file_name(&self) -> &'static str {
        match self {
            SitemapKind::Standard => "sitemap.xml",
            SitemapKind::Index => "sitemap-index.xml",
            SitemapKind::Mobile => "sitemap-mobile.xml",
            SitemapKind::Video => "sitemap-video.xml",
            SitemapKind::News => "sitemap-news.xml",
        }
    }
}

impl fmt::Display for SitemapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
