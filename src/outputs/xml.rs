//! XML serialization of the sitemap documents.
//!
//! Every document has the same skeleton:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" ...>
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <!-- schema specific block: mobile, video or news -->
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! Consumers snapshot these files, so the element order inside `<url>` is
//! fixed and the document ends right after the closing root tag. All text
//! nodes are entity-escaped.

use crate::error::{Result, SitemapError};
use crate::models::{
    ChangeFreq, NewsPage, SitemapEntry, SitemapKind, SitemapRef, VideoPage,
};
use quick_xml::escape::escape;

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";
pub const MOBILE_NS: &str = "http://www.google.com/schemas/sitemap-mobile/1.0";
pub const VIDEO_NS: &str = "http://www.google.com/schemas/sitemap-video/1.1";
pub const NEWS_NS: &str = "http://www.google.com/schemas/sitemap-news/0.9";

/// Protocol limit on `<url>`/`<sitemap>` elements per file.
pub const MAX_URLS_PER_FILE: usize = 50_000;
/// Protocol limit on the uncompressed size of one file.
pub const MAX_BYTES_PER_FILE: usize = 50 * 1024 * 1024;

/// Per-file caps a rendered document is checked against.
#[derive(Debug, Clone, Copy)]
struct Limits {
    max_urls: usize,
    max_bytes: usize,
}

impl Limits {
    const PROTOCOL: Limits = Limits {
        max_urls: MAX_URLS_PER_FILE,
        max_bytes: MAX_BYTES_PER_FILE,
    };
}

/// Render the standard sitemap of `entries`.
pub fn render_urlset(entries: &[SitemapEntry]) -> Result<String> {
    render_urlset_within(entries, Limits::PROTOCOL)
}

fn render_urlset_within(entries: &[SitemapEntry], limits: Limits) -> Result<String> {
    let mut doc = Document::open(
        SitemapKind::Standard,
        "urlset",
        &[("xmlns", SITEMAP_NS), ("xmlns:image", IMAGE_NS)],
        entries.len(),
        limits,
    )?;
    for entry in entries {
        doc.open_tag(1, "url");
        doc.element(2, "loc", &entry.url);
        doc.crawl_hints(&entry.lastmod, entry.changefreq, entry.priority);
        doc.close_tag(1, "url");
    }
    doc.finish()
}

/// Render the mobile sitemap: the standard entries, each flagged with an
/// empty `<mobile:mobile/>` marker.
pub fn render_mobile(entries: &[SitemapEntry]) -> Result<String> {
    let mut doc = Document::open(
        SitemapKind::Mobile,
        "urlset",
        &[("xmlns", SITEMAP_NS), ("xmlns:mobile", MOBILE_NS)],
        entries.len(),
        Limits::PROTOCOL,
    )?;
    for entry in entries {
        doc.open_tag(1, "url");
        doc.element(2, "loc", &entry.url);
        doc.empty_tag(2, "mobile:mobile");
        doc.crawl_hints(&entry.lastmod, entry.changefreq, entry.priority);
        doc.close_tag(1, "url");
    }
    doc.finish()
}

/// Render the video sitemap: one `<url>` per page, each carrying a
/// `<video:video>` block between `<loc>` and the crawl hints.
///
/// `duration` is written in seconds and `family_friendly` as `yes`/`no`.
pub fn render_video(pages: &[VideoPage]) -> Result<String> {
    let mut doc = Document::open(
        SitemapKind::Video,
        "urlset",
        &[("xmlns", SITEMAP_NS), ("xmlns:video", VIDEO_NS)],
        pages.len(),
        Limits::PROTOCOL,
    )?;
    for page in pages {
        doc.open_tag(1, "url");
        doc.element(2, "loc", &page.url);
        doc.open_tag(2, "video:video");
        doc.element(3, "video:thumbnail_loc", &page.thumbnail_loc);
        doc.element(3, "video:title", &page.title);
        doc.element(3, "video:description", &page.description);
        doc.element(3, "video:duration", &page.duration.to_string());
        doc.element(3, "video:publication_date", &page.publication_date);
        doc.element(3, "video:category", &page.category);
        doc.element(
            3,
            "video:family_friendly",
            if page.family_friendly { "yes" } else { "no" },
        );
        doc.close_tag(2, "video:video");
        doc.crawl_hints(&page.lastmod, page.changefreq, page.priority);
        doc.close_tag(1, "url");
    }
    doc.finish()
}

/// Render the news sitemap.
///
/// # Arguments
///
/// * `pages` - Articles to list, in output order
///
/// # Returns
///
/// The document, with a `<news:news>` block (publication, date, title,
/// keywords) inside every `<url>`, or a size-guard error.
pub fn render_news(pages: &[NewsPage]) -> Result<String> {
    let mut doc = Document::open(
        SitemapKind::News,
        "urlset",
        &[("xmlns", SITEMAP_NS), ("xmlns:news", NEWS_NS)],
        pages.len(),
        Limits::PROTOCOL,
    )?;
    for page in pages {
        doc.open_tag(1, "url");
        doc.element(2, "loc", &page.url);
        doc.open_tag(2, "news:news");
        doc.open_tag(3, "news:publication");
        doc.element(4, "news:name", &page.publication.name);
        doc.element(4, "news:language", &page.publication.language);
        doc.close_tag(3, "news:publication");
        doc.element(3, "news:publication_date", &page.publication_date);
        doc.element(3, "news:title", &page.title);
        doc.element(3, "news:keywords", &page.keywords);
        doc.close_tag(2, "news:news");
        doc.crawl_hints(&page.lastmod, page.changefreq, page.priority);
        doc.close_tag(1, "url");
    }
    doc.finish()
}

/// Render a `<sitemapindex>` listing `sitemaps`, each with its `<loc>` and
/// `<lastmod>`.
pub fn render_index(sitemaps: &[SitemapRef]) -> Result<String> {
    let mut doc = Document::open(
        SitemapKind::Index,
        "sitemapindex",
        &[("xmlns", SITEMAP_NS)],
        sitemaps.len(),
        Limits::PROTOCOL,
    )?;
    for sitemap in sitemaps {
        doc.open_tag(1, "sitemap");
        doc.element(2, "loc", &sitemap.loc);
        doc.element(2, "lastmod", &sitemap.lastmod);
        doc.close_tag(1, "sitemap");
    }
    doc.finish()
}

/// Write a priority without rounding it. Whole numbers keep a `.0`, so the
/// catalog values read `1.0`, `0.8` and a hand-set `0.85` stays `0.85`.
pub fn format_priority(priority: f64) -> String {
    if priority.is_finite() && priority.fract() == 0.0 {
        format!("{:.1}", priority)
    } else {
        priority.to_string()
    }
}

/// Reject documents that break the per-file limits.
fn enforce_limits(kind: SitemapKind, count: usize, bytes: usize, limits: Limits) -> Result<()> {
    if count > limits.max_urls {
        return Err(SitemapError::TooManyUrls {
            kind,
            count,
            limit: limits.max_urls,
        });
    }
    if bytes > limits.max_bytes {
        return Err(SitemapError::TooLarge {
            kind,
            bytes,
            limit: limits.max_bytes,
        });
    }
    Ok(())
}

/// A document under construction, indented two spaces per level.
struct Document {
    kind: SitemapKind,
    root: &'static str,
    limits: Limits,
    xml: String,
}

impl Document {
    fn open(
        kind: SitemapKind,
        root: &'static str,
        namespaces: &[(&str, &str)],
        count: usize,
        limits: Limits,
    ) -> Result<Self> {
        // Count first: no point rendering a document that will be rejected.
        enforce_limits(kind, count, 0, limits)?;

        let mut xml = String::with_capacity(256 + count * 256);
        xml.push_str(XML_DECLARATION);
        xml.push('<');
        xml.push_str(root);
        for (name, uri) in namespaces {
            xml.push(' ');
            xml.push_str(name);
            xml.push_str("=\"");
            xml.push_str(uri);
            xml.push('"');
        }
        xml.push_str(">\n");

        Ok(Self {
            kind,
            root,
            limits,
            xml,
        })
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.xml.push_str("  ");
        }
    }

    fn open_tag(&mut self, depth: usize, name: &str) {
        self.indent(depth);
        self.xml.push('<');
        self.xml.push_str(name);
        self.xml.push_str(">\n");
    }

    fn close_tag(&mut self, depth: usize, name: &str) {
        self.indent(depth);
        self.xml.push_str("</");
        self.xml.push_str(name);
        self.xml.push_str(">\n");
    }

    fn empty_tag(&mut self, depth: usize, name: &str) {
        self.indent(depth);
        self.xml.push('<');
        self.xml.push_str(name);
        self.xml.push_str("/>\n");
    }

    fn element(&mut self, depth: usize, name: &str, text: &str) {
        self.indent(depth);
        self.xml.push('<');
        self.xml.push_str(name);
        self.xml.push('>');
        self.xml.push_str(&escape(text));
        self.xml.push_str("</");
        self.xml.push_str(name);
        self.xml.push_str(">\n");
    }

    /// The trailing `lastmod`, `changefreq`, `priority` trio of a `<url>`.
    fn crawl_hints(&mut self, lastmod: &str, changefreq: ChangeFreq, priority: f64) {
        self.element(2, "lastmod", lastmod);
        self.element(2, "changefreq", changefreq.as_str());
        self.element(2, "priority", &format_priority(priority));
    }

    fn finish(mut self) -> Result<String> {
        self.xml.push_str("</");
        self.xml.push_str(self.root);
        self.xml.push('>');
        enforce_limits(self.kind, 0, self.xml.len(), self.limits)?;
        Ok(self.xml)
    }
}
