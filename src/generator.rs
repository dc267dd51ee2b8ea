//! The sitemap generator.
//!
//! [`SitemapGenerator`] pins the two inputs every document depends on, the
//! canonical origin and the generation date, and exposes one method per
//! document. Each call rebuilds what it needs from the embedded tables, so a
//! generator holds no mutable state and can be shared freely between tasks.

use crate::catalog::{build_catalog, news_pages, video_pages};
use crate::config::SiteConfig;
use crate::error::Result;
use crate::models::{Publication, SitemapCategory, SitemapEntry, SitemapKind, SitemapRef};
use crate::outputs::xml;
use chrono::{NaiveDate, Utc};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct SitemapGenerator {
    base_url: String,
    publication: Publication,
    today: NaiveDate,
}

impl SitemapGenerator {
    /// Create a generator dated with the current UTC date.
    ///
    /// `config` is expected to have gone through [`SiteConfig::validated`].
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            publication: config.publication(),
            today: Utc::now().date_naive(),
        }
    }

    /// Pin the generation date, e.g. to reproduce a snapshot.
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generation date as `YYYY-MM-DD`, the value of every `<lastmod>`.
    pub fn lastmod(&self) -> String {
        self.today.format("%Y-%m-%d").to_string()
    }

    /// The full URL inventory, grouped into categories in declaration order.
    #[instrument(level = "debug", skip(self))]
    pub fn generate_sitemap_data(&self) -> Vec<SitemapCategory> {
        let catalog = build_catalog(&self.base_url, &self.lastmod());
        debug!(
            categories = catalog.len(),
            pages = catalog.iter().map(|c| c.pages.len()).sum::<usize>(),
            "Built sitemap catalog"
        );
        catalog
    }

    /// The catalog flattened in category order; category names are dropped.
    fn flattened_entries(&self) -> Vec<SitemapEntry> {
        self.generate_sitemap_data()
            .into_iter()
            .flat_map(|category| category.pages)
            .collect()
    }

    /// `sitemap.xml`: every catalog entry.
    pub fn generate_xml_sitemap(&self) -> Result<String> {
        xml::render_urlset(&self.flattened_entries())
    }

    /// `sitemap-index.xml`: the main sitemap plus the images sitemap, which
    /// is published by the media pipeline rather than generated here.
    pub fn generate_sitemap_index(&self) -> Result<String> {
        let lastmod = self.lastmod();
        let sitemaps = ["sitemap.xml", "sitemap-images.xml"]
            .iter()
            .map(|file| SitemapRef {
                loc: format!("{}/{}", self.base_url, file),
                lastmod: lastmod.clone(),
            })
            .collect::<Vec<_>>();
        xml::render_index(&sitemaps)
    }

    /// `sitemap-mobile.xml`: every catalog entry, flagged for mobile crawlers.
    pub fn generate_mobile_sitemap(&self) -> Result<String> {
        xml::render_mobile(&self.flattened_entries())
    }

    /// `sitemap-video.xml`: pages with an embedded video.
    pub fn generate_video_sitemap(&self) -> Result<String> {
        xml::render_video(&video_pages(&self.base_url, &self.lastmod()))
    }

    /// `sitemap-news.xml`: recent blog articles.
    pub fn generate_news_sitemap(&self) -> Result<String> {
        xml::render_news(&news_pages(
            &self.base_url,
            &self.publication,
            &self.lastmod(),
        ))
    }

    /// Render the document of the given kind.
    pub fn generate(&self, kind: SitemapKind) -> Result<String> {
        match kind {
            SitemapKind::Standard => self.generate_xml_sitemap(),
            SitemapKind::Index => self.generate_sitemap_index(),
            SitemapKind::Mobile => self.generate_mobile_sitemap(),
            SitemapKind::Video => self.generate_video_sitemap(),
            SitemapKind::News => self.generate_news_sitemap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    const BASE: &str = "https://www.example.com";
    const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

    fn generator() -> SitemapGenerator {
        let config = SiteConfig {
            base_url: format!("{}/", BASE),
            ..SiteConfig::default()
        }
        .validated()
        .unwrap();
        SitemapGenerator::new(&config).with_date(NaiveDate::from_ymd_opt(2025, 5, 6).unwrap())
    }

    /// Text content of every element named `name`, in document order.
    /// Fails the test if the document is not well-formed.
    fn texts_of(xml: &str, name: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut inside = false;
        let mut texts = Vec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    inside = e.name().as_ref() == name.as_bytes();
                    if inside {
                        texts.push(String::new());
                    }
                }
                Ok(Event::Text(t)) if inside => {
                    if let Some(last) = texts.last_mut() {
                        last.push_str(&String::from_utf8_lossy(&t));
                    }
                }
                Ok(Event::End(_)) => inside = false,
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("malformed XML at {}: {}", reader.buffer_position(), e),
            }
        }
        texts
    }

    /// Count of start tags named `name`, parsing the whole document.
    fn count_elements(xml: &str, name: &str) -> usize {
        let mut reader = Reader::from_str(xml);
        let mut count = 0;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e))
                    if e.name().as_ref() == name.as_bytes() =>
                {
                    count += 1
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("malformed XML: {}", e),
            }
        }
        count
    }

    #[test]
    fn test_every_document_starts_with_declaration() {
        let generator = generator();
        for kind in SitemapKind::ALL {
            let xml = generator.generate(kind).unwrap();
            assert!(xml.starts_with(DECLARATION), "{} lacks declaration", kind);
        }
    }

    #[test]
    fn test_standard_root_and_tail() {
        let xml = generator().generate_xml_sitemap().unwrap();
        assert!(xml.contains(
            "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" xmlns:image=\"http://www.google.com/schemas/sitemap-image/1.1\">"
        ));
        assert!(xml.ends_with("</urlset>"));
    }

    #[test]
    fn test_standard_url_count_matches_catalog() {
        let generator = generator();
        let expected: usize = generator
            .generate_sitemap_data()
            .iter()
            .map(|c| c.pages.len())
            .sum();
        let xml = generator.generate_xml_sitemap().unwrap();
        assert_eq!(count_elements(&xml, "url"), expected);
    }

    #[test]
    fn test_locs_follow_flattened_catalog_order() {
        let generator = generator();
        let expected: Vec<String> = generator
            .generate_sitemap_data()
            .into_iter()
            .flat_map(|c| c.pages)
            .map(|p| p.url)
            .collect();
        let xml = generator.generate_xml_sitemap().unwrap();
        assert_eq!(texts_of(&xml, "loc"), expected);

        let unique: std::collections::HashSet<&String> = expected.iter().collect();
        assert_eq!(unique.len(), expected.len());
    }

    #[test]
    fn test_crawl_hint_values() {
        let generator = generator();
        for kind in [
            SitemapKind::Standard,
            SitemapKind::Mobile,
            SitemapKind::Video,
            SitemapKind::News,
        ] {
            let xml = generator.generate(kind).unwrap();

            for priority in texts_of(&xml, "priority") {
                let value: f64 = priority.parse().unwrap();
                assert!((0.0..=1.0).contains(&value), "{} out of range", value);
            }

            let allowed = ["always", "hourly", "daily", "weekly", "monthly", "yearly", "never"];
            for changefreq in texts_of(&xml, "changefreq") {
                assert!(allowed.contains(&changefreq.as_str()), "{}", changefreq);
            }

            let lastmods = texts_of(&xml, "lastmod");
            assert!(!lastmods.is_empty());
            assert!(lastmods.iter().all(|l| l == "2025-05-06"));
        }
    }

    #[test]
    fn test_lastmod_defaults_to_today_utc() {
        let config = SiteConfig::default().validated().unwrap();
        // Tolerate the test straddling midnight UTC.
        let before = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let generator = SitemapGenerator::new(&config);
        let after = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        assert!(generator.lastmod() == before || generator.lastmod() == after);
        assert_eq!(generator.lastmod().len(), "YYYY-MM-DD".len());
    }

    #[test]
    fn test_index_lists_two_sitemaps() {
        let xml = generator().generate_sitemap_index().unwrap();
        assert_eq!(count_elements(&xml, "sitemap"), 2);
        assert_eq!(
            texts_of(&xml, "loc"),
            vec![
                "https://www.example.com/sitemap.xml".to_string(),
                "https://www.example.com/sitemap-images.xml".to_string(),
            ]
        );
    }

    #[test]
    fn test_mobile_flags_every_url() {
        let xml = generator().generate_mobile_sitemap().unwrap();
        let urls = count_elements(&xml, "url");
        assert_eq!(count_elements(&xml, "mobile:mobile"), urls);
        assert!(xml.contains("xmlns:mobile=\"http://www.google.com/schemas/sitemap-mobile/1.0\""));
    }

    #[test]
    fn test_video_sitemap_fields() {
        let xml = generator().generate_video_sitemap().unwrap();
        assert_eq!(count_elements(&xml, "url"), 2);
        assert_eq!(count_elements(&xml, "video:video"), 2);
        for field in [
            "video:thumbnail_loc",
            "video:title",
            "video:description",
            "video:duration",
            "video:publication_date",
            "video:category",
            "video:family_friendly",
        ] {
            assert_eq!(count_elements(&xml, field), 2, "{}", field);
        }
    }

    #[test]
    fn test_news_sitemap_fields() {
        let xml = generator().generate_news_sitemap().unwrap();
        assert_eq!(count_elements(&xml, "url"), 3);
        for field in [
            "news:news",
            "news:publication",
            "news:name",
            "news:language",
            "news:publication_date",
            "news:title",
            "news:keywords",
        ] {
            assert_eq!(count_elements(&xml, field), 3, "{}", field);
        }
        assert!(xml.contains("Winter Sun &amp; Flat Water"));
        assert!(texts_of(&xml, "news:publication_date").iter().all(|d| d == "2025-05-06"));
    }

    #[test]
    fn test_output_is_idempotent() {
        let generator = generator();
        for kind in SitemapKind::ALL {
            assert_eq!(generator.generate(kind).unwrap(), generator.generate(kind).unwrap());
        }
    }

    #[test]
    fn test_trailing_slash_in_base_url_is_ignored() {
        let generator = generator();
        assert_eq!(generator.base_url(), BASE);
        let catalog = generator.generate_sitemap_data();
        assert!(
            catalog
                .iter()
                .flat_map(|c| c.pages.iter())
                .all(|p| !p.url.contains(".com//"))
        );
    }

    #[test]
    fn test_generator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SitemapGenerator>();
    }
}
