//! The site's URL inventory.
//!
//! The catalog is an embedded static table: every public page of the site,
//! grouped the way the marketing team thinks about them. It is rebuilt on
//! every call with `lastmod` set to the generation date, because the site
//! keeps no per-page modification times.
//!
//! The video and news sitemaps list their own, much smaller, literal tables.

use crate::models::{
    ChangeFreq::{self, Daily, Monthly, Weekly, Yearly},
    NewsPage, Publication, SitemapCategory, SitemapEntry, VideoPage,
};
use itertools::Itertools;
use std::fmt;
use url::Url;

struct PageRow {
    path: &'static str,
    priority: f64,
    changefreq: ChangeFreq,
    images: &'static [&'static str],
}

struct CategoryRow {
    name: &'static str,
    priority: f64,
    changefreq: ChangeFreq,
    pages: &'static [PageRow],
}

const fn page(path: &'static str, priority: f64, changefreq: ChangeFreq) -> PageRow {
    PageRow {
        path,
        priority,
        changefreq,
        images: &[],
    }
}

const fn page_with_images(
    path: &'static str,
    priority: f64,
    changefreq: ChangeFreq,
    images: &'static [&'static str],
) -> PageRow {
    PageRow {
        path,
        priority,
        changefreq,
        images,
    }
}

static CATALOG: &[CategoryRow] = &[
    CategoryRow {
        name: "Main Pages",
        priority: 1.0,
        changefreq: Weekly,
        pages: &[
            page_with_images("/", 1.0, Daily, &["/images/hero/home-kiters-sunset.jpg"]),
            page("/about", 0.8, Monthly),
            page("/contact", 0.8, Monthly),
            page("/book", 0.9, Weekly),
            page("/faq", 0.7, Monthly),
            page("/reviews", 0.7, Weekly),
        ],
    },
    CategoryRow {
        name: "Destinations",
        priority: 0.9,
        changefreq: Weekly,
        pages: &[
            page("/destinations", 0.9, Weekly),
            page_with_images(
                "/destinations/brazil",
                0.9,
                Weekly,
                &["/images/destinations/brazil.jpg"],
            ),
            page_with_images(
                "/destinations/brazil/jericoacoara",
                0.9,
                Weekly,
                &[
                    "/images/destinations/jericoacoara-lagoon.jpg",
                    "/images/destinations/jericoacoara-dunes.jpg",
                ],
            ),
            page("/destinations/brazil/cumbuco", 0.8, Weekly),
            page("/destinations/brazil/atins", 0.8, Weekly),
            page_with_images(
                "/destinations/egypt",
                0.9,
                Weekly,
                &["/images/destinations/egypt.jpg"],
            ),
            page("/destinations/egypt/el-gouna", 0.8, Weekly),
            page("/destinations/egypt/safaga", 0.8, Weekly),
            page_with_images(
                "/destinations/morocco/dakhla",
                0.9,
                Weekly,
                &["/images/destinations/dakhla-lagoon.jpg"],
            ),
            page("/destinations/vietnam/mui-ne", 0.8, Weekly),
            page("/destinations/philippines/boracay", 0.8, Weekly),
            page("/destinations/sri-lanka/kalpitiya", 0.8, Weekly),
            page("/destinations/zanzibar/paje", 0.8, Weekly),
            page("/destinations/mauritius/le-morne", 0.8, Weekly),
            page("/destinations/greece/naxos", 0.7, Monthly),
            page("/destinations/spain/tarifa", 0.8, Weekly),
            page("/destinations/portugal/lagos", 0.7, Monthly),
            page("/destinations/mexico/la-ventana", 0.7, Monthly),
            page("/destinations/colombia/cabo-de-la-vela", 0.7, Monthly),
            page("/destinations/south-africa/cape-town", 0.8, Weekly),
        ],
    },
    CategoryRow {
        name: "Trips & Packages",
        priority: 0.8,
        changefreq: Weekly,
        pages: &[
            page("/trips", 0.9, Weekly),
            page("/trips/downwinder-brazil", 0.8, Weekly),
            page("/trips/kite-safari-egypt", 0.8, Weekly),
            page("/trips/kite-camp-dakhla", 0.8, Weekly),
            page("/trips/beginner-camp", 0.8, Weekly),
            page("/trips/advanced-coaching", 0.7, Weekly),
            page("/trips/family-kite-holiday", 0.7, Weekly),
            page("/trips/women-kite-retreat", 0.7, Weekly),
            page("/trips/kite-yoga-retreat", 0.7, Weekly),
            page("/trips/private-charter", 0.6, Monthly),
        ],
    },
    CategoryRow {
        name: "Kite School",
        priority: 0.8,
        changefreq: Monthly,
        pages: &[
            page("/lessons", 0.8, Monthly),
            page("/lessons/beginner", 0.8, Monthly),
            page("/lessons/intermediate", 0.7, Monthly),
            page("/lessons/advanced", 0.7, Monthly),
            page("/lessons/foiling", 0.7, Monthly),
            page("/lessons/wingfoil", 0.7, Monthly),
            page("/lessons/private", 0.6, Monthly),
        ],
    },
    CategoryRow {
        name: "Blog",
        priority: 0.7,
        changefreq: Daily,
        pages: &[
            page("/blog", 0.8, Daily),
            page("/blog/best-kite-spots-winter", 0.6, Monthly),
            page("/blog/kite-packing-list", 0.6, Monthly),
            page("/blog/wind-season-guide", 0.6, Monthly),
            page("/blog/choosing-kite-size", 0.6, Monthly),
            page("/blog/downwinder-safety", 0.6, Monthly),
            page("/blog/brazil-kite-season", 0.6, Monthly),
        ],
    },
    CategoryRow {
        name: "Shop",
        priority: 0.6,
        changefreq: Weekly,
        pages: &[
            page("/shop", 0.7, Weekly),
            page("/shop/kites", 0.6, Weekly),
            page("/shop/boards", 0.6, Weekly),
            page("/shop/harnesses", 0.6, Weekly),
            page("/shop/wetsuits", 0.6, Weekly),
            page("/shop/accessories", 0.5, Weekly),
            page("/shop/gift-cards", 0.5, Monthly),
        ],
    },
    CategoryRow {
        name: "Legal",
        priority: 0.3,
        changefreq: Yearly,
        pages: &[
            page("/privacy", 0.3, Yearly),
            page("/terms", 0.3, Yearly),
            page("/cookies", 0.3, Yearly),
            page("/booking-conditions", 0.4, Yearly),
            page("/travel-insurance", 0.4, Yearly),
        ],
    },
];

/// Build the full catalog under `base_url`, stamping every entry with `lastmod`.
///
/// `base_url` must not end with a slash. Categories and pages keep their
/// declaration order.
pub fn build_catalog(base_url: &str, lastmod: &str) -> Vec<SitemapCategory> {
    CATALOG
        .iter()
        .map(|category| SitemapCategory {
            name: category.name.to_string(),
            priority: category.priority,
            changefreq: category.changefreq,
            pages: category
                .pages
                .iter()
                .map(|page| SitemapEntry {
                    url: format!("{}{}", base_url, page.path),
                    lastmod: lastmod.to_string(),
                    changefreq: page.changefreq,
                    priority: page.priority,
                    images: page
                        .images
                        .iter()
                        .map(|image| format!("{}{}", base_url, image))
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// Pages with an embedded video.
pub fn video_pages(base_url: &str, lastmod: &str) -> Vec<VideoPage> {
    vec![
        VideoPage {
            url: format!("{}/destinations/brazil/jericoacoara", base_url),
            thumbnail_loc: format!("{}/images/videos/jericoacoara-downwinder.jpg", base_url),
            title: "Downwinder from Jericoacoara to Prea".to_string(),
            description: "Ride along with our guides on a 12 km downwinder down the Ceara coast, \
                          from the flat-water lagoon to the open beach at Prea."
                .to_string(),
            duration: 184,
            publication_date: "2024-08-14".to_string(),
            category: "Travel".to_string(),
            family_friendly: true,
            lastmod: lastmod.to_string(),
            changefreq: Monthly,
            priority: 0.7,
        },
        VideoPage {
            url: format!("{}/lessons/beginner", base_url),
            thumbnail_loc: format!("{}/images/videos/first-lesson.jpg", base_url),
            title: "Your First Kite Lesson".to_string(),
            description: "What happens on day one of the beginner course: safety systems, \
                          flying a trainer kite and the first body drags."
                .to_string(),
            duration: 312,
            publication_date: "2024-05-02".to_string(),
            category: "Sports".to_string(),
            family_friendly: true,
            lastmod: lastmod.to_string(),
            changefreq: Monthly,
            priority: 0.6,
        },
    ]
}

/// Recent blog articles announced to news crawlers.
///
/// News sitemaps only carry fresh articles, so the publication date is the
/// generation date.
pub fn news_pages(base_url: &str, publication: &Publication, today: &str) -> Vec<NewsPage> {
    let article = |path: &str, title: &str, keywords: &str| NewsPage {
        url: format!("{}{}", base_url, path),
        publication: publication.clone(),
        publication_date: today.to_string(),
        title: title.to_string(),
        keywords: keywords.to_string(),
        lastmod: today.to_string(),
        changefreq: Daily,
        priority: 0.6,
    };

    vec![
        article(
            "/blog/brazil-kite-season",
            "Brazil Kite Season Opens: What the Wind Forecast Says",
            "kitesurfing, brazil, wind forecast, ceara",
        ),
        article(
            "/blog/best-kite-spots-winter",
            "Winter Sun & Flat Water: Ten Kite Spots for the Cold Months",
            "kitesurfing, travel, winter, flat water",
        ),
        article(
            "/blog/downwinder-safety",
            "Downwinder Safety Checklist Before You Leave the Beach",
            "kitesurfing, safety, downwinder",
        ),
    ]
}

/// Something in the catalog that breaks a data-model invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogIssue {
    /// The URL does not parse as an absolute URL.
    InvalidUrl { url: String, reason: String },
    /// The URL parses but lives outside the canonical origin.
    ForeignOrigin { url: String },
    /// The priority is outside `[0.0, 1.0]`.
    PriorityOutOfRange { url: String, priority: f64 },
    /// The URL is listed more than once.
    DuplicateUrl { url: String },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::InvalidUrl { url, reason } => {
                write!(f, "{} is not an absolute URL: {}", url, reason)
            }
            CatalogIssue::ForeignOrigin { url } => {
                write!(f, "{} is outside the canonical origin", url)
            }
            CatalogIssue::PriorityOutOfRange { url, priority } => {
                write!(f, "{} has priority {} outside [0.0, 1.0]", url, priority)
            }
            CatalogIssue::DuplicateUrl { url } => write!(f, "{} is listed more than once", url),
        }
    }
}

/// Check a catalog against the data-model invariants.
///
/// Returns every violation found, in catalog order; an empty list means the
/// catalog is clean. Image URLs are checked for origin as well.
pub fn validate_catalog(categories: &[SitemapCategory], base_url: &str) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let base = Url::parse(base_url).ok();
    let prefix = format!("{}/", base_url.trim_end_matches('/'));

    let check_url = |url: &str, issues: &mut Vec<CatalogIssue>| match Url::parse(url) {
        Ok(parsed) => {
            let same_origin = base
                .as_ref()
                .is_some_and(|base| base.origin() == parsed.origin());
            if !same_origin || !url.starts_with(&prefix) {
                issues.push(CatalogIssue::ForeignOrigin {
                    url: url.to_string(),
                });
            }
        }
        Err(e) => issues.push(CatalogIssue::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        }),
    };

    for entry in categories.iter().flat_map(|c| c.pages.iter()) {
        check_url(entry.url.as_str(), &mut issues);
        for image in &entry.images {
            check_url(image.as_str(), &mut issues);
        }
        if !(0.0..=1.0).contains(&entry.priority) {
            issues.push(CatalogIssue::PriorityOutOfRange {
                url: entry.url.clone(),
                priority: entry.priority,
            });
        }
    }

    issues.extend(
        categories
            .iter()
            .flat_map(|c| c.pages.iter())
            .map(|entry| entry.url.as_str())
            .duplicates()
            .map(|url| CatalogIssue::DuplicateUrl {
                url: url.to_string(),
            }),
    );

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.example.com";

    fn publication() -> Publication {
        Publication {
            name: "Example Kite Tours".to_string(),
            language: "en".to_string(),
        }
    }

    #[test]
    fn test_catalog_is_clean() {
        let catalog = build_catalog(BASE, "2025-05-06");
        let issues = validate_catalog(&catalog, BASE);
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn test_catalog_shape() {
        let catalog = build_catalog(BASE, "2025-05-06");
        let names: Vec<&str> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Main Pages",
                "Destinations",
                "Trips & Packages",
                "Kite School",
                "Blog",
                "Shop",
                "Legal"
            ]
        );

        let total: usize = catalog.iter().map(|c| c.pages.len()).sum();
        assert_eq!(total, 62);
        assert_eq!(catalog[0].pages[0].url, "https://www.example.com/");
    }

    #[test]
    fn test_every_entry_gets_lastmod() {
        let catalog = build_catalog(BASE, "2025-05-06");
        assert!(
            catalog
                .iter()
                .flat_map(|c| c.pages.iter())
                .all(|p| p.lastmod == "2025-05-06")
        );
    }

    #[test]
    fn test_images_are_absolute() {
        let catalog = build_catalog(BASE, "2025-05-06");
        let images: Vec<&String> = catalog
            .iter()
            .flat_map(|c| c.pages.iter())
            .flat_map(|p| p.images.iter())
            .collect();
        assert!(!images.is_empty());
        assert!(images.iter().all(|i| i.starts_with("https://www.example.com/images/")));
    }

    #[test]
    fn test_literal_video_and_news_lists() {
        let videos = video_pages(BASE, "2025-05-06");
        assert_eq!(videos.len(), 2);
        assert!(videos.iter().all(|v| v.url.starts_with(BASE)));

        let news = news_pages(BASE, &publication(), "2025-05-06");
        assert_eq!(news.len(), 3);
        assert!(news.iter().all(|n| n.publication_date == "2025-05-06"));
        assert!(news.iter().all(|n| n.publication.name == "Example Kite Tours"));
    }

    #[test]
    fn test_news_articles_are_in_catalog() {
        let catalog = build_catalog(BASE, "2025-05-06");
        let urls: Vec<&str> = catalog
            .iter()
            .flat_map(|c| c.pages.iter())
            .map(|p| p.url.as_str())
            .collect();
        for article in news_pages(BASE, &publication(), "2025-05-06") {
            assert!(urls.contains(&article.url.as_str()), "{}", article.url);
        }
        for video in video_pages(BASE, "2025-05-06") {
            assert!(urls.contains(&video.url.as_str()), "{}", video.url);
        }
    }

    fn entry(url: &str, priority: f64) -> SitemapEntry {
        SitemapEntry {
            url: url.to_string(),
            lastmod: "2025-05-06".to_string(),
            changefreq: Weekly,
            priority,
            images: vec![],
        }
    }

    #[test]
    fn test_validate_reports_each_issue() {
        let catalog = vec![SitemapCategory {
            name: "Broken".to_string(),
            priority: 0.5,
            changefreq: Weekly,
            pages: vec![
                entry("https://www.example.com/ok", 0.5),
                entry("/relative", 0.5),
                entry("https://evil.example.net/page", 0.5),
                entry("https://www.example.com/too-high", 1.5),
                entry("https://www.example.com/ok", 0.5),
            ],
        }];

        let issues = validate_catalog(&catalog, BASE);
        assert_eq!(issues.len(), 4);
        assert!(matches!(issues[0], CatalogIssue::InvalidUrl { .. }));
        assert_eq!(
            issues[1],
            CatalogIssue::ForeignOrigin {
                url: "https://evil.example.net/page".to_string()
            }
        );
        assert!(matches!(
            issues[2],
            CatalogIssue::PriorityOutOfRange { priority, .. } if priority == 1.5
        ));
        assert_eq!(
            issues[3],
            CatalogIssue::DuplicateUrl {
                url: "https://www.example.com/ok".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_lookalike_host() {
        let catalog = vec![SitemapCategory {
            name: "Lookalike".to_string(),
            priority: 0.5,
            changefreq: Weekly,
            pages: vec![entry("https://www.example.com.evil.net/", 0.5)],
        }];
        let issues = validate_catalog(&catalog, BASE);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].to_string().contains("outside the canonical origin"));
    }
}
