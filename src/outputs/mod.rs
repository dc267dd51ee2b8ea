//! Output generation: XML rendering and the files written to disk.
//!
//! # Submodules
//!
//! - [`xml`]: Renders the five sitemap flavors to strings
//! - [`sitemaps`]: Writes rendered documents into the output directory
//! - [`json`]: Writes the categorized catalog as JSON for review
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── sitemap.xml
//! ├── sitemap-index.xml
//! ├── sitemap-mobile.xml
//! ├── sitemap-video.xml
//! ├── sitemap-news.xml
//! └── sitemap-catalog.json   # only with --catalog-json
//! ```

pub mod json;
pub mod sitemaps;
pub mod xml;
