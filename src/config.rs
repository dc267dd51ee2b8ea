//! Site configuration.
//!
//! The generator needs very little: the canonical origin every URL is built
//! under, and the publisher block of the news sitemap. Both have defaults
//! so the tool runs without a config file; a YAML file can override them.
//!
//! ```yaml
//! base_url: https://www.windchasers-kitetours.com
//! publication_name: Windchasers Kite Tours
//! publication_language: en
//! ```

use crate::error::{Result, SitemapError};
use crate::models::Publication;
use serde::Deserialize;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.windchasers-kitetours.com";
pub const DEFAULT_PUBLICATION_NAME: &str = "Windchasers Kite Tours";
pub const DEFAULT_PUBLICATION_LANGUAGE: &str = "en";

/// Settings shared by every generated document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Canonical origin, e.g. `https://www.example.com`. A trailing slash
    /// is tolerated and stripped.
    pub base_url: String,
    /// Publication name emitted in `<news:publication>`.
    pub publication_name: String,
    /// Publication language emitted in `<news:publication>`.
    pub publication_language: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            publication_name: DEFAULT_PUBLICATION_NAME.to_string(),
            publication_language: DEFAULT_PUBLICATION_LANGUAGE.to_string(),
        }
    }
}

impl SiteConfig {
    /// Replace the base URL, e.g. from the `--base-url` flag.
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url.to_string();
        }
        self
    }

    /// Check the base URL and return the configuration in canonical form.
    ///
    /// The base URL must be an absolute `http`/`https` URL with a host and
    /// no query or fragment. Trailing slashes are removed so that paths can
    /// be appended with a plain `format!`.
    pub fn validated(mut self) -> Result<Self> {
        let parsed = Url::parse(&self.base_url).map_err(|e| {
            SitemapError::Config(format!("invalid base_url {:?}: {}", self.base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SitemapError::Config(format!(
                "base_url must use http or https, got {:?}",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none() {
            return Err(SitemapError::Config(format!(
                "base_url {:?} has no host",
                self.base_url
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(SitemapError::Config(format!(
                "base_url {:?} must not carry a query or fragment",
                self.base_url
            )));
        }
        if self.publication_language.trim().is_empty() {
            return Err(SitemapError::Config(
                "publication_language must not be empty".to_string(),
            ));
        }

        self.base_url = self.base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn publication(&self) -> Publication {
        Publication {
            name: self.publication_name.clone(),
            language: self.publication_language.clone(),
        }
    }
}

/// Load a YAML site configuration from disk.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn load_config(path: &str) -> Result<SiteConfig> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        SitemapError::Config(format!("cannot read config file {}: {}", path, e))
    })?;
    let config = parse_config_str(&content)?;
    info!(base_url = %config.base_url, "Loaded site configuration");
    Ok(config)
}

/// Parse a YAML site configuration from a string.
pub fn parse_config_str(content: &str) -> Result<SiteConfig> {
    if content.trim().is_empty() {
        return Ok(SiteConfig::default());
    }
    let config: SiteConfig = serde_yaml::from_str(content)?;
    Ok(config)
}
