//! Error type shared by the generator, the configuration loader and the
//! output writers.

use crate::models::SitemapKind;
use thiserror::Error;

/// Everything that can go wrong while producing sitemap documents.
///
/// Building the catalog itself cannot fail; errors come from the ambient
/// layers around it (configuration, filesystem) and from the size guards
/// applied to each rendered document.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// The site configuration could not be read or is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A filesystem operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the catalog dump failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A document lists more URLs than one sitemap file may hold.
    #[error("{kind} lists {count} URLs, more than the {limit} allowed in one file")]
    TooManyUrls {
        kind: SitemapKind,
        count: usize,
        limit: usize,
    },

    /// A rendered document exceeds the per-file byte limit.
    #[error("{kind} is {bytes} bytes, more than the {limit} allowed in one file")]
    TooLarge {
        kind: SitemapKind,
        bytes: usize,
        limit: usize,
    },
}

impl From<serde_yaml::Error> for SitemapError {
    fn from(err: serde_yaml::Error) -> Self {
        SitemapError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SitemapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_many_urls_message_names_file() {
        let err = SitemapError::TooManyUrls {
            kind: SitemapKind::Standard,
            count: 50_001,
            limit: 50_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("sitemap.xml"));
        assert!(msg.contains("50001"));
        assert!(msg.contains("50000"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;
        let err = SitemapError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_json_error_converts_with_source() {
        use std::error::Error;
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = SitemapError::from(json_err);
        assert!(matches!(err, SitemapError::Json(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("JSON error: "));
    }

    #[test]
    fn test_yaml_error_becomes_config_error() {
        let yaml_err = serde_yaml::from_str::<Vec<u32>>("{ not: [a, list").unwrap_err();
        let err = SitemapError::from(yaml_err);
        assert!(matches!(err, SitemapError::Config(_)));
    }
}
