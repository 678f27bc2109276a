//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::WORDS_PER_MINUTE;
use crate::error::{Error, Result};
use crate::helpers::DateFormatter;
use crate::source::{Ordering, QueryOptions};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,
    pub timezone: String,

    // Listing
    pub per_page: usize,
    pub ordering: Ordering,

    // Post
    pub words_per_minute: u32,

    /// Page regeneration interval handed to the rendering host
    pub revalidate_secs: u64,

    /// Directory of JSON documents for the local source
    pub content_dir: String,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub comments: CommentsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),
            language: "pt-BR".to_string(),
            timezone: String::new(),

            per_page: 3,
            ordering: Ordering::default(),

            words_per_minute: WORDS_PER_MINUTE,
            revalidate_secs: 60 * 30,

            content_dir: "content".to_string(),

            api: ApiConfig::default(),
            comments: CommentsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {:?}: {}", path, e)))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid {:?}: {}", path, e)))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Date formatter for the configured language and time zone
    pub fn date_formatter(&self) -> Result<DateFormatter> {
        DateFormatter::from_names(&self.language, &self.timezone)
    }

    /// Options for the first listing page
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            page_size: self.per_page,
            ordering: self.ordering,
        }
    }
}

/// Content API connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// e.g. `https://my-repo.cdn.prismic.io/api/v2`
    pub endpoint: String,
    pub access_token: Option<String>,
    pub document_type: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_token: None,
            document_type: "posts".to_string(),
        }
    }
}

/// utterances comment widget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// `owner/name` of the GitHub repository holding the comment issues;
    /// empty disables comments
    pub repo: String,
    pub issue_term: String,
    pub theme: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            repo: String::new(),
            issue_term: "pathname".to_string(),
            theme: "photon-dark".to_string(),
        }
    }
}

impl CommentsConfig {
    pub fn enabled(&self) -> bool {
        !self.repo.is_empty()
    }
}
