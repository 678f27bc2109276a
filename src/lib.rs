//! spacetraveling: blog front-end core
//!
//! Fetches posts from a headless content API and shapes them for a rendering
//! host: post view models with formatted dates, reading time and
//! previous/next navigation, plus an incrementally loaded post listing.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod source;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use content::PostViewModelBuilder;
use source::{ContentSource, LocalSource, PrismicSource};

/// Which content source to read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// JSON documents in the content directory
    Local,
    /// The configured content API
    Api,
}

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Local content directory
    pub content_dir: PathBuf,
}

impl Blog {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// View-model builder for the configured locale, time zone and reading speed
    pub fn builder(&self) -> Result<PostViewModelBuilder> {
        let builder = PostViewModelBuilder::with_renderer(
            content::HtmlRenderer::new(),
            self.config.date_formatter()?,
        );
        Ok(builder.words_per_minute(self.config.words_per_minute))
    }

    /// Open a content source
    pub fn source(&self, kind: SourceKind) -> Result<Box<dyn ContentSource>> {
        Ok(match kind {
            SourceKind::Local => Box::new(LocalSource::load(&self.content_dir)?),
            SourceKind::Api => Box::new(PrismicSource::new(&self.config.api)?),
        })
    }
}
