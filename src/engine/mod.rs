//! Boundary with the scraping engine.
//!
//! The engine itself (session handling, pagination, HTML parsing) lives
//! outside this crate. This module defines what it is handed: a resolved
//! configuration, the date window for the run, and an HTTP client built with
//! the authority's trust settings.

pub mod client;
pub mod fixtures;
pub mod runner;
pub mod window;

pub use client::{EngineSettings, build_client, portal_url};
pub use fixtures::{fixture_key, fixture_path, missing_fixtures};
pub use runner::{AuthorityOutcome, BatchReport, Runner};
pub use window::ListingWindow;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, ResolvedConfig};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("engine error: {0}")]
    Engine(String),
}

/// Everything the engine needs to scrape one authority.
#[derive(Debug, Clone, Copy)]
pub struct ScrapeJob<'a> {
    pub identifier: &'a str,
    pub config: &'a ResolvedConfig,
    pub window: ListingWindow,
}

impl ScrapeJob<'_> {
    /// Whether the engine should request page `page` (1-based).
    pub fn wants_page(&self, page: u32) -> bool {
        self.config.max_pages().allows(page)
    }
}

/// What the engine reports back after a scrape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScrapeSummary {
    pub records: usize,
    pub pages: u32,
    pub detail_pages: u32,
}

/// Implemented by the scraping engine.
#[async_trait]
pub trait ScrapeEngine: Send + Sync {
    async fn scrape(&self, job: ScrapeJob<'_>) -> Result<ScrapeSummary, EngineError>;
}
