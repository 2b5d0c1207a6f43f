//! # epathway-authorities
//!
//! Authority registry and configuration resolver for scrapers that harvest
//! planning applications from council "ePathway" portals.
//!
//! Every council portal has its own base URL, its own quirks, and a listing
//! strategy that works for it. This crate keeps those settings in one
//! immutable table and turns an authority identifier into a fully resolved
//! parameter set that a scraping engine can run without further branching.
//!
//! ## Features
//!
//! - Built-in table of ePathway authorities, validated on first use
//! - Explicit present/absent optional overrides with well-defined defaults
//! - Closed set of listing strategies with exhaustive matching
//! - JSON registry documents for additional or replacement tables
//! - Engine boundary: date windows, TLS-aware reqwest clients, fixture naming
//!
//! ## Example
//!
//! ```no_run
//! use epathway_authorities::{ListMode, Registry};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Registry::builtin()?;
//!     registry.validate_all()?;
//!
//!     let adelaide = registry.resolve("adelaide")?;
//!     assert_eq!(adelaide.list_mode(), ListMode::AllThisYear);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod modules;
pub mod registry;

pub use crate::config::{
    AuthorityConfig,
    ConfigError,
    ConfigResult,
    ListMode,
    MaxPages,
    ResolvedConfig,
    resolve,
};

pub use crate::engine::{
    AuthorityOutcome,
    BatchReport,
    EngineError,
    EngineSettings,
    ListingWindow,
    Runner,
    ScrapeEngine,
    ScrapeJob,
    ScrapeSummary,
    build_client,
    fixture_key,
    fixture_path,
    missing_fixtures,
    portal_url,
};

pub use crate::modules::{
    EventDispatcher,
    EventHandler,
    FailedEvent,
    FinishedEvent,
    LoggingHandler,
    RefusedEvent,
    ResolvedEvent,
    RunLedger,
    RunStatus,
    ScrapeEvent,
    StartedEvent,
};

pub use crate::registry::Registry;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
