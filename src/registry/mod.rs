//! Authority registry.
//!
//! Responsibilities:
//! - Hold the immutable identifier -> raw record table, in definition order.
//! - Reject malformed tables at construction (duplicate keys, bad identifiers,
//!   unparseable base URLs, entries the resolver would refuse).
//! - Expose the built-in table as a lazily initialised process-wide singleton.

mod authorities;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::config::{AuthorityConfig, ConfigError, ConfigResult, ResolvedConfig, resolve};

static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("identifier pattern is valid"));

/// Built-in table, constructed on first use.
static BUILTIN: Lazy<Result<Registry, ConfigError>> =
    Lazy::new(|| Registry::new(authorities::builtin_authorities()));

/// Immutable mapping from authority identifier to raw configuration.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<AuthorityConfig>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry, validating every entry. Definition order is kept.
    ///
    /// Each entry is resolved once here, so an unknown list mode or a
    /// non-positive `max_pages` fails construction instead of a later scrape.
    pub fn new<I>(entries: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = AuthorityConfig>,
    {
        let entries: Vec<AuthorityConfig> = entries.into_iter().collect();
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            validate_identifier(&entry.identifier)?;
            validate_base_url(entry)?;
            resolve(entry)?;
            if index.insert(entry.identifier.clone(), position).is_some() {
                return Err(ConfigError::DuplicateIdentifier(entry.identifier.clone()));
            }
        }

        log::debug!("authority registry built with {} entries", entries.len());
        Ok(Self { entries, index })
    }

    /// The registry compiled into the crate.
    pub fn builtin() -> ConfigResult<&'static Registry> {
        BUILTIN
            .as_ref()
            .map_err(|err| ConfigError::InitializationFailure(err.to_string()))
    }

    /// Parse a registry document: a JSON array of raw records.
    pub fn from_json(document: &str) -> ConfigResult<Self> {
        let entries: Vec<AuthorityConfig> = serde_json::from_str(document)?;
        Self::new(entries)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Serialize the table back into a registry document.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Exact-key lookup. No case folding, no prefix matching.
    pub fn lookup(&self, identifier: &str) -> ConfigResult<&AuthorityConfig> {
        self.index
            .get(identifier)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| ConfigError::UnknownAuthority(identifier.to_string()))
    }

    /// Look up and resolve in one step.
    pub fn resolve(&self, identifier: &str) -> ConfigResult<ResolvedConfig> {
        resolve(self.lookup(identifier)?)
    }

    /// All identifiers in definition order.
    pub fn list_identifiers(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.identifier.as_str())
            .collect()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuthorityConfig> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers whose jurisdiction code equals `code`, in definition order.
    pub fn by_jurisdiction(&self, code: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.jurisdiction == code)
            .map(|entry| entry.identifier.as_str())
            .collect()
    }

    /// Resolve every entry in definition order, stopping at the first defect.
    pub fn validate_all(&self) -> ConfigResult<Vec<(&str, ResolvedConfig)>> {
        self.entries
            .iter()
            .map(|entry| Ok((entry.identifier.as_str(), resolve(entry)?)))
            .collect()
    }
}

fn validate_identifier(identifier: &str) -> ConfigResult<()> {
    if IDENTIFIER_PATTERN.is_match(identifier) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier(identifier.to_string()))
    }
}

fn validate_base_url(entry: &AuthorityConfig) -> ConfigResult<()> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        identifier: entry.identifier.clone(),
        url: entry.base_url.clone(),
        reason,
    };

    let url = Url::parse(&entry.base_url).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}
