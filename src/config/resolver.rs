//! Resolution of raw authority records into engine-ready parameters.
//!
//! Resolution is a total, pure function of the raw record: it fills every
//! optional field with its default, parses the list mode, and rejects values
//! the engine could not act on. Nothing here depends on the clock; date
//! windows are computed later from [`ListMode`] by the engine boundary.

use std::fmt;

use serde::Serialize;

use super::authority::AuthorityConfig;
use super::error::{ConfigError, ConfigResult};
use super::list_mode::ListMode;

/// Bound on the number of result pages the engine fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxPages {
    /// No explicit bound; the engine applies its own default.
    Unbounded,
    Limit(u32),
}

impl MaxPages {
    pub fn limit(self) -> Option<u32> {
        match self {
            MaxPages::Unbounded => None,
            MaxPages::Limit(pages) => Some(pages),
        }
    }

    /// Whether the engine may request page number `page` (1-based).
    pub fn allows(self, page: u32) -> bool {
        match self {
            MaxPages::Unbounded => true,
            MaxPages::Limit(pages) => page <= pages,
        }
    }
}

impl fmt::Display for MaxPages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxPages::Unbounded => f.write_str("unbounded"),
            MaxPages::Limit(pages) => write!(f, "{pages}"),
        }
    }
}

/// Fully resolved parameters for one scrape. No field is left optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedConfig {
    base_url: String,
    jurisdiction: String,
    list_mode: ListMode,
    max_pages: MaxPages,
    force_detail: bool,
    disable_ssl_certificate_check: bool,
}

impl ResolvedConfig {
    /// Portal application root, exactly as configured.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    pub fn list_mode(&self) -> ListMode {
        self.list_mode
    }

    pub fn max_pages(&self) -> MaxPages {
        self.max_pages
    }

    pub fn force_detail(&self) -> bool {
        self.force_detail
    }

    pub fn disable_ssl_certificate_check(&self) -> bool {
        self.disable_ssl_certificate_check
    }
}

/// Resolve a raw record.
pub fn resolve(config: &AuthorityConfig) -> ConfigResult<ResolvedConfig> {
    let list_mode = resolve_list_mode(config)?;
    let max_pages = resolve_max_pages(config)?;

    let resolved = ResolvedConfig {
        base_url: config.base_url.clone(),
        jurisdiction: config.jurisdiction.clone(),
        list_mode,
        max_pages,
        force_detail: config.force_detail.unwrap_or(false),
        disable_ssl_certificate_check: config.disable_ssl_certificate_check.unwrap_or(false),
    };

    log::debug!(
        "resolved {} -> list={} max_pages={} force_detail={} disable_ssl_certificate_check={}",
        config.identifier,
        resolved.list_mode,
        resolved.max_pages,
        resolved.force_detail,
        resolved.disable_ssl_certificate_check
    );

    Ok(resolved)
}

fn resolve_list_mode(config: &AuthorityConfig) -> ConfigResult<ListMode> {
    let invalid = || ConfigError::InvalidListMode {
        identifier: config.identifier.clone(),
        value: config.list_mode.clone(),
    };

    config
        .list_mode
        .as_deref()
        .ok_or_else(invalid)?
        .parse()
        .map_err(|_| invalid())
}

fn resolve_max_pages(config: &AuthorityConfig) -> ConfigResult<MaxPages> {
    match config.max_pages {
        None => Ok(MaxPages::Unbounded),
        Some(pages) if pages <= 0 => Err(ConfigError::invalid_config(
            &config.identifier,
            format!("max_pages must be positive, got {pages}"),
        )),
        Some(pages) => u32::try_from(pages).map(MaxPages::Limit).map_err(|_| {
            ConfigError::invalid_config(
                &config.identifier,
                format!("max_pages {pages} is out of range"),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AuthorityConfig {
        AuthorityConfig::new(
            "salisbury",
            "https://eservices.salisbury.sa.gov.au/ePathway/Production",
            "SA",
        )
        .with_list_mode(ListMode::Last30Days)
    }

    #[test]
    fn absent_overrides_take_defaults() {
        let resolved = resolve(&record()).unwrap();
        assert_eq!(resolved.max_pages(), MaxPages::Unbounded);
        assert!(!resolved.force_detail());
        assert!(!resolved.disable_ssl_certificate_check());
        assert_eq!(resolved.list_mode(), ListMode::Last30Days);
    }

    #[test]
    fn explicit_values_pass_through() {
        let config = record()
            .with_max_pages(7)
            .with_force_detail(true)
            .with_disable_ssl_certificate_check(true);
        let resolved = resolve(&config).unwrap();
        assert_eq!(resolved.max_pages(), MaxPages::Limit(7));
        assert!(resolved.force_detail());
        assert!(resolved.disable_ssl_certificate_check());
    }

    #[test]
    fn explicit_false_matches_absent() {
        let explicit = record()
            .with_force_detail(false)
            .with_disable_ssl_certificate_check(false);
        assert_eq!(resolve(&explicit).unwrap(), resolve(&record()).unwrap());
    }

    #[test]
    fn base_url_and_jurisdiction_are_untouched() {
        let url = "http://203.49.140.77/ePathway/Production/";
        let config = AuthorityConfig::new("inverell", url, "NSW")
            .with_list_mode(ListMode::AllThisYear);
        let resolved = resolve(&config).unwrap();
        assert_eq!(resolved.base_url(), "http://203.49.140.77/ePathway/Production/");
        assert_eq!(resolved.jurisdiction(), "NSW");
    }

    #[test]
    fn missing_list_mode_is_rejected() {
        let mut config = record();
        config.list_mode = None;
        match resolve(&config) {
            Err(ConfigError::InvalidListMode { identifier, value }) => {
                assert_eq!(identifier, "salisbury");
                assert_eq!(value, None);
            }
            other => panic!("expected InvalidListMode, got {other:?}"),
        }
    }

    #[test]
    fn unknown_list_mode_is_rejected() {
        let config = record().with_raw_list_mode("last_60_days");
        assert!(matches!(
            resolve(&config),
            Err(ConfigError::InvalidListMode { value: Some(ref v), .. }) if v == "last_60_days"
        ));
    }

    #[test]
    fn non_positive_max_pages_is_rejected() {
        for pages in [0, -1, i64::MIN] {
            let config = record().with_max_pages(pages);
            assert!(
                matches!(resolve(&config), Err(ConfigError::InvalidConfig { .. })),
                "max_pages {pages} should be rejected"
            );
        }
    }

    #[test]
    fn oversized_max_pages_is_rejected() {
        let config = record().with_max_pages(i64::from(u32::MAX) + 1);
        assert!(matches!(
            resolve(&config),
            Err(ConfigError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn max_pages_bounds_page_numbers() {
        assert!(MaxPages::Unbounded.allows(10_000));
        assert!(MaxPages::Limit(4).allows(4));
        assert!(!MaxPages::Limit(4).allows(5));
        assert_eq!(MaxPages::Limit(4).limit(), Some(4));
        assert_eq!(MaxPages::Unbounded.limit(), None);
    }
}
