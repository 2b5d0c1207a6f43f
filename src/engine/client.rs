//! Reqwest client construction for one authority.
//!
//! ePathway portals keep their search state in an ASP.NET session, so every
//! client carries a cookie store. Certificate validation is only relaxed for
//! authorities whose resolved configuration asks for it.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::EngineError;
use crate::config::ResolvedConfig;

const DEFAULT_USER_AGENT: &str = concat!("epathway-authorities/", env!("CARGO_PKG_VERSION"));

/// HTTP settings shared by every authority in a run.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub cookie_store: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(15),
            cookie_store: true,
        }
    }
}

impl EngineSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn without_cookie_store(mut self) -> Self {
        self.cookie_store = false;
        self
    }
}

/// Build a client honouring the authority's TLS trust setting.
pub fn build_client(
    config: &ResolvedConfig,
    settings: &EngineSettings,
) -> Result<Client, EngineError> {
    let mut builder = Client::builder()
        .cookie_store(settings.cookie_store)
        .user_agent(settings.user_agent.as_str())
        .timeout(settings.timeout)
        .connect_timeout(settings.connect_timeout);

    if config.disable_ssl_certificate_check() {
        log::warn!("certificate validation disabled for {}", config.base_url());
        builder = builder.danger_accept_invalid_certs(true);
    }

    let client = builder.build()?;
    log::debug!("built client for {}", config.base_url());
    Ok(client)
}

/// Parse the configured base URL for request building.
pub fn portal_url(config: &ResolvedConfig) -> Result<Url, EngineError> {
    Ok(Url::parse(config.base_url())?)
}
