//! Configuration defects surfaced by the registry and the resolver.
//!
//! Every variant describes a problem with the configuration table itself, not
//! a transient failure, so none of them are worth retrying.

use thiserror::Error;

/// Result alias used by the registry and resolver.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown authority '{0}'")]
    UnknownAuthority(String),
    #[error("authority '{identifier}' has {}", describe_list_mode(.value))]
    InvalidListMode {
        identifier: String,
        value: Option<String>,
    },
    #[error("authority '{identifier}' is misconfigured: {reason}")]
    InvalidConfig { identifier: String, reason: String },
    #[error("authority '{0}' is defined more than once")]
    DuplicateIdentifier(String),
    #[error("authority identifier '{0}' must be lowercase snake_case")]
    InvalidIdentifier(String),
    #[error("authority '{identifier}' has an invalid base url '{url}': {reason}")]
    InvalidBaseUrl {
        identifier: String,
        url: String,
        reason: String,
    },
    #[error("registry document is not valid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read registry document: {0}")]
    Io(#[from] std::io::Error),
    #[error("built-in registry failed to initialise: {0}")]
    InitializationFailure(String),
}

fn describe_list_mode(value: &Option<String>) -> String {
    match value {
        Some(value) => format!("unknown list mode '{value}'"),
        None => "no list mode".to_string(),
    }
}

impl ConfigError {
    pub(crate) fn invalid_config(identifier: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidConfig {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }

    /// Identifier of the authority the defect belongs to, when there is one.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            ConfigError::UnknownAuthority(identifier)
            | ConfigError::DuplicateIdentifier(identifier)
            | ConfigError::InvalidIdentifier(identifier) => Some(identifier),
            ConfigError::InvalidListMode { identifier, .. }
            | ConfigError::InvalidConfig { identifier, .. }
            | ConfigError::InvalidBaseUrl { identifier, .. } => Some(identifier),
            ConfigError::Json(_) | ConfigError::Io(_) | ConfigError::InitializationFailure(_) => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_mode_messages_distinguish_missing_and_unknown() {
        let missing = ConfigError::InvalidListMode {
            identifier: "knox".into(),
            value: None,
        };
        let unknown = ConfigError::InvalidListMode {
            identifier: "knox".into(),
            value: Some("recent".into()),
        };
        assert_eq!(missing.to_string(), "authority 'knox' has no list mode");
        assert_eq!(
            unknown.to_string(),
            "authority 'knox' has unknown list mode 'recent'"
        );
    }

    #[test]
    fn identifier_is_reported_for_authority_defects() {
        let err = ConfigError::invalid_config("glen_eira", "max_pages must be positive");
        assert_eq!(err.identifier(), Some("glen_eira"));
        assert_eq!(
            ConfigError::InitializationFailure("boom".into()).identifier(),
            None
        );
    }
}
