//! Raw per-authority configuration records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::list_mode::ListMode;

/// Raw configuration for one ePathway portal, exactly as it appears in the
/// registry. Optional fields stay `None` until the resolver fills them in, so
/// "explicitly false" and "unset" remain distinguishable.
///
/// `list_mode` is kept as written rather than parsed, which lets records
/// loaded from a registry document carry an unknown value up to resolution,
/// where it is rejected. Non-string scalars are kept in their JSON spelling
/// so they fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorityConfig {
    pub identifier: String,
    #[serde(alias = "url")]
    pub base_url: String,
    #[serde(alias = "state")]
    pub jurisdiction: String,
    #[serde(
        alias = "list",
        default,
        deserialize_with = "deserialize_list_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub list_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_detail: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_ssl_certificate_check: Option<bool>,
    /// Operational rationale for the entry's overrides. Never read by the
    /// resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AuthorityConfig {
    pub fn new(
        identifier: impl Into<String>,
        base_url: impl Into<String>,
        jurisdiction: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            base_url: base_url.into(),
            jurisdiction: jurisdiction.into(),
            list_mode: None,
            max_pages: None,
            force_detail: None,
            disable_ssl_certificate_check: None,
            note: None,
        }
    }

    pub fn with_list_mode(mut self, mode: ListMode) -> Self {
        self.list_mode = Some(mode.as_str().to_string());
        self
    }

    /// Sets the list mode verbatim, without checking it names a known mode.
    pub fn with_raw_list_mode(mut self, mode: impl Into<String>) -> Self {
        self.list_mode = Some(mode.into());
        self
    }

    pub fn with_max_pages(mut self, max_pages: i64) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn with_force_detail(mut self, force_detail: bool) -> Self {
        self.force_detail = Some(force_detail);
        self
    }

    pub fn with_disable_ssl_certificate_check(mut self, disable: bool) -> Self {
        self.disable_ssl_certificate_check = Some(disable);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

fn deserialize_list_mode<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(mode)) => Some(mode),
        Some(other) => Some(other.to_string()),
    })
}
