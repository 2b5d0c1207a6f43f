//! Listing strategies understood by the scraping engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which slice of a portal's application list the engine should request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMode {
    /// Every application the portal exposes, no date filter.
    All,
    /// Applications lodged in the current calendar year.
    AllThisYear,
    /// Applications lodged on or after 1 January 2020.
    #[serde(rename = "all_since_2020")]
    AllSince2020,
    /// Applications lodged within the trailing 30 days of the scrape.
    #[serde(rename = "last_30_days")]
    Last30Days,
    /// Applications currently on public notification. Portal-side filter,
    /// unrelated to lodgement dates.
    Advertising,
}

impl ListMode {
    pub const ALL: [ListMode; 5] = [
        ListMode::All,
        ListMode::AllThisYear,
        ListMode::AllSince2020,
        ListMode::Last30Days,
        ListMode::Advertising,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ListMode::All => "all",
            ListMode::AllThisYear => "all_this_year",
            ListMode::AllSince2020 => "all_since_2020",
            ListMode::Last30Days => "last_30_days",
            ListMode::Advertising => "advertising",
        }
    }

    /// Whether the mode narrows the listing by lodgement date.
    pub fn is_date_filtered(self) -> bool {
        !matches!(self, ListMode::All | ListMode::Advertising)
    }
}

impl fmt::Display for ListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the known list modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownListMode(pub String);

impl fmt::Display for UnknownListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown list mode '{}'", self.0)
    }
}

impl std::error::Error for UnknownListMode {}

impl FromStr for ListMode {
    type Err = UnknownListMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ListMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == value)
            .ok_or_else(|| UnknownListMode(value.to_string()))
    }
}
