//! Lodgement-date windows derived from a list mode and the scrape date.
//!
//! The resolver never looks at the clock; the caller supplies `today` so a
//! scrape (and its replayed fixtures) always sees the same window.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::config::ListMode;

const SINCE_2020_YEAR: i32 = 2020;
const TRAILING_DAYS: u64 = 30;

/// Date filter the engine applies when requesting a portal's listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingWindow {
    /// No lodgement-date filter; the portal decides what is listed.
    Unfiltered,
    /// Applications lodged between `from` and `to`, both inclusive.
    Lodged { from: NaiveDate, to: NaiveDate },
}

impl ListingWindow {
    pub fn for_mode(mode: ListMode, today: NaiveDate) -> Self {
        let from = match mode {
            ListMode::All | ListMode::Advertising => return ListingWindow::Unfiltered,
            ListMode::AllThisYear => start_of_year(today.year()).unwrap_or(today),
            ListMode::AllSince2020 => start_of_year(SINCE_2020_YEAR).unwrap_or(NaiveDate::MIN),
            ListMode::Last30Days => today
                .checked_sub_days(Days::new(TRAILING_DAYS))
                .unwrap_or(NaiveDate::MIN),
        };
        ListingWindow::Lodged { from, to: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            ListingWindow::Unfiltered => true,
            ListingWindow::Lodged { from, to } => *from <= date && date <= *to,
        }
    }

    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            ListingWindow::Unfiltered => None,
            ListingWindow::Lodged { from, to } => Some((*from, *to)),
        }
    }
}

impl fmt::Display for ListingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingWindow::Unfiltered => f.write_str("unfiltered"),
            ListingWindow::Lodged { from, to } => write!(f, "lodged {from}..={to}"),
        }
    }
}

fn start_of_year(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}
