//! Event system for scrape runs.
//!
//! Provides hooks for logging and custom reactions around each authority's
//! scrape. Handlers can listen to every authority or to a chosen subset, and
//! [`RunLedger`] keeps the latest status of each authority in a run.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::config::ResolvedConfig;
use crate::engine::{ListingWindow, ScrapeSummary};

#[derive(Debug, Clone)]
pub struct ResolvedEvent {
    pub identifier: String,
    pub config: ResolvedConfig,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StartedEvent {
    pub identifier: String,
    pub base_url: String,
    pub window: ListingWindow,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FinishedEvent {
    pub identifier: String,
    pub summary: ScrapeSummary,
    pub elapsed: Duration,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FailedEvent {
    pub identifier: String,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

/// A scrape was not started because the configuration is defective.
#[derive(Debug, Clone)]
pub struct RefusedEvent {
    pub identifier: Option<String>,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum ScrapeEvent {
    Resolved(ResolvedEvent),
    Started(StartedEvent),
    Finished(FinishedEvent),
    Failed(FailedEvent),
    Refused(RefusedEvent),
}

impl ScrapeEvent {
    /// Authority the event concerns. Refusals of a whole registry have none.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            ScrapeEvent::Resolved(event) => Some(&event.identifier),
            ScrapeEvent::Started(event) => Some(&event.identifier),
            ScrapeEvent::Finished(event) => Some(&event.identifier),
            ScrapeEvent::Failed(event) => Some(&event.identifier),
            ScrapeEvent::Refused(event) => event.identifier.as_deref(),
        }
    }
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &ScrapeEvent);
}

/// Which authorities a handler hears about.
#[derive(Debug, Clone)]
enum Scope {
    Every,
    Authorities(HashSet<String>),
}

impl Scope {
    fn admits(&self, event: &ScrapeEvent) -> bool {
        match self {
            Scope::Every => true,
            Scope::Authorities(identifiers) => event
                .identifier()
                .is_some_and(|identifier| identifiers.contains(identifier)),
        }
    }
}

/// Routes scrape events to handlers, either for every authority or for a
/// chosen subset.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<(Scope, Arc<dyn EventHandler>)>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push((Scope::Every, handler));
    }

    /// Register a handler that only sees events for `identifiers`. Events not
    /// tied to an authority are not delivered to it.
    pub fn register_handler_for<I, S>(&mut self, identifiers: I, handler: Arc<dyn EventHandler>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers = identifiers.into_iter().map(Into::into).collect();
        self.handlers.push((Scope::Authorities(identifiers), handler));
    }

    pub fn dispatch(&self, event: ScrapeEvent) {
        for (scope, handler) in &self.handlers {
            if scope.admits(&event) {
                handler.handle(&event);
            }
        }
    }
}

/// Last known state of an authority within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Started,
    Finished { records: usize },
    Failed,
    Refused,
}

/// Tracks the latest status of every authority seen, in first-seen order.
#[derive(Debug, Default)]
pub struct RunLedger {
    statuses: Mutex<Vec<(String, RunStatus)>>,
}

impl RunLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, identifier: &str) -> Option<RunStatus> {
        self.lock()
            .iter()
            .find(|(seen, _)| seen == identifier)
            .map(|(_, status)| *status)
    }

    pub fn snapshot(&self) -> Vec<(String, RunStatus)> {
        self.lock().clone()
    }

    /// Authorities that started but have not reported back.
    pub fn in_flight(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(_, status)| *status == RunStatus::Started)
            .map(|(identifier, _)| identifier.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, RunStatus)>> {
        self.statuses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, identifier: &str, status: RunStatus) {
        let mut statuses = self.lock();
        match statuses.iter_mut().find(|(seen, _)| seen == identifier) {
            Some((_, current)) => *current = status,
            None => statuses.push((identifier.to_string(), status)),
        }
    }
}

impl EventHandler for RunLedger {
    fn handle(&self, event: &ScrapeEvent) {
        let status = match event {
            ScrapeEvent::Resolved(_) => return,
            ScrapeEvent::Started(_) => RunStatus::Started,
            ScrapeEvent::Finished(finished) => RunStatus::Finished {
                records: finished.summary.records,
            },
            ScrapeEvent::Failed(_) => RunStatus::Failed,
            ScrapeEvent::Refused(_) => RunStatus::Refused,
        };
        if let Some(identifier) = event.identifier() {
            self.record(identifier, status);
        }
    }
}

/// Logs events using the `log` crate.
#[derive(Debug)]
pub struct LoggingHandler;

impl EventHandler for LoggingHandler {
    fn handle(&self, event: &ScrapeEvent) {
        match event {
            ScrapeEvent::Resolved(resolved) => {
                log::debug!(
                    "{} resolved ({} {})",
                    resolved.identifier,
                    resolved.config.jurisdiction(),
                    resolved.config.list_mode()
                );
            }
            ScrapeEvent::Started(started) => {
                log::info!(
                    "scraping {} at {} ({})",
                    started.identifier,
                    started.base_url,
                    started.window
                );
            }
            ScrapeEvent::Finished(finished) => {
                log::info!(
                    "{} finished: {} records over {} pages ({:.2}s)",
                    finished.identifier,
                    finished.summary.records,
                    finished.summary.pages,
                    finished.elapsed.as_secs_f64()
                );
            }
            ScrapeEvent::Failed(failed) => {
                log::warn!("{} failed -> {}", failed.identifier, failed.error);
            }
            ScrapeEvent::Refused(refused) => match &refused.identifier {
                Some(identifier) => {
                    log::warn!("refusing to scrape {} -> {}", identifier, refused.reason)
                }
                None => log::warn!("refusing to scrape -> {}", refused.reason),
            },
        }
    }
}
