//! Drives the engine over one or all registered authorities.
//!
//! Configuration defects stop a run before the engine is called. Batch runs
//! resolve the whole registry before the first scrape starts.

use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};

use super::{EngineError, ListingWindow, ScrapeEngine, ScrapeJob, ScrapeSummary};
use crate::config::{ConfigError, ResolvedConfig};
use crate::modules::events::{
    EventDispatcher, EventHandler, FailedEvent, FinishedEvent, LoggingHandler, RefusedEvent,
    ResolvedEvent, ScrapeEvent, StartedEvent,
};
use crate::registry::Registry;

/// Result of one authority within a batch.
#[derive(Debug)]
pub struct AuthorityOutcome {
    pub identifier: String,
    pub result: Result<ScrapeSummary, EngineError>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<AuthorityOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = (&str, &ScrapeSummary)> {
        self.outcomes.iter().filter_map(|outcome| {
            outcome
                .result
                .as_ref()
                .ok()
                .map(|summary| (outcome.identifier.as_str(), summary))
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &EngineError)> {
        self.outcomes.iter().filter_map(|outcome| {
            outcome
                .result
                .as_ref()
                .err()
                .map(|error| (outcome.identifier.as_str(), error))
        })
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    pub fn total_records(&self) -> usize {
        self.succeeded().map(|(_, summary)| summary.records).sum()
    }
}

pub struct Runner<'r, E> {
    registry: &'r Registry,
    engine: E,
    events: EventDispatcher,
}

impl<'r, E: ScrapeEngine> Runner<'r, E> {
    pub fn new(registry: &'r Registry, engine: E) -> Self {
        let mut events = EventDispatcher::new();
        events.register_handler(Arc::new(LoggingHandler));
        Self {
            registry,
            engine,
            events,
        }
    }

    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.events.register_handler(handler);
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Scrape a single authority as of `today`.
    pub async fn run(
        &self,
        identifier: &str,
        today: NaiveDate,
    ) -> Result<ScrapeSummary, EngineError> {
        let config = match self.registry.resolve(identifier) {
            Ok(config) => config,
            Err(err) => {
                self.refuse(Some(identifier), &err);
                return Err(err.into());
            }
        };
        self.execute(identifier, &config, today).await
    }

    /// Scrape every authority in definition order. Engine failures are
    /// collected per authority; configuration defects abort before any
    /// scrape starts.
    pub async fn run_all(&self, today: NaiveDate) -> Result<BatchReport, ConfigError> {
        let resolved = self
            .registry
            .validate_all()
            .inspect_err(|err| self.refuse(err.identifier(), err))?;

        log::info!("starting batch of {} authorities", resolved.len());

        let mut report = BatchReport::default();
        for (identifier, config) in resolved {
            let result = self.execute(identifier, &config, today).await;
            report.outcomes.push(AuthorityOutcome {
                identifier: identifier.to_string(),
                result,
            });
        }

        log::info!(
            "batch finished: {} succeeded, {} failed",
            report.succeeded().count(),
            report.failed().count()
        );
        Ok(report)
    }

    async fn execute(
        &self,
        identifier: &str,
        config: &ResolvedConfig,
        today: NaiveDate,
    ) -> Result<ScrapeSummary, EngineError> {
        self.events.dispatch(ScrapeEvent::Resolved(ResolvedEvent {
            identifier: identifier.to_string(),
            config: config.clone(),
            timestamp: Utc::now(),
        }));

        let window = ListingWindow::for_mode(config.list_mode(), today);
        self.events.dispatch(ScrapeEvent::Started(StartedEvent {
            identifier: identifier.to_string(),
            base_url: config.base_url().to_string(),
            window,
            timestamp: Utc::now(),
        }));

        let started = Instant::now();
        let job = ScrapeJob {
            identifier,
            config,
            window,
        };

        match self.engine.scrape(job).await {
            Ok(summary) => {
                self.events.dispatch(ScrapeEvent::Finished(FinishedEvent {
                    identifier: identifier.to_string(),
                    summary,
                    elapsed: started.elapsed(),
                    timestamp: Utc::now(),
                }));
                Ok(summary)
            }
            Err(err) => {
                self.events.dispatch(ScrapeEvent::Failed(FailedEvent {
                    identifier: identifier.to_string(),
                    error: err.to_string(),
                    timestamp: Utc::now(),
                }));
                Err(err)
            }
        }
    }

    fn refuse(&self, identifier: Option<&str>, err: &ConfigError) {
        self.events.dispatch(ScrapeEvent::Refused(RefusedEvent {
            identifier: identifier.map(str::to_string),
            reason: err.to_string(),
            timestamp: Utc::now(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::config::{AuthorityConfig, ListMode};
    use crate::modules::events::{RunLedger, RunStatus};

    const BAROSSA: &str = "https://epayments.barossa.sa.gov.au/ePathway/Production";
    const KNOX: &str = "https://eservices.knox.vic.gov.au/ePathway/Production";

    /// Pretends each portal has five result pages of three records.
    #[derive(Default)]
    struct RecordingEngine {
        jobs: Mutex<Vec<(String, ListingWindow)>>,
        failing: Option<&'static str>,
    }

    #[async_trait]
    impl ScrapeEngine for RecordingEngine {
        async fn scrape(&self, job: ScrapeJob<'_>) -> Result<ScrapeSummary, EngineError> {
            self.jobs
                .lock()
                .unwrap()
                .push((job.identifier.to_string(), job.window));
            if self.failing == Some(job.identifier) {
                return Err(EngineError::Engine("portal returned 500".into()));
            }
            let pages = (1..=5).take_while(|&page| job.wants_page(page)).count() as u32;
            let records = pages as usize * 3;
            Ok(ScrapeSummary {
                records,
                pages,
                detail_pages: if job.config.force_detail() { records as u32 } else { 0 },
            })
        }
    }

    #[derive(Default)]
    struct EventLog(Mutex<Vec<&'static str>>);

    impl EventHandler for EventLog {
        fn handle(&self, event: &ScrapeEvent) {
            let kind = match event {
                ScrapeEvent::Resolved(_) => "resolved",
                ScrapeEvent::Started(_) => "started",
                ScrapeEvent::Finished(_) => "finished",
                ScrapeEvent::Failed(_) => "failed",
                ScrapeEvent::Refused(_) => "refused",
            };
            self.0.lock().unwrap().push(kind);
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn registry() -> Registry {
        Registry::new([
            AuthorityConfig::new("barossa", BAROSSA, "SA")
                .with_list_mode(ListMode::Last30Days)
                .with_force_detail(true),
            AuthorityConfig::new("knox", KNOX, "VIC")
                .with_list_mode(ListMode::Advertising)
                .with_max_pages(2),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn run_passes_window_to_engine() {
        let registry = registry();
        let runner = Runner::new(&registry, RecordingEngine::default());
        let summary = runner.run("barossa", today()).await.unwrap();
        assert_eq!(summary.pages, 5);
        assert_eq!(summary.detail_pages, 15);

        let jobs = runner.engine().jobs.lock().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(
            jobs[0].1,
            ListingWindow::Lodged {
                from: NaiveDate::from_ymd_opt(2024, 5, 16).unwrap(),
                to: today(),
            }
        );
    }

    #[tokio::test]
    async fn engine_stops_at_the_page_limit() {
        let registry = registry();
        let runner = Runner::new(&registry, RecordingEngine::default());
        let summary = runner.run("knox", today()).await.unwrap();
        assert_eq!(summary.pages, 2);
        assert_eq!(summary.records, 6);
        assert_eq!(summary.detail_pages, 0);
    }

    #[tokio::test]
    async fn unknown_authority_is_refused_without_scraping() {
        let registry = registry();
        let events = Arc::new(EventLog::default());
        let runner =
            Runner::new(&registry, RecordingEngine::default()).with_handler(events.clone());

        let err = runner.run("nonexistent_authority", today()).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Config(ConfigError::UnknownAuthority(_))
        ));
        assert!(runner.engine().jobs.lock().unwrap().is_empty());
        assert_eq!(*events.0.lock().unwrap(), vec!["refused"]);
    }

    #[tokio::test]
    async fn batch_continues_past_engine_failures() {
        let registry = registry();
        let engine = RecordingEngine {
            failing: Some("barossa"),
            ..Default::default()
        };
        let ledger = Arc::new(RunLedger::new());
        let runner = Runner::new(&registry, engine).with_handler(ledger.clone());

        let report = runner.run_all(today()).await.unwrap();
        assert!(!report.is_success());
        let failed: Vec<_> = report.failed().map(|(id, _)| id).collect();
        let succeeded: Vec<_> = report.succeeded().map(|(id, _)| id).collect();
        assert_eq!(failed, vec!["barossa"]);
        assert_eq!(succeeded, vec!["knox"]);
        assert_eq!(report.total_records(), 6);

        assert_eq!(ledger.status("barossa"), Some(RunStatus::Failed));
        assert_eq!(ledger.status("knox"), Some(RunStatus::Finished { records: 6 }));
        assert!(ledger.in_flight().is_empty());
    }

    #[tokio::test]
    async fn scoped_ledger_tracks_one_authority_of_a_batch() {
        let registry = registry();
        let ledger = Arc::new(RunLedger::new());
        let mut runner = Runner::new(&registry, RecordingEngine::default());
        runner.events.register_handler_for(["knox"], ledger.clone());

        runner.run_all(today()).await.unwrap();
        assert_eq!(
            ledger.snapshot(),
            vec![("knox".to_string(), RunStatus::Finished { records: 6 })]
        );
    }

    #[tokio::test]
    async fn events_follow_scrape_lifecycle() {
        let registry = registry();
        let events = Arc::new(EventLog::default());
        let runner =
            Runner::new(&registry, RecordingEngine::default()).with_handler(events.clone());
        runner.run("knox", today()).await.unwrap();
        assert_eq!(
            *events.0.lock().unwrap(),
            vec!["resolved", "started", "finished"]
        );
    }
}
