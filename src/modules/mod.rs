//! Cross-cutting services module
//!
//! Hooks that observe scrape runs without taking part in them.

pub mod events;

pub use events::{
    EventDispatcher, EventHandler, FailedEvent, FinishedEvent, LoggingHandler, RefusedEvent,
    ResolvedEvent, RunLedger, RunStatus, ScrapeEvent, StartedEvent,
};
