//! Observability for the analysis pipeline
//!
//! - Structured logging (JSON lines on stderr, filtered by `SEMMELWEIS_LOG`)
//! - Typed lifecycle events
//! - Stage scopes
//!
//! Observability is read-only: nothing logged here changes a computed value.
//!
//! ```ignore
//! use semmelweis::observability::{log_event_with_fields, Event, ObservationScope};
//!
//! log_event_with_fields(Event::TableLoaded, &[("rows", "98")]);
//!
//! let scope = ObservationScope::new("SPLIT");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity, LOG_LEVEL_ENV};
pub use scope::ObservationScope;

fn severity_for(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_for(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}
