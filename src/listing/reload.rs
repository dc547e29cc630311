//! Debounced, de-duplicated list reloads with last-request-wins.
//!
//! Filter edits call [`ReloadPipeline::request`]. Once the debounce window
//! is over, [`ReloadPipeline::poll`] issues a ticket for the current query
//! key unless it equals the key of the previous ticket. A response is only
//! applied if its ticket is still the latest one.

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debounce::{Debouncer, LIST_RELOAD_DELAY};

/// Handle for one issued list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadTicket {
    pub generation: u64,
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct ReloadPipeline {
    debouncer: Debouncer<()>,
    last_key: Option<String>,
    generation: u64,
}

impl Default for ReloadPipeline {
    fn default() -> Self {
        Self::new(LIST_RELOAD_DELAY)
    }
}

impl ReloadPipeline {
    pub fn new(delay: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(delay),
            last_key: None,
            generation: 0,
        }
    }

    /// Pipeline waiting the configured `LIST_DEBOUNCE_MS`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.list_debounce)
    }

    /// Ask for a reload after the debounce window
    pub fn request(&mut self, now: Instant) {
        self.debouncer.push((), now);
    }

    /// Forget the last key so the next reload is issued even if the query
    /// did not change (e.g. after a delete)
    pub fn invalidate(&mut self) {
        self.last_key = None;
    }

    /// Issue a ticket if a debounced request is due and the key changed
    pub fn poll(&mut self, now: Instant, current_key: &str) -> Option<ReloadTicket> {
        self.debouncer.poll(now)?;

        if self.last_key.as_deref() == Some(current_key) {
            tracing::debug!(key = current_key, "List query unchanged, reload skipped");
            return None;
        }

        self.generation += 1;
        self.last_key = Some(current_key.to_string());
        Some(ReloadTicket {
            generation: self.generation,
            key: current_key.to_string(),
        })
    }

    /// Whether a response for `ticket` should be applied
    pub fn accept(&self, ticket: &ReloadTicket) -> bool {
        ticket.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_burst_issues_one_ticket() {
        let start = Instant::now();
        let mut pipeline = ReloadPipeline::default();

        pipeline.request(start);
        pipeline.request(start + 50 * MS);
        pipeline.request(start + 100 * MS);

        assert_eq!(pipeline.poll(start + 200 * MS, "a"), None);
        let ticket = pipeline.poll(start + 250 * MS, "a").unwrap();
        assert_eq!(ticket.generation, 1);
        assert_eq!(ticket.key, "a");
        assert!(pipeline.accept(&ticket));
    }

    #[test]
    fn test_unchanged_key_is_skipped() {
        let start = Instant::now();
        let mut pipeline = ReloadPipeline::default();

        pipeline.request(start);
        assert!(pipeline.poll(start + 150 * MS, "a").is_some());

        pipeline.request(start + 200 * MS);
        assert_eq!(pipeline.poll(start + 350 * MS, "a"), None);

        pipeline.invalidate();
        pipeline.request(start + 400 * MS);
        assert!(pipeline.poll(start + 550 * MS, "a").is_some());
    }

    #[test]
    fn test_stale_ticket_rejected() {
        let start = Instant::now();
        let mut pipeline = ReloadPipeline::default();

        pipeline.request(start);
        let first = pipeline.poll(start + 150 * MS, "a").unwrap();

        pipeline.request(start + 160 * MS);
        let second = pipeline.poll(start + 310 * MS, "b").unwrap();

        assert!(!pipeline.accept(&first));
        assert!(pipeline.accept(&second));
    }

    #[test]
    fn test_poll_without_request() {
        let mut pipeline = ReloadPipeline::default();
        assert_eq!(pipeline.poll(Instant::now(), "a"), None);
    }

    #[test]
    fn test_pipeline_uses_configured_delay() {
        let config = Config::from_lookup(|name| match name {
            "DATABASE_URL" => Some("postgres://localhost/booking".to_string()),
            "LIST_DEBOUNCE_MS" => Some("400".to_string()),
            _ => None,
        })
        .unwrap();
        let start = Instant::now();
        let mut pipeline = ReloadPipeline::from_config(&config);

        pipeline.request(start);
        assert_eq!(pipeline.poll(start + 150 * MS, "lake"), None);

        let ticket = pipeline.poll(start + 400 * MS, "lake").unwrap();
        assert!(pipeline.accept(&ticket));
    }
}
