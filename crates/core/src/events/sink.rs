//! Domain event sink trait and basic implementations.

use std::sync::{Arc, Mutex};

use log::debug;

use super::domain_event::DomainEvent;

/// Receives domain events after state changes.
///
/// Implementations must be fast and must not block: emission happens
/// on the caller's task, after the change has already been applied.
/// Delivery is best-effort; a sink that drops an event must not make
/// the originating operation fail.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);

    fn emit_batch(&self, events: Vec<DomainEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// Discards every event. The default when no frontend is attached.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Writes each event to the log. Handy for headless runs.
#[derive(Clone, Default)]
pub struct LogDomainEventSink;

impl DomainEventSink for LogDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        debug!("Domain event: {:?}", event);
    }
}

/// Records events for inspection in tests.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).push(event);
    }
}
