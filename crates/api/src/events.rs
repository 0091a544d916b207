//! Default event publisher.

use tracing::info;

use centavo_core::events::{EventPublisher, LedgerEvent};

/// Publisher that logs each event at info level.
///
/// This is the default wiring; deployments that forward events to a queue
/// or webhook dispatcher provide their own [`EventPublisher`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPublisher;

impl EventPublisher for TracingPublisher {
    fn publish(&self, event: LedgerEvent) {
        info!(event = event.name(), entry_id = %event.entry_id(), "Ledger event");
    }
}
