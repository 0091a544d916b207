//! Post-commit ledger events.
//!
//! Handlers publish an event after every successful entry mutation. The
//! [`EventPublisher`] contract is non-blocking: implementations enqueue or
//! forward, and delivery lives entirely behind the trait.

use centavo_shared::types::EntryId;
use serde::{Deserialize, Serialize};

use crate::ledger::Entry;

/// Something that happened to the ledger, emitted after commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A new entry was recorded.
    EntryCreated {
        /// The entry as stored.
        entry: Entry,
    },
    /// An existing entry changed.
    EntryUpdated {
        /// The entry before the change.
        before: Entry,
        /// The entry after the change.
        after: Entry,
    },
    /// An entry was removed.
    EntryDeleted {
        /// The entry as it was before removal.
        entry: Entry,
    },
}

impl LedgerEvent {
    /// Dotted event name, e.g. `entry.created`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EntryCreated { .. } => "entry.created",
            Self::EntryUpdated { .. } => "entry.updated",
            Self::EntryDeleted { .. } => "entry.deleted",
        }
    }

    /// The ID of the entry the event concerns.
    #[must_use]
    pub const fn entry_id(&self) -> EntryId {
        match self {
            Self::EntryCreated { entry } | Self::EntryDeleted { entry } => entry.id,
            Self::EntryUpdated { after, .. } => after.id,
        }
    }
}

/// Sink for ledger events.
///
/// `publish` must not block: implementations hand the event off and return.
pub trait EventPublisher: Send + Sync {
    /// Accepts an event for delivery.
    fn publish(&self, event: LedgerEvent);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::ledger::EntryKind;

    fn entry() -> Entry {
        Entry {
            id: EntryId::new(),
            description: "Coffee".into(),
            amount: dec!(4.50),
            occurred_on: NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
            kind: EntryKind::Expense,
            category: "Food".into(),
            account: "checking".into(),
            extra: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[derive(Default)]
    struct RecordingPublisher {
        seen: Mutex<Vec<LedgerEvent>>,
    }

    impl EventPublisher for RecordingPublisher {
        fn publish(&self, event: LedgerEvent) {
            self.seen.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_event_names_and_ids() {
        let stored = entry();
        let created = LedgerEvent::EntryCreated {
            entry: stored.clone(),
        };
        assert_eq!(created.name(), "entry.created");
        assert_eq!(created.entry_id(), stored.id);

        let mut changed = stored.clone();
        changed.amount = dec!(5.00);
        let updated = LedgerEvent::EntryUpdated {
            before: stored.clone(),
            after: changed,
        };
        assert_eq!(updated.name(), "entry.updated");
        assert_eq!(updated.entry_id(), stored.id);

        let deleted = LedgerEvent::EntryDeleted { entry: stored };
        assert_eq!(deleted.name(), "entry.deleted");
    }

    #[test]
    fn test_events_tag_with_snake_case_type() {
        let event = LedgerEvent::EntryCreated { entry: entry() };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "entry_created");
        assert!(value["entry"]["description"].is_string());
    }

    #[test]
    fn test_publisher_receives_events() {
        let publisher = RecordingPublisher::default();
        publisher.publish(LedgerEvent::EntryCreated { entry: entry() });
        publisher.publish(LedgerEvent::EntryDeleted { entry: entry() });

        let seen = publisher.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].name(), "entry.created");
        assert_eq!(seen[1].name(), "entry.deleted");
    }
}
