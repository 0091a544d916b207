//! Keyed write locks for spending-limit enforcement.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use centavo_core::spend_limit::RuleScope;
use centavo_shared::types::Period;

/// Key identifying one guarded scope key in one month.
type LockKey = (&'static str, String, Period);

/// Serializes the limit check-then-insert window per (scope, target, period).
///
/// The write path reads prior spending and then inserts; without the lock,
/// two concurrent writes into the same scope key could both pass the check
/// and together land over the cap. Locks are process-local.
#[derive(Clone, Default)]
pub struct ScopeLocks {
    locks: Arc<DashMap<LockKey, Arc<Mutex<()>>>>,
}

/// Guards held for the duration of one write.
pub struct ScopeGuards {
    _guards: Vec<OwnedMutexGuard<()>>,
}

impl ScopeLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the entry's category and account scope keys for its month.
    ///
    /// Keys are acquired in sorted order so concurrent writers touching the
    /// same keys cannot deadlock.
    pub async fn acquire(&self, category: &str, account: &str, period: Period) -> ScopeGuards {
        let mut keys = vec![
            (RuleScope::Category.as_str(), category.to_string(), period),
            (RuleScope::Account.as_str(), account.to_string(), period),
        ];
        keys.sort();

        let mut guards = Vec::with_capacity(keys.len());
        for key in keys {
            let lock = self
                .locks
                .entry(key)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone();
            guards.push(lock.lock_owned().await);
        }

        ScopeGuards { _guards: guards }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    fn august() -> Period {
        "2026-08".parse().unwrap()
    }

    #[tokio::test]
    async fn test_same_keys_are_mutually_exclusive() {
        let locks = ScopeLocks::new();

        let guard = locks.acquire("Food", "checking", august()).await;
        let blocked = timeout(
            Duration::from_millis(50),
            locks.acquire("Food", "checking", august()),
        )
        .await;
        assert!(blocked.is_err());

        drop(guard);
        let reacquired = timeout(
            Duration::from_millis(50),
            locks.acquire("Food", "checking", august()),
        )
        .await;
        assert!(reacquired.is_ok());
    }

    #[tokio::test]
    async fn test_overlapping_account_key_blocks() {
        let locks = ScopeLocks::new();

        let _guard = locks.acquire("Food", "checking", august()).await;
        let blocked = timeout(
            Duration::from_millis(50),
            locks.acquire("Transport", "checking", august()),
        )
        .await;
        assert!(blocked.is_err());
    }

    #[tokio::test]
    async fn test_disjoint_keys_do_not_block() {
        let locks = ScopeLocks::new();

        let _guard = locks.acquire("Food", "checking", august()).await;
        let other_scope = timeout(
            Duration::from_millis(50),
            locks.acquire("Transport", "savings", august()),
        )
        .await;
        assert!(other_scope.is_ok());

        let other_month = timeout(
            Duration::from_millis(50),
            locks.acquire("Food", "checking", august().succ()),
        )
        .await;
        assert!(other_month.is_ok());
    }
}
