//! Anagram service — compare two strings and count positive matches.

use devstock_domain::anagram::{IS_ANAGRAM_COUNTER, is_anagram};
use devstock_domain::error::DevstockError;

use crate::ports::CounterStore;

/// Application service behind the anagram check.
pub struct AnagramService<C> {
    counter: C,
}

impl<C: CounterStore> AnagramService<C> {
    /// Create a new service backed by the given counter store.
    pub fn new(counter: C) -> Self {
        Self { counter }
    }

    /// Set the match counter back to zero.
    ///
    /// # Errors
    ///
    /// Returns [`DevstockError::Counter`] if the counter store is unreachable.
    #[tracing::instrument(skip(self))]
    pub async fn reset_counter(&self) -> Result<(), DevstockError> {
        self.counter.reset(IS_ANAGRAM_COUNTER).await
    }

    /// Compare `first` and `second`, counting the pair when they match.
    ///
    /// The counter store is read on every call, so an unreachable store
    /// fails the request whatever the outcome of the comparison.
    ///
    /// # Errors
    ///
    /// Returns [`DevstockError::Counter`] if the counter store is unreachable.
    #[tracing::instrument(skip(self))]
    pub async fn check(&self, first: &str, second: &str) -> Result<bool, DevstockError> {
        let current = self.counter.get(IS_ANAGRAM_COUNTER).await?;
        if !is_anagram(first, second) {
            tracing::debug!(total = current, "anagram mismatch");
            return Ok(false);
        }
        let total = self.counter.increment(IS_ANAGRAM_COUNTER).await?;
        tracing::debug!(total, "anagram matched");
        Ok(true)
    }

    /// Number of matches counted since the last reset.
    ///
    /// # Errors
    ///
    /// Returns [`DevstockError::Counter`] if the counter store is unreachable.
    pub async fn matches(&self) -> Result<i64, DevstockError> {
        self.counter.get(IS_ANAGRAM_COUNTER).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemoryCounterStore;

    fn make_service() -> AnagramService<InMemoryCounterStore> {
        AnagramService::new(InMemoryCounterStore::default())
    }

    #[tokio::test]
    async fn should_count_match_when_sets_are_equal() {
        let service = make_service();
        assert!(service.check("aab", "ba").await.unwrap());
        assert_eq!(service.matches().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn should_not_count_when_sets_differ() {
        let service = make_service();
        assert!(!service.check("abc", "abd").await.unwrap());
        assert_eq!(service.matches().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_count_empty_strings_as_match() {
        let service = make_service();
        assert!(service.check("", "").await.unwrap());
        assert_eq!(service.matches().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn should_never_decrease_across_sequential_checks() {
        let service = make_service();
        let pairs = [("ab", "ba"), ("x", "y"), ("aa", "a"), ("", "z"), ("abc", "cab")];
        let mut previous = 0;
        for (first, second) in pairs {
            service.check(first, second).await.unwrap();
            let current = service.matches().await.unwrap();
            assert!(current >= previous);
            previous = current;
        }
        assert_eq!(previous, 3);
    }

    #[tokio::test]
    async fn should_zero_counter_when_reset() {
        let service = make_service();
        service.check("a", "a").await.unwrap();
        service.reset_counter().await.unwrap();
        assert_eq!(service.matches().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_fail_when_counter_store_unavailable_and_pair_matches() {
        let service = AnagramService::new(InMemoryCounterStore::unavailable());
        let result = service.check("ab", "ba").await;
        assert!(matches!(result, Err(DevstockError::Counter(_))));
    }

    #[tokio::test]
    async fn should_fail_when_counter_store_unavailable_and_pair_differs() {
        let service = AnagramService::new(InMemoryCounterStore::unavailable());
        let result = service.check("ab", "cd").await;
        assert!(matches!(result, Err(DevstockError::Counter(_))));
    }
}
