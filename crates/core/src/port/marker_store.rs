// Marker Store Port (Interface)
// Abstraction over the shared set store holding the two target sets

use crate::domain::DisposalMethod;
use crate::error::Result;
use async_trait::async_trait;

/// Atomic set store holding one target set per disposal method
///
/// All coordination is delegated to the backend: each call is atomic on its
/// own and implementations keep no client-side cache. No retries happen at
/// this layer; backend failures surface as `AppError::StoreUnavailable`.
#[async_trait]
pub trait MarkerStore: Send + Sync {
    /// Insert a marker into the method's target set (no-op if present)
    async fn add(&self, set: DisposalMethod, marker: &str) -> Result<()>;

    /// Remove a marker from the method's target set (no-op if absent)
    async fn remove(&self, set: DisposalMethod, marker: &str) -> Result<()>;

    /// Remove the whole target set
    async fn clear(&self, set: DisposalMethod) -> Result<()>;

    /// Current members of the target set. Callers must not rely on ordering.
    async fn members(&self, set: DisposalMethod) -> Result<Vec<String>>;

    /// True iff at least one candidate is a current member
    async fn contains_any(&self, set: DisposalMethod, candidates: &[String]) -> Result<bool>;

    /// Membership test against two sets in one round trip
    ///
    /// Observes a consistent snapshot no older than call start; markers
    /// written concurrently need not be seen. The default issues two
    /// sequential lookups, which keeps the contract but loses the
    /// round-trip saving.
    async fn contains_any_batched(
        &self,
        set_a: DisposalMethod,
        candidates_a: &[String],
        set_b: DisposalMethod,
        candidates_b: &[String],
    ) -> Result<(bool, bool)> {
        let hit_a = self.contains_any(set_a, candidates_a).await?;
        let hit_b = self.contains_any(set_b, candidates_b).await?;
        Ok((hit_a, hit_b))
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory marker store with failure injection
    ///
    /// Every trait call counts as one round trip, including the batched
    /// lookup, so tests can assert how many trips a query costs.
    #[derive(Default)]
    pub struct InMemoryMarkerStore {
        sets: Mutex<HashMap<DisposalMethod, HashSet<String>>>,
        unavailable: AtomicBool,
        round_trips: AtomicUsize,
    }

    impl InMemoryMarkerStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent call fail with StoreUnavailable
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        pub fn round_trips(&self) -> usize {
            self.round_trips.load(Ordering::SeqCst)
        }

        pub fn reset_round_trips(&self) {
            self.round_trips.store(0, Ordering::SeqCst);
        }

        fn trip(&self) -> Result<()> {
            self.round_trips.fetch_add(1, Ordering::SeqCst);
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(AppError::StoreUnavailable(
                    "in-memory store marked unavailable".to_string(),
                ));
            }
            Ok(())
        }

        fn hit(
            sets: &HashMap<DisposalMethod, HashSet<String>>,
            set: DisposalMethod,
            candidates: &[String],
        ) -> bool {
            sets.get(&set)
                .map(|members| candidates.iter().any(|c| members.contains(c)))
                .unwrap_or(false)
        }
    }

    #[async_trait]
    impl MarkerStore for InMemoryMarkerStore {
        async fn add(&self, set: DisposalMethod, marker: &str) -> Result<()> {
            self.trip()?;
            self.sets
                .lock()
                .unwrap()
                .entry(set)
                .or_default()
                .insert(marker.to_string());
            Ok(())
        }

        async fn remove(&self, set: DisposalMethod, marker: &str) -> Result<()> {
            self.trip()?;
            if let Some(members) = self.sets.lock().unwrap().get_mut(&set) {
                members.remove(marker);
            }
            Ok(())
        }

        async fn clear(&self, set: DisposalMethod) -> Result<()> {
            self.trip()?;
            self.sets.lock().unwrap().remove(&set);
            Ok(())
        }

        async fn members(&self, set: DisposalMethod) -> Result<Vec<String>> {
            self.trip()?;
            Ok(self
                .sets
                .lock()
                .unwrap()
                .get(&set)
                .map(|members| members.iter().cloned().collect())
                .unwrap_or_default())
        }

        async fn contains_any(&self, set: DisposalMethod, candidates: &[String]) -> Result<bool> {
            self.trip()?;
            Ok(Self::hit(&self.sets.lock().unwrap(), set, candidates))
        }

        async fn contains_any_batched(
            &self,
            set_a: DisposalMethod,
            candidates_a: &[String],
            set_b: DisposalMethod,
            candidates_b: &[String],
        ) -> Result<(bool, bool)> {
            self.trip()?;
            // One lock for both answers: a single snapshot
            let sets = self.sets.lock().unwrap();
            Ok((
                Self::hit(&sets, set_a, candidates_a),
                Self::hit(&sets, set_b, candidates_b),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::InMemoryMarkerStore;
    use super::*;
    use crate::error::AppError;

    /// Store relying on the default two-call batched lookup
    struct UnbatchedStore(InMemoryMarkerStore);

    #[async_trait]
    impl MarkerStore for UnbatchedStore {
        async fn add(&self, set: DisposalMethod, marker: &str) -> Result<()> {
            self.0.add(set, marker).await
        }
        async fn remove(&self, set: DisposalMethod, marker: &str) -> Result<()> {
            self.0.remove(set, marker).await
        }
        async fn clear(&self, set: DisposalMethod) -> Result<()> {
            self.0.clear(set).await
        }
        async fn members(&self, set: DisposalMethod) -> Result<Vec<String>> {
            self.0.members(set).await
        }
        async fn contains_any(&self, set: DisposalMethod, candidates: &[String]) -> Result<bool> {
            self.0.contains_any(set, candidates).await
        }
    }

    fn markers(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_add_and_remove_are_idempotent() {
        let store = InMemoryMarkerStore::new();

        store.add(DisposalMethod::Kill, "jid:a").await.unwrap();
        store.add(DisposalMethod::Kill, "jid:a").await.unwrap();
        assert_eq!(store.members(DisposalMethod::Kill).await.unwrap().len(), 1);

        store.remove(DisposalMethod::Kill, "jid:a").await.unwrap();
        store.remove(DisposalMethod::Kill, "jid:a").await.unwrap();
        assert!(store.members(DisposalMethod::Kill).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_contains_any_empty_candidates() {
        let store = InMemoryMarkerStore::new();
        store.add(DisposalMethod::Kill, "jid:a").await.unwrap();

        assert!(!store.contains_any(DisposalMethod::Kill, &[]).await.unwrap());
    }

    #[tokio::test]
    async fn test_default_batched_lookup_matches_native() {
        let store = UnbatchedStore(InMemoryMarkerStore::new());
        store.add(DisposalMethod::Discard, "class:X").await.unwrap();
        store.0.reset_round_trips();

        let candidates = markers(&["jid:1", "class:X"]);
        let result = store
            .contains_any_batched(
                DisposalMethod::Kill,
                &candidates,
                DisposalMethod::Discard,
                &candidates,
            )
            .await
            .unwrap();

        assert_eq!(result, (false, true));
        // Fallback costs two trips instead of one
        assert_eq!(store.0.round_trips(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_store_surfaces_error() {
        let store = InMemoryMarkerStore::new();
        store.set_unavailable(true);

        let err = store.add(DisposalMethod::Kill, "jid:a").await.unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }
}
