//! In-memory session storage.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::SessionStore;
use crate::domain::{DomainError, Session};

/// Bounds on session lifetime and store size.
///
/// The baseline behavior is unbounded: entries accumulate for the process
/// lifetime and are lost on restart. Both limits are opt-in so deployments
/// under sustained load can cap memory growth.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpiryPolicy {
    ttl: Option<Duration>,
    max_entries: Option<usize>,
}

impl ExpiryPolicy {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    fn is_expired(&self, session: &Session) -> bool {
        match self.ttl {
            Some(ttl) => session.age_millis() >= ttl.as_millis() as i64,
            None => false,
        }
    }
}

struct StoreState {
    entries: HashMap<String, Session>,
    /// Session ids in insertion order, for capacity eviction.
    order: VecDeque<String>,
}

/// In-memory [`SessionStore`] guarding a plain map with an async mutex.
///
/// Entries are immutable after insertion, so a reader always observes either
/// the complete session or a miss. TTL-expired entries are dropped lazily on
/// read; capacity eviction removes the oldest entries on write.
pub struct InMemorySessionStore {
    state: Arc<Mutex<StoreState>>,
    policy: ExpiryPolicy,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_policy(ExpiryPolicy::unbounded())
    }

    pub fn with_policy(policy: ExpiryPolicy) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                entries: HashMap::new(),
                order: VecDeque::new(),
            })),
            policy,
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, document_text: String) -> Result<Session, DomainError> {
        let mut state = self.state.lock().await;

        // The id combines a millisecond timestamp with a UUIDv4, so a
        // collision is never expected; regenerate rather than overwrite if
        // one ever occurs.
        let mut session = Session::new(document_text);
        while state.entries.contains_key(session.id()) {
            session = Session::new(session.document_text().to_string());
        }

        state.order.push_back(session.id().to_string());
        state
            .entries
            .insert(session.id().to_string(), session.clone());

        if let Some(max_entries) = self.policy.max_entries {
            while state.entries.len() > max_entries {
                // Ids already dropped by TTL expiry may linger in the order
                // queue; skip them.
                match state.order.pop_front() {
                    Some(oldest) => {
                        if state.entries.remove(&oldest).is_some() {
                            debug!("Evicted session {oldest} over capacity {max_entries}");
                        }
                    }
                    None => break,
                }
            }
        }

        debug!(
            "Created session {} ({} entries stored)",
            session.id(),
            state.entries.len()
        );

        Ok(session)
    }

    async fn get(&self, session_id: &str) -> Result<Session, DomainError> {
        let mut state = self.state.lock().await;

        let session = state
            .entries
            .get(session_id)
            .cloned()
            .ok_or_else(|| DomainError::session_not_found(session_id))?;

        if self.policy.is_expired(&session) {
            state.entries.remove(session_id);
            debug!("Dropped expired session {session_id}");
            return Err(DomainError::session_not_found(session_id));
        }

        Ok(session)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let state = self.state.lock().await;
        Ok(state.entries.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_round_trip() {
        let store = InMemorySessionStore::new();

        let session = store.create("contract text".to_string()).await.unwrap();
        let fetched = store.get(session.id()).await.unwrap();

        assert_eq!(fetched.document_text(), "contract text");
        assert_eq!(fetched.id(), session.id());
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let store = InMemorySessionStore::new();

        let err = store.get("never-issued").await.unwrap_err();

        assert!(err.is_session_not_found());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_creates_never_collide() {
        let store = Arc::new(InMemorySessionStore::new());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(format!("doc {i}")).await.unwrap() })
            })
            .collect();

        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            let session = handle.await.unwrap();
            assert!(ids.insert(session.id().to_string()), "duplicate session id");
        }

        assert_eq!(store.count().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_ttl_expiry_reads_as_not_found() {
        let policy = ExpiryPolicy::unbounded().with_ttl(Duration::ZERO);
        let store = InMemorySessionStore::with_policy(policy);

        let session = store.create("doc".to_string()).await.unwrap();
        let err = store.get(session.id()).await.unwrap_err();

        assert!(err.is_session_not_found());
        // The expired entry is dropped, not just hidden.
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest_first() {
        let policy = ExpiryPolicy::unbounded().with_max_entries(2);
        let store = InMemorySessionStore::with_policy(policy);

        let first = store.create("first".to_string()).await.unwrap();
        let second = store.create("second".to_string()).await.unwrap();
        let third = store.create("third".to_string()).await.unwrap();

        assert!(store.get(first.id()).await.unwrap_err().is_session_not_found());
        assert_eq!(store.get(second.id()).await.unwrap().document_text(), "second");
        assert_eq!(store.get(third.id()).await.unwrap().document_text(), "third");
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unbounded_store_keeps_everything() {
        let store = InMemorySessionStore::new();

        for i in 0..10 {
            store.create(format!("doc {i}")).await.unwrap();
        }

        assert_eq!(store.count().await.unwrap(), 10);
    }
}
