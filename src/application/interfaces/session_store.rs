use async_trait::async_trait;

use crate::domain::{DomainError, Session};

/// Store trait linking a generated session identifier to one uploaded
/// contract's text.
///
/// Entries are never mutated after creation, so implementations only need a
/// concurrency-safe mapping: concurrent creations must not collide
/// identifiers, and a concurrent read either sees the full entry or
/// [`DomainError::SessionNotFound`], never a partial one.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store the document text under a freshly generated identifier.
    async fn create(&self, document_text: String) -> Result<Session, DomainError>;

    /// Look up a session by identifier.
    async fn get(&self, session_id: &str) -> Result<Session, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
