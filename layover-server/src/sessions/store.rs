//! Session storage.
//!
//! Sessions live in memory and expire after a period without access, so a
//! restart loses them. Capacity is bounded; the least useful entries are
//! evicted first once it is reached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tracing::debug;

use super::error::SessionError;
use super::session::{Session, SessionId, SessionUpdate};

/// Stores sessions by id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session and return its id.
    async fn create(&self, session: Session) -> SessionId;

    /// Fetch a live session.
    async fn get(&self, id: SessionId) -> Result<Session, SessionError>;

    /// Apply `update` to a live session and return the result.
    async fn update(&self, id: SessionId, update: SessionUpdate) -> Result<Session, SessionError>;
}

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sessions not read or written for this long are dropped.
    pub time_to_idle: Duration,

    /// Maximum number of live sessions.
    pub max_capacity: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_to_idle: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// In-memory session store backed by moka.
#[derive(Clone)]
pub struct MokaSessionStore {
    sessions: MokaCache<SessionId, Arc<Session>>,
}

impl MokaSessionStore {
    /// Create a new store with the given configuration.
    pub fn new(config: &SessionConfig) -> Self {
        let sessions = MokaCache::builder()
            .time_to_idle(config.time_to_idle)
            .max_capacity(config.max_capacity)
            .build();

        Self { sessions }
    }

    /// Approximate number of live sessions (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}

impl Default for MokaSessionStore {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

#[async_trait]
impl SessionStore for MokaSessionStore {
    async fn create(&self, session: Session) -> SessionId {
        let id = session.id;
        self.sessions.insert(id, Arc::new(session)).await;
        debug!("Created session {}", id);
        id
    }

    async fn get(&self, id: SessionId) -> Result<Session, SessionError> {
        self.sessions
            .get(&id)
            .await
            .map(|s| Session::clone(&s))
            .ok_or(SessionError::NotFound(id))
    }

    // Read-modify-write; concurrent updates to one session race and the
    // last writer wins.
    async fn update(&self, id: SessionId, update: SessionUpdate) -> Result<Session, SessionError> {
        let mut session = self.get(id).await?;
        session.apply(update);
        self.sessions.insert(id, Arc::new(session.clone())).await;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Refinement, parse_timestamp};
    use crate::sessions::session::test_support::{context, plan};

    fn session() -> Session {
        Session::new(
            context(),
            plan("first"),
            parse_timestamp("2024-03-16T00:00:00Z").unwrap(),
        )
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = MokaSessionStore::default();
        let session = session();

        let id = store.create(session.clone()).await;
        assert_eq!(id, session.id);
        assert_eq!(store.get(id).await, Ok(session));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = MokaSessionStore::default();
        let id = SessionId::generate();
        assert_eq!(store.get(id).await, Err(SessionError::NotFound(id)));
    }

    #[tokio::test]
    async fn update_applies_and_persists() {
        let store = MokaSessionStore::default();
        let id = store.create(session()).await;

        let update = SessionUpdate::exchange(
            "cheaper",
            Refinement {
                reply: "ok".to_string(),
                plan: plan("second"),
            },
            parse_timestamp("2024-03-16T00:01:00Z").unwrap(),
        );
        let updated = store.update(id, update).await.unwrap();
        assert_eq!(updated.plan.summary, "second");

        let stored = store.get(id).await.unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.messages.len(), 2);
    }

    #[tokio::test]
    async fn update_of_missing_session_fails() {
        let store = MokaSessionStore::default();
        let id = SessionId::generate();
        let update = SessionUpdate {
            plan: None,
            messages: vec![],
            at: parse_timestamp("2024-03-16T00:01:00Z").unwrap(),
        };
        assert_eq!(store.update(id, update).await, Err(SessionError::NotFound(id)));
        assert!(store.get(id).await.is_err());
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let store = MokaSessionStore::new(&SessionConfig {
            time_to_idle: Duration::from_millis(50),
            max_capacity: 10,
        });
        let id = store.create(session()).await;

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(store.get(id).await.is_err());
    }
}
