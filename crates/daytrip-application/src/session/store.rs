use super::planner::{PlannerSession, SessionId};
use chrono::{DateTime, Duration, Utc};
use daytrip_core::config::ServerConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::{Mutex, RwLock};

pub const DEFAULT_IDLE_TIMEOUT_MINUTES: i64 = 60;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

struct SessionEntry {
    session: Arc<Mutex<PlannerSession>>,
    /// Unix millis of the last lookup; updated under the map's read lock.
    last_seen: AtomicI64,
}

impl SessionEntry {
    fn new(session: PlannerSession, now: DateTime<Utc>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            last_seen: AtomicI64::new(now.timestamp_millis()),
        }
    }

    fn touch(&self, now: DateTime<Utc>) {
        self.last_seen.store(now.timestamp_millis(), Ordering::Relaxed);
    }

    fn last_seen(&self) -> i64 {
        self.last_seen.load(Ordering::Relaxed)
    }
}

/// In-memory registry of planner sessions.
///
/// Each session sits behind its own mutex, so a session handles one
/// recommendation at a time while different sessions proceed in parallel.
///
/// Sessions idle for longer than the idle timeout are dropped, together with
/// their transcripts, whenever a new session is created. If the store is
/// still full after that, the least recently seen session is dropped.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_limits(
            Duration::minutes(DEFAULT_IDLE_TIMEOUT_MINUTES),
            DEFAULT_MAX_SESSIONS,
        )
    }

    /// `max_sessions` is clamped to at least 1.
    pub fn with_limits(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Limits from the `[server]` table of config.toml.
    pub fn from_config(server: &ServerConfig) -> Self {
        Self::with_limits(
            Duration::minutes(i64::from(server.session_idle_minutes)),
            server.max_sessions,
        )
    }

    /// Returns the session for `id`, or `None` if it is unknown. A hit counts
    /// as activity.
    pub async fn get(&self, id: &SessionId) -> Option<Arc<Mutex<PlannerSession>>> {
        let sessions = self.sessions.read().await;
        sessions.get(id).map(|entry| {
            entry.touch(Utc::now());
            entry.session.clone()
        })
    }

    /// Returns the session for `id`, creating a fresh one when `id` is absent
    /// or unknown. Unknown ids are never adopted; the returned id is the one
    /// the caller should hand back to the browser.
    pub async fn get_or_create<F>(
        &self,
        id: Option<SessionId>,
        init: F,
    ) -> (SessionId, Arc<Mutex<PlannerSession>>)
    where
        F: FnOnce(SessionId) -> PlannerSession,
    {
        if let Some(id) = id {
            if let Some(session) = self.get(&id).await {
                return (id, session);
            }
        }

        let now = Utc::now();
        let id = SessionId::new();
        let entry = SessionEntry::new(init(id), now);
        let session = entry.session.clone();

        let mut sessions = self.sessions.write().await;
        let expired = Self::evict_idle_locked(&mut sessions, now - self.idle_timeout);
        if expired > 0 {
            tracing::info!(expired, "[SessionStore] Dropped idle planner sessions");
        }
        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen())
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::warn!(session_id = %oldest, "[SessionStore] Store full, dropped oldest session");
        }
        sessions.insert(id, entry);

        tracing::debug!(session_id = %id, "[SessionStore] Created planner session");
        (id, session)
    }

    /// Drops every session not seen since `now - idle_timeout`. Returns how
    /// many were removed.
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::evict_idle_locked(&mut sessions, now - self.idle_timeout)
    }

    fn evict_idle_locked(
        sessions: &mut HashMap<SessionId, SessionEntry>,
        cutoff: DateTime<Utc>,
    ) -> usize {
        let cutoff = cutoff.timestamp_millis();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen() >= cutoff);
        before - sessions.len()
    }

    pub async fn remove(&self, id: &SessionId) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_or_create_reuses_known_id() {
        let store = SessionStore::new();
        let (id, first) = store.get_or_create(None, PlannerSession::new).await;
        let (same_id, second) = store.get_or_create(Some(id), PlannerSession::new).await;

        assert_eq!(id, same_id);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_id_gets_fresh_session() {
        let store = SessionStore::new();
        let stale = SessionId::new();
        let (id, session) = store.get_or_create(Some(stale), PlannerSession::new).await;

        assert_ne!(id, stale);
        assert_eq!(session.lock().await.id(), id);
        assert!(store.get(&stale).await.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new();
        let (id, _) = store.get_or_create(None, PlannerSession::new).await;

        assert!(store.remove(&id).await);
        assert!(!store.remove(&id).await);
        assert!(store.get(&id).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let store = SessionStore::with_limits(Duration::minutes(30), 100);
        let (id, _) = store.get_or_create(None, PlannerSession::new).await;

        assert_eq!(store.evict_idle(Utc::now() + Duration::minutes(10)).await, 0);
        assert!(store.get(&id).await.is_some());

        assert_eq!(store.evict_idle(Utc::now() + Duration::minutes(31)).await, 1);
        assert!(store.get(&id).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_from_config_applies_cap() {
        let server = ServerConfig {
            max_sessions: 2,
            ..ServerConfig::default()
        };
        let store = SessionStore::from_config(&server);
        for _ in 0..5 {
            store.get_or_create(None, PlannerSession::new).await;
        }
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_expired_sessions_are_dropped_on_create() {
        let store = SessionStore::with_limits(Duration::zero(), 100);
        for _ in 0..50 {
            store.get_or_create(None, PlannerSession::new).await;
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        // Every earlier session is older than a zero idle timeout.
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_capacity_drops_least_recently_seen() {
        let pause = || tokio::time::sleep(std::time::Duration::from_millis(5));
        let store = SessionStore::with_limits(Duration::minutes(60), 3);
        let (first, _) = store.get_or_create(None, PlannerSession::new).await;
        pause().await;
        let (second, _) = store.get_or_create(None, PlannerSession::new).await;
        pause().await;
        let (third, _) = store.get_or_create(None, PlannerSession::new).await;
        pause().await;

        // Seeing the first session again makes the second the oldest.
        assert!(store.get(&first).await.is_some());
        pause().await;

        let (fourth, _) = store.get_or_create(None, PlannerSession::new).await;

        assert_eq!(store.len().await, 3);
        assert!(store.get(&second).await.is_none());
        assert!(store.get(&first).await.is_some());
        assert!(store.get(&third).await.is_some());
        assert!(store.get(&fourth).await.is_some());
    }
}
