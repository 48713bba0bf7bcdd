//! Per-client session state.
//!
//! Sessions live in memory only and are lost on restart. An entry expires
//! once it has been idle for the store's TTL, and the store never holds more
//! than `max_sessions` entries: making room evicts expired entries first,
//! then the least recently seen anonymous ones.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Session identifier carried in the session cookie.
pub type SessionId = String;

/// Default idle time after which a session expires (1 day).
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default upper bound on stored sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Authentication and navigation memory for one client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Whether the client has logged in
    pub authenticated: bool,

    /// Name the client logged in with (empty until login)
    pub username: String,

    /// Protected path requested before the login redirect
    pub referrer_path: Option<String>,
}

impl Session {
    /// Where to send the client after a successful login.
    pub fn post_login_target(&self) -> &str {
        self.referrer_path.as_deref().unwrap_or("/")
    }
}

/// A stored session and the last time its client was seen.
#[derive(Debug)]
struct Entry {
    session: Session,
    last_seen: Instant,
}

/// In-memory session store keyed by session id.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
    ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_SESSION_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    /// Create an empty store with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given idle TTL and capacity.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_limits(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Generate a fresh random session id.
    pub fn new_id() -> SessionId {
        Uuid::new_v4().to_string()
    }

    /// Snapshot of a session, or an unauthenticated default if absent or
    /// expired. Reading a live session refreshes its idle timer.
    pub async fn get(&self, id: &str) -> Session {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        if let Some(entry) = sessions.get_mut(id) {
            if !self.is_expired(entry, now) {
                entry.last_seen = now;
                return entry.session.clone();
            }
            sessions.remove(id);
            debug!("Session expired");
        }

        Session::default()
    }

    /// Replace the session stored under `id`.
    pub async fn set(&self, id: &str, session: Session) {
        let mut sessions = self.sessions.write().await;
        self.entry_mut(&mut sessions, id).session = session;
    }

    /// Mutate the session under `id` in place, creating it if needed.
    pub async fn update<F>(&self, id: &str, f: F)
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.sessions.write().await;
        f(&mut self.entry_mut(&mut sessions, id).session);
    }

    /// Remove all state for `id`.
    pub async fn clear(&self, id: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id);
    }

    /// Whether live state is stored under `id`.
    pub async fn contains(&self, id: &str) -> bool {
        let now = Instant::now();
        self.sessions
            .read()
            .await
            .get(id)
            .is_some_and(|entry| !self.is_expired(entry, now))
    }

    /// Remove every expired session and return how many were removed.
    pub async fn prune(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        self.prune_expired(&mut sessions, Instant::now())
    }

    /// Number of stored sessions, including expired ones not yet pruned.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_seen) >= self.ttl
    }

    /// Live entry for `id`, inserted (after making room) if absent or expired.
    fn entry_mut<'a>(
        &self,
        sessions: &'a mut HashMap<SessionId, Entry>,
        id: &str,
    ) -> &'a mut Entry {
        let now = Instant::now();
        let live = sessions
            .get(id)
            .is_some_and(|entry| !self.is_expired(entry, now));

        if !live {
            sessions.remove(id);
            self.make_room(sessions, now);
        }

        let entry = sessions.entry(id.to_string()).or_insert_with(|| Entry {
            session: Session::default(),
            last_seen: now,
        });
        entry.last_seen = now;
        entry
    }

    fn prune_expired(&self, sessions: &mut HashMap<SessionId, Entry>, now: Instant) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed, remaining = sessions.len(), "Pruned expired sessions");
        }
        removed
    }

    /// Free one slot for a new entry.
    fn make_room(&self, sessions: &mut HashMap<SessionId, Entry>, now: Instant) {
        if sessions.len() < self.max_sessions {
            return;
        }

        self.prune_expired(sessions, now);
        while sessions.len() >= self.max_sessions {
            // Anonymous sessions go before authenticated ones, oldest first
            let victim = sessions
                .iter()
                .min_by_key(|(_, entry)| (entry.session.authenticated, entry.last_seen))
                .map(|(id, _)| id.clone());
            match victim {
                Some(victim) => {
                    sessions.remove(&victim);
                    debug!("Evicted least recently seen session");
                }
                None => break,
            }
        }
    }
}
