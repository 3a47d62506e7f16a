//! In-memory session registry.
//!
//! A process-wide table of live sessions keyed by session id, looked up by
//! merchant token. Clock and timeout are injected so tests can drive expiry
//! deterministically. The table lock is only ever held across synchronous
//! map operations, never across an await point.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use gateway_types::{Session, SessionId};

/// Source of the current time.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Shared in-memory session table.
///
/// Cloning is cheap and shares the same table; the sweeper holds one clone
/// and the auth service another.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
    timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionRegistry {
    /// Creates a registry with the given session timeout and the system clock.
    pub fn new(timeout: Duration) -> Self {
        Self::with_clock(timeout, Arc::new(SystemClock))
    }

    /// Creates a registry with an injected clock (used by tests).
    pub fn with_clock(timeout: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            timeout,
            clock,
        }
    }

    /// Creates a new session for the merchant token.
    ///
    /// Always succeeds. There is deliberately no uniqueness check: a second
    /// login with the same merchant token creates a second, independent
    /// record (multiple concurrent devices).
    pub fn create(&self, merchant_token: &str, perimetre: &str) -> SessionId {
        let now = self.clock.now();
        let session = Session {
            id: SessionId::new(),
            merchant_token: merchant_token.to_string(),
            perimetre: perimetre.to_string(),
            created_at: now,
            expires_at: now + self.timeout,
            last_accessed_at: now,
        };
        let id = session.id;

        self.lock().insert(id, session);
        id
    }

    /// Finds a live session by merchant token.
    ///
    /// Linear scan; the first live match has its `last_accessed_at` updated
    /// and is returned. Expired records for that token are eagerly removed
    /// along the way. Absence is a normal outcome, not an error.
    pub fn find_by_merchant_token(&self, merchant_token: &str) -> Option<Session> {
        let now = self.clock.now();
        let mut sessions = self.lock();

        let expired: Vec<SessionId> = sessions
            .values()
            .filter(|s| s.merchant_token == merchant_token && s.is_expired(now))
            .map(|s| s.id)
            .collect();
        for id in expired {
            sessions.remove(&id);
        }

        let session = sessions
            .values_mut()
            .find(|s| s.merchant_token == merchant_token)?;
        session.last_accessed_at = now;
        Some(session.clone())
    }

    /// Removes the session matching the merchant token.
    ///
    /// Returns whether a record was actually removed.
    pub fn delete(&self, merchant_token: &str) -> bool {
        let mut sessions = self.lock();
        let id = sessions
            .values()
            .find(|s| s.merchant_token == merchant_token)
            .map(|s| s.id);

        match id {
            Some(id) => {
                sessions.remove(&id);
                tracing::info!(session_id = %id, "session deleted");
                true
            }
            None => false,
        }
    }

    /// Removes every expired session, independent of lookups.
    ///
    /// Returns the number of records removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        before - sessions.len()
    }

    /// Number of records currently in the table, expired or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// When a session created right now would expire.
    pub fn next_expiry(&self) -> DateTime<Utc> {
        self.clock.now() + self.timeout
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, Session>> {
        self.sessions.lock().expect("session table lock poisoned")
    }
}
