use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{SessionStore, SessionStoreError};
use crate::domain::{Session, UserId};

struct StoredSession {
    session: Session,
    touched: Instant,
}

/// Process-local session table. Sessions idle longer than `idle_ttl` read as
/// absent, and once `max_sessions` is exceeded the least recently touched
/// session is evicted.
pub struct InMemorySessionStore {
    sessions: DashMap<UserId, StoredSession>,
    idle_ttl: Option<Duration>,
    max_sessions: Option<usize>,
}

impl InMemorySessionStore {
    pub fn new(idle_ttl: Option<Duration>, max_sessions: Option<usize>) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_ttl,
            max_sessions,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn is_idle(&self, touched: Instant) -> bool {
        self.idle_ttl
            .map(|ttl| touched.elapsed() > ttl)
            .unwrap_or(false)
    }

    fn evict_over_capacity(&self, keep: &UserId) {
        let Some(max) = self.max_sessions else {
            return;
        };

        while self.sessions.len() > max {
            let oldest = self
                .sessions
                .iter()
                .filter(|entry| entry.key() != keep)
                .min_by_key(|entry| entry.value().touched)
                .map(|entry| entry.key().clone());

            match oldest {
                Some(user_id) => {
                    self.sessions.remove(&user_id);
                    tracing::debug!(user_id = %user_id, "Evicted session over capacity");
                }
                None => break,
            }
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<Session>, SessionStoreError> {
        let found = self
            .sessions
            .get(user_id)
            .map(|entry| (entry.session.clone(), entry.touched));

        match found {
            Some((_, touched)) if self.is_idle(touched) => {
                self.sessions.remove(user_id);
                tracing::debug!(user_id = %user_id, "Session expired after idling");
                Ok(None)
            }
            Some((session, _)) => Ok(Some(session)),
            None => Ok(None),
        }
    }

    async fn put(&self, user_id: &UserId, session: Session) -> Result<(), SessionStoreError> {
        self.sessions.insert(
            user_id.clone(),
            StoredSession {
                session,
                touched: Instant::now(),
            },
        );
        self.evict_over_capacity(user_id);
        Ok(())
    }
}
