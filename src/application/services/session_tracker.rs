use std::sync::Arc;

use crate::application::ports::{SessionStore, SessionStoreError};
use crate::domain::{Coordinate, Session, UserId, VisitOutcome};

use super::keyed_mutex::{KeyedGuard, KeyedMutex};

/// Drives the per-listener session state machine.
///
/// A [`Visit`] keeps the listener's lock until it is recorded or dropped, so
/// two requests from the same user never interleave their updates.
pub struct SessionTracker {
    store: Arc<dyn SessionStore>,
    locks: KeyedMutex<UserId>,
    relocation_threshold_km: f64,
}

pub struct Visit {
    user_id: UserId,
    session: Session,
    outcome: VisitOutcome,
    _guard: KeyedGuard<UserId>,
}

impl Visit {
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn outcome(&self) -> VisitOutcome {
        self.outcome
    }
}

impl SessionTracker {
    pub fn new(store: Arc<dyn SessionStore>, relocation_threshold_km: f64) -> Self {
        Self {
            store,
            locks: KeyedMutex::new(),
            relocation_threshold_km,
        }
    }

    /// Applies the transition for a request at `at` and persists it.
    pub async fn begin_visit(
        &self,
        user_id: &UserId,
        at: Coordinate,
    ) -> Result<Visit, SessionStoreError> {
        let guard = self.locks.lock(user_id).await;

        let (session, outcome) = match self.store.get(user_id).await? {
            Some(mut session) => {
                let outcome = session.observe(at, self.relocation_threshold_km);
                (session, outcome)
            }
            None => (Session::start(at), VisitOutcome::Started),
        };

        self.store.put(user_id, session.clone()).await?;

        tracing::debug!(
            user_id = %user_id,
            outcome = ?outcome,
            revisit_count = session.revisit_count(),
            stage = %session.stage(),
            "Session visit recorded"
        );

        Ok(Visit {
            user_id: user_id.clone(),
            session,
            outcome,
            _guard: guard,
        })
    }

    /// Feeds the generated answer back into the session, then releases the
    /// listener's lock. Returns whether the answer was retained.
    pub async fn record_answer(
        &self,
        visit: Visit,
        answer: &str,
    ) -> Result<bool, SessionStoreError> {
        let Visit {
            user_id,
            mut session,
            _guard,
            ..
        } = visit;

        if answer.trim().is_empty() {
            return Ok(false);
        }

        if !session.record_answer(answer.to_string()) {
            return Ok(false);
        }

        self.store.put(&user_id, session).await?;
        Ok(true)
    }
}
