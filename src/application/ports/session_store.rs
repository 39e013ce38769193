use async_trait::async_trait;

use crate::domain::{Session, UserId};

/// Backing storage for historical-narration sessions.
///
/// Implementations only store and fetch; serializing concurrent updates for a
/// user is the caller's job.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: &UserId) -> Result<Option<Session>, SessionStoreError>;

    async fn put(&self, user_id: &UserId, session: Session) -> Result<(), SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session backend unavailable: {0}")]
    Unavailable(String),
}
