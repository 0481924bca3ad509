use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::subscriber::Subscriber;

pub mod memory;
pub mod postgres;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// A subscriber with the same email already exists, active or not.
    #[error("a subscriber with this email already exists")]
    DuplicateEmail,
    /// A stored row could not be mapped back into a domain subscriber.
    #[error("stored subscriber record is invalid: {0}")]
    InvalidRecord(String),
    /// The underlying store could not be reached. Not retried here; retrying
    /// would mask a persistent outage from the caller.
    #[error(transparent)]
    Unavailable(#[from] anyhow::Error),
}

/// Persistence contract for subscriber records.
///
/// Implementations must enforce uniqueness of `email` and `unsubscribe_token`,
/// and `deactivate_by_token` must be conditional on the row still being
/// active, so the registry's idempotence guarantees hold under concurrent
/// requests.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError>;

    /// Insert a new subscriber. Fails with [`StoreError::DuplicateEmail`] when
    /// a row for the same email already exists.
    async fn insert(&self, subscriber: &Subscriber) -> Result<(), StoreError>;

    /// Mark the subscriber for `email` active and refresh its `subscribed_at`.
    /// Returns the updated record, or `None` when no row exists for `email`.
    async fn reactivate(
        &self,
        email: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Subscriber>, StoreError>;

    /// Atomically deactivate the active subscriber holding `token`. Returns
    /// `None` when no active subscriber matches, including when the token was
    /// already consumed.
    async fn deactivate_by_token(&self, token: &str) -> Result<Option<Subscriber>, StoreError>;

    /// A snapshot of all currently active subscribers.
    async fn list_active(&self) -> Result<Vec<Subscriber>, StoreError>;
}
