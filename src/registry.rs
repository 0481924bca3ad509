//! Subscriber registry: the only code that mutates subscriber state.

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::subscriber::{token::UnsubscribeToken, NewSubscriber, Subscriber};
use crate::store::{StoreError, SubscriberStore};

/// Outcome of a subscribe request.
pub enum SubscribeOutcome {
    /// First subscription for this email.
    Created(Subscriber),
    /// The email had unsubscribed earlier; its existing record was
    /// reactivated.
    Reactivated(Subscriber),
    /// The email is already actively subscribed; nothing was mutated.
    AlreadyActive,
}

#[instrument(name = "Subscribing", skip(store, new_subscriber), fields(email = %new_subscriber.email))]
pub async fn subscribe(
    store: &dyn SubscriberStore,
    new_subscriber: NewSubscriber,
) -> Result<SubscribeOutcome, StoreError> {
    match store.find_by_email(new_subscriber.email.as_ref()).await? {
        Some(existing) if existing.is_active => Ok(SubscribeOutcome::AlreadyActive),
        Some(_) => {
            // The unsubscribe token is kept across the inactive period, so
            // links in previously sent emails keep working.
            match store
                .reactivate(new_subscriber.email.as_ref(), Utc::now())
                .await?
            {
                Some(subscriber) => Ok(SubscribeOutcome::Reactivated(subscriber)),
                None => Ok(SubscribeOutcome::AlreadyActive),
            }
        }
        None => {
            let subscriber = Subscriber {
                id: Uuid::new_v4(),
                name: new_subscriber.name,
                email: new_subscriber.email,
                unsubscribe_token: UnsubscribeToken::generate(),
                is_active: true,
                subscribed_at: Utc::now(),
            };

            match store.insert(&subscriber).await {
                Ok(()) => Ok(SubscribeOutcome::Created(subscriber)),
                // Lost a race against a concurrent subscribe for the same
                // email; the store's unique constraint kept a single record.
                Err(StoreError::DuplicateEmail) => Ok(SubscribeOutcome::AlreadyActive),
                Err(e) => Err(e),
            }
        }
    }
}

/// Deactivate the active subscriber holding `token`.
///
/// Idempotent in effect: the first call for a token deactivates and returns
/// the subscriber, every later call returns `None`.
#[instrument(name = "Deactivating a subscriber", skip(store, token))]
pub async fn deactivate(
    store: &dyn SubscriberStore,
    token: &UnsubscribeToken,
) -> Result<Option<Subscriber>, StoreError> {
    store.deactivate_by_token(token.as_ref()).await
}

/// Snapshot of the subscribers currently eligible for broadcasts.
#[instrument(name = "Listing active subscribers", skip(store))]
pub async fn list_active(store: &dyn SubscriberStore) -> Result<Vec<Subscriber>, StoreError> {
    store.list_active().await
}
