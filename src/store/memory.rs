use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{StoreError, SubscriberStore};
use crate::domain::subscriber::Subscriber;

/// Mutex-backed store keyed by email, used by the test harness.
///
/// It mirrors the semantics the Postgres schema enforces: unique emails and
/// deactivation conditional on the row still being active.
#[derive(Default)]
pub struct InMemorySubscriberStore {
    subscribers: Mutex<HashMap<String, Subscriber>>,
}

impl InMemorySubscriberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberStore for InMemorySubscriberStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError> {
        let subscribers = self.subscribers.lock().expect("store mutex poisoned");
        Ok(subscribers.get(email).cloned())
    }

    async fn insert(&self, subscriber: &Subscriber) -> Result<(), StoreError> {
        let mut subscribers = self.subscribers.lock().expect("store mutex poisoned");
        if subscribers.contains_key(subscriber.email.as_ref()) {
            return Err(StoreError::DuplicateEmail);
        }

        subscribers.insert(subscriber.email.as_ref().to_owned(), subscriber.clone());
        Ok(())
    }

    async fn reactivate(
        &self,
        email: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Subscriber>, StoreError> {
        let mut subscribers = self.subscribers.lock().expect("store mutex poisoned");
        Ok(subscribers.get_mut(email).map(|subscriber| {
            subscriber.is_active = true;
            subscriber.subscribed_at = at;
            subscriber.clone()
        }))
    }

    async fn deactivate_by_token(&self, token: &str) -> Result<Option<Subscriber>, StoreError> {
        let mut subscribers = self.subscribers.lock().expect("store mutex poisoned");
        Ok(subscribers
            .values_mut()
            .find(|subscriber| subscriber.is_active && subscriber.unsubscribe_token.as_ref() == token)
            .map(|subscriber| {
                subscriber.is_active = false;
                subscriber.clone()
            }))
    }

    async fn list_active(&self) -> Result<Vec<Subscriber>, StoreError> {
        let subscribers = self.subscribers.lock().expect("store mutex poisoned");
        Ok(subscribers
            .values()
            .filter(|subscriber| subscriber.is_active)
            .cloned()
            .collect())
    }
}
