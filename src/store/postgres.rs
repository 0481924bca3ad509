use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, SubscriberStore};
use crate::domain::subscriber::{email::Email, name::Name, token::UnsubscribeToken, Subscriber};

#[derive(Clone)]
pub struct PgSubscriberStore {
    pool: PgPool,
}

impl PgSubscriberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SubscriberRow {
    id: Uuid,
    email: String,
    name: String,
    unsubscribe_token: String,
    is_active: bool,
    subscribed_at: DateTime<Utc>,
}

impl TryFrom<SubscriberRow> for Subscriber {
    type Error = String;

    fn try_from(row: SubscriberRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            email: Email::try_from(row.email)?,
            name: Name::try_from(row.name)?,
            unsubscribe_token: UnsubscribeToken::try_from(row.unsubscribe_token)?,
            is_active: row.is_active,
            subscribed_at: row.subscribed_at,
        })
    }
}

fn store_fault(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(anyhow::anyhow!(e))
}

fn into_subscriber(row: Option<SubscriberRow>) -> Result<Option<Subscriber>, StoreError> {
    row.map(Subscriber::try_from)
        .transpose()
        .map_err(StoreError::InvalidRecord)
}

#[async_trait]
impl SubscriberStore for PgSubscriberStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError> {
        let row = sqlx::query_as::<_, SubscriberRow>(
            "SELECT id, email, name, unsubscribe_token, is_active, subscribed_at \
             FROM subscribers WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_fault)?;

        into_subscriber(row)
    }

    async fn insert(&self, subscriber: &Subscriber) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO subscribers (id, email, name, unsubscribe_token, is_active, subscribed_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(subscriber.id)
        .bind(subscriber.email.as_ref())
        .bind(subscriber.name.as_ref())
        .bind(subscriber.unsubscribe_token.as_ref())
        .bind(subscriber.is_active)
        .bind(subscriber.subscribed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                StoreError::DuplicateEmail
            }
            other => store_fault(other),
        })?;

        Ok(())
    }

    async fn reactivate(
        &self,
        email: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Subscriber>, StoreError> {
        let row = sqlx::query_as::<_, SubscriberRow>(
            "UPDATE subscribers SET is_active = TRUE, subscribed_at = $2 \
             WHERE email = $1 \
             RETURNING id, email, name, unsubscribe_token, is_active, subscribed_at",
        )
        .bind(email)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_fault)?;

        into_subscriber(row)
    }

    async fn deactivate_by_token(&self, token: &str) -> Result<Option<Subscriber>, StoreError> {
        // The is_active guard makes double-unsubscribe a no-op even when two
        // requests carrying the same token race each other.
        let row = sqlx::query_as::<_, SubscriberRow>(
            "UPDATE subscribers SET is_active = FALSE \
             WHERE unsubscribe_token = $1 AND is_active = TRUE \
             RETURNING id, email, name, unsubscribe_token, is_active, subscribed_at",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_fault)?;

        into_subscriber(row)
    }

    async fn list_active(&self) -> Result<Vec<Subscriber>, StoreError> {
        let rows = sqlx::query_as::<_, SubscriberRow>(
            "SELECT id, email, name, unsubscribe_token, is_active, subscribed_at \
             FROM subscribers WHERE is_active = TRUE",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_fault)?;

        let subscribers = rows
            .into_iter()
            .filter_map(|row| match Subscriber::try_from(row) {
                Ok(subscriber) => Some(subscriber),
                Err(e) => {
                    tracing::warn!(
                        detail = %e,
                        "Skipping an active subscriber. Their stored contact details are invalid."
                    );
                    None
                }
            })
            .collect();

        Ok(subscribers)
    }
}
