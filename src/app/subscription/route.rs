use axum::{extract::State, Json};
use tracing::instrument;

use super::schema::{SubscribeBody, SubscribeResponseBody};
use crate::app::error::{AppError, AppResult};
use crate::app::AppState;
use crate::domain::subscriber::NewSubscriber;
use crate::registry::{self, SubscribeOutcome};
use crate::notification;

#[instrument(name = "Adding a new subscriber", skip(state, body), fields(email = %body.email, name = %body.name))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeBody>,
) -> AppResult<Json<SubscribeResponseBody>> {
    let new_subscriber = NewSubscriber::try_from(body).map_err(AppError::ValidationError)?;

    let (status, subscriber) =
        match registry::subscribe(state.store.as_ref(), new_subscriber).await? {
            SubscribeOutcome::Created(subscriber) => ("created", subscriber),
            SubscribeOutcome::Reactivated(subscriber) => ("reactivated", subscriber),
            SubscribeOutcome::AlreadyActive => return Err(AppError::AlreadySubscribed),
        };

    // The subscription is durable at this point; a welcome email that cannot
    // be delivered must not turn it into a failure.
    if let Err(e) = notification::send_welcome(&state.email_client, &subscriber, &state.base_url).await
    {
        tracing::warn!(
            error = %e,
            email = %subscriber.email,
            "Failed to send the welcome email."
        );
    }

    Ok(Json(SubscribeResponseBody {
        status,
        email: subscriber.email.to_string(),
    }))
}
