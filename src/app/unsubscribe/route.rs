use axum::extract::{Query, State};
use axum::Json;
use tracing::instrument;

use super::schema::{UnsubscribeParams, UnsubscribeResponseBody};
use crate::app::error::{AppError, AppResult};
use crate::app::AppState;
use crate::domain::subscriber::token::UnsubscribeToken;
use crate::registry;

/// The sole path from active to inactive. Validates the token's shape, then
/// delegates matching and mutation to the registry.
#[instrument(name = "Unsubscribing", skip(state, params))]
pub async fn unsubscribe(
    State(state): State<AppState>,
    Query(params): Query<UnsubscribeParams>,
) -> AppResult<Json<UnsubscribeResponseBody>> {
    let token = UnsubscribeToken::try_from(params.token.unwrap_or_default())
        .map_err(AppError::ValidationError)?;

    match registry::deactivate(state.store.as_ref(), &token).await? {
        Some(subscriber) => Ok(Json(UnsubscribeResponseBody {
            status: "unsubscribed",
            name: subscriber.name.to_string(),
            email: subscriber.email.to_string(),
        })),
        // Never-issued and already-consumed tokens are deliberately
        // indistinguishable in the response.
        None => Err(AppError::UnknownToken),
    }
}
