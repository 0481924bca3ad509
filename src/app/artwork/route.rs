use axum::{extract::State, Json};
use tracing::instrument;

use super::schema::PublishArtworkBody;
use crate::app::error::{AppError, AppResult};
use crate::app::AppState;
use crate::notification::{self, BroadcastOutcome};

/// Announce a newly published artwork to every active subscriber.
///
/// Responds once all send attempts have settled; individual delivery failures
/// are reflected in the tally, never in the status code.
#[instrument(name = "Publishing new artwork", skip(state, body), fields(kind = %body.kind))]
pub async fn publish_artwork(
    State(state): State<AppState>,
    Json(body): Json<PublishArtworkBody>,
) -> AppResult<Json<BroadcastOutcome>> {
    let kind = body.kind.trim();
    if kind.is_empty() {
        return Err(AppError::ValidationError("artwork kind is empty".into()));
    }

    let outcome = notification::broadcast_new_artwork(
        state.store.as_ref(),
        &state.email_client,
        &state.base_url,
        kind,
    )
    .await?;

    Ok(Json(outcome))
}
