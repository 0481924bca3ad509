use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::store::StoreError;

mod schema;

pub type AppResult<T, E = AppError> = std::result::Result<T, E>;

/// A common error type that can be used throughout the API.
///
/// Can be returned in a `Result` from an API handler function.
///
/// Expected outcomes (bad input, an email that is already subscribed, an
/// unsubscribe token that matches nothing) map to 4xx responses with a JSON
/// body; store and mail faults map to a 500 without leaking internal detail.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("this email is already subscribed")]
    AlreadySubscribed,
    #[error("no active subscription matches this unsubscribe token")]
    UnknownToken,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::AlreadySubscribed => StatusCode::CONFLICT,
            Self::UnknownToken => StatusCode::NOT_FOUND,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        Self::UnexpectedError(anyhow::Error::from(e))
    }
}

/// Axum allows you to return `Result` from handler functions, but the error type
/// also must be some sort of response type.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::UnexpectedError(ref e) => {
                tracing::error!("{:?}", e);
                (
                    self.status_code(),
                    Json(schema::Error {
                        code: 0,
                        message: "Unexpected error".to_owned(),
                        details: None,
                    }),
                )
                    .into_response()
            }
            ref expected => (
                self.status_code(),
                Json(schema::Error {
                    code: 0,
                    message: expected.to_string(),
                    details: None,
                }),
            )
                .into_response(),
        }
    }
}
