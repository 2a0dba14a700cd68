//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract a message id from the path.
///
/// Anything that isn't an integer can't name a message, so it is reported
/// as not found rather than as a bad request.
pub struct MessageId(pub i64);

impl<S> FromRequestParts<S> for MessageId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        let id = id.parse::<i64>().map_err(|_| ApiError::NotFound)?;
        Ok(Self(id))
    }
}

/// A JSON request body that validates into a domain value.
pub trait JsonPayload: DeserializeOwned {
    type Output;

    /// Error reported when required fields are absent, empty, or the
    /// payload can't be parsed at all.
    const REQUIRED: &'static str;

    fn validate(self) -> Result<Self::Output, ValidationError>;
}

/// Parse and validate a JSON body in one step.
///
/// Malformed JSON, wrong field types and missing fields all collapse into the
/// payload's `REQUIRED` message; other validation failures (e.g. length
/// limits) report their own message.
pub struct Payload<T: JsonPayload>(pub T::Output);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: JsonPayload + Send,
    T::Output: Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "rejected JSON payload");
            ApiError::validation(T::REQUIRED)
        })?;

        match payload.validate() {
            Ok(output) => Ok(Self(output)),
            Err(e) if e.is_missing() => {
                tracing::debug!(error = %e, "payload missing required field");
                Err(ApiError::validation(T::REQUIRED))
            }
            Err(e) => Err(ApiError::validation(e.to_string())),
        }
    }
}
