//! Helpers for extracting request bodies.

use axum::{Json, extract::rejection::JsonRejection};

use crate::Error;

/// Unwrap a JSON request body, turning a rejected body into [Error::InvalidInput].
///
/// Handlers take their body as `Result<Json<T>, JsonRejection>` and pass it
/// here, so that a body that is not valid JSON for `T`, e.g. a string where
/// an amount is expected, gets the same JSON error response as any other bad
/// request.
pub fn extract_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Error> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!("Rejected request body: {rejection}");
        Error::InvalidInput(rejection.body_text())
    })
}
