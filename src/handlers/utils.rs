use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::ApiError;

/// Parse the `:id` path segment of a driver route
pub fn parse_driver_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::bad_request(format!("Invalid driver id '{}'", raw)))
}

/// Unwrap a JSON body, turning extractor rejections into the standard error envelope
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))
}
