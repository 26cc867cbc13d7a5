//! Handler for the link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`. Shortening a URL that is already known returns the
/// existing link with the same status.
///
/// ```json
/// {
///   "id": 1,
///   "short_url": "http://127.0.0.1:8080/aZ3kP9qL",
///   "target_url": "https://example.com"
/// }
/// ```
///
/// # Errors
///
/// - 422 Unprocessable Entity if the body is malformed or the URL is invalid
/// - 500 Internal Server Error if no unique short id could be allocated or the
///   store failed
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state.link_service.shorten(&payload.url).await?;
    let short_url = state.link_service.short_url(&link);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            id: link.id,
            short_url,
            target_url: link.target_url,
        }),
    ))
}
