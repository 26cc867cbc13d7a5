//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its target URL.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// # Errors
///
/// - 404 Not Found if no link has this short id
/// - 500 Internal Server Error if the store failed
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let Some(link) = state.link_service.resolve(&short_id).await? else {
        debug!(%short_id, "Short id not found");
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "short_id": short_id }),
        ));
    };

    Ok(Redirect::temporary(&link.target_url))
}
