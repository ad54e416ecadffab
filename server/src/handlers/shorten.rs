use crate::{
    errors::AppError,
    models::{LinkMapping, ShortenRequest, ShortenResponse},
    store::StoreError,
    AppState,
};
use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

/// POST /shorten
///
/// The body is decoded as JSON whatever the `Content-Type` says. A body
/// that does not decode (bad syntax, missing `url`) is a 400 and nothing
/// is stored; any `url` string, empty included, is stored verbatim.
pub async fn shorten(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ShortenResponse>, AppError> {
    let request: ShortenRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejected /shorten body: {e}");
        AppError::InvalidInput("Invalid JSON".into())
    })?;

    let link = store_with_fresh_code(&state, &request.url).await?;
    tracing::info!("Stored: {} -> {}", link.short_code, link.original_url);

    Ok(Json(ShortenResponse {
        short_url: state.config.short_url(&link.short_code),
    }))
}

/// Fallback for every non-POST method on /shorten.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Generate a code and insert it. A duplicate code is only retried while
/// `code_max_attempts` allows; backend errors are never retried.
async fn store_with_fresh_code(state: &AppState, url: &str) -> Result<LinkMapping, AppError> {
    let max_attempts = state.config.code_max_attempts;
    let mut attempt = 1;

    loop {
        let code = state.codes.generate();
        match state.store.put(&code, url).await {
            Err(StoreError::Duplicate(code)) if attempt < max_attempts => {
                tracing::warn!(
                    "Short code '{}' collided (attempt {}/{}), regenerating",
                    code,
                    attempt,
                    max_attempts
                );
                attempt += 1;
            }
            Err(StoreError::Duplicate(code)) => {
                tracing::warn!("Short code '{}' collided, giving up", code);
                return Err(StoreError::Duplicate(code).into());
            }
            result => return Ok(result?),
        }
    }
}
