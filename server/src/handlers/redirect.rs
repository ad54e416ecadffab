use crate::{errors::AppError, AppState};
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Browser and crawler probes that must never be treated as short codes.
pub const RESERVED_PATHS: &[&str] = &[
    "favicon.ico",
    "robots.txt",
    "apple-touch-icon.png",
    "apple-touch-icon-precomposed.png",
];

/// GET /:code
///
/// 302 to the stored URL. Reserved probe paths get an empty 204 and never
/// reach the store.
pub async fn redirect(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    if code.is_empty() {
        return Err(AppError::InvalidInput("Missing short code".into()));
    }

    if RESERVED_PATHS.contains(&code.as_str()) {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let original_url = state.store.get(&code).await?.ok_or(AppError::NotFound)?;

    let location = HeaderValue::from_bytes(original_url.as_bytes()).map_err(|_| {
        AppError::Internal(format!(
            "stored URL for '{code}' is not a valid Location header"
        ))
    })?;

    tracing::info!("Redirected: {} -> {}", code, original_url);
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, store::MemoryStore};

    fn state() -> Arc<AppState> {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        Arc::new(AppState::new(Arc::new(MemoryStore::new()), config))
    }

    #[tokio::test]
    async fn empty_code_is_a_bad_request() {
        let err = redirect(State(state()), Path(String::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let err = redirect(State(state()), Path("nope00".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn known_code_redirects_with_found() {
        let state = state();
        state.store.put("AbC123", "https://example.com/a").await.unwrap();

        let response = redirect(State(state), Path("AbC123".into())).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/a"
        );
    }

    #[tokio::test]
    async fn unencodable_target_is_an_internal_error() {
        let state = state();
        state.store.put("bad001", "https://example.com/\nx").await.unwrap();

        let err = redirect(State(state), Path("bad001".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
