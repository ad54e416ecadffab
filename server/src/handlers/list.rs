use crate::{
    config::MAX_LIST_LIMIT,
    errors::AppError,
    models::{ListParams, RecentLinks},
    AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;

/// GET /list
///
/// `{ code: url, ... }` for the most recent links, newest first. Meant for
/// people poking at the service, not as a paginated API.
pub async fn list(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<RecentLinks>, AppError> {
    let Query(params) =
        params.map_err(|_| AppError::InvalidInput("limit must be a positive number".into()))?;

    let limit = params
        .limit
        .unwrap_or(state.config.list_limit)
        .clamp(1, MAX_LIST_LIMIT);

    let links = state.store.list(limit).await?;
    Ok(Json(RecentLinks(links)))
}
