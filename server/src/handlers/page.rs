use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    base_url: String,
    list_limit: usize,
}

/// GET /
/// The shorten form. All the work happens in the browser against
/// `/shorten` and `/list`.
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    IndexTemplate {
        base_url: state.config.base_url.clone(),
        list_limit: state.config.list_limit,
    }
    .into_response()
}
