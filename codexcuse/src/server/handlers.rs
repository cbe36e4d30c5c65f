//! HTTP route handlers for the excuse server.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::error::ApiError;
use super::metrics::Metrics;
use super::request::{AddExcuseRequest, ListParams, ListQuery};
use super::response::{CreatedResponse, HealthResponse, ListResponse, MessageResponse};
use crate::ExcuseStore;

const NOT_FOUND_MESSAGE: &str = "ID not found";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ExcuseStore>,
    pub metrics: Arc<Metrics>,
    pub environment: String,
}

/// Handle GET /api/codexcuses/{source}
///
/// Depending on the query string: one random excuse (`random`), every
/// excuse of an author (`user`), or one page (`page`, default 1).
pub async fn handle_list(
    State(state): State<AppState>,
    Path(source): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    match params.query()? {
        ListQuery::Random => {
            let excuse = state.store.get_random(&source).await?;
            if excuse.is_some() {
                state.metrics.excuses_read_total.inc();
            }
            Ok(Json(excuse).into_response())
        }
        ListQuery::ByUser(user) => {
            let excuses = state.store.get_by_user(&source, &user).await?;
            state.metrics.excuses_read_total.inc_by(excuses.len() as u64);
            Ok(Json(ListResponse::from(excuses)).into_response())
        }
        ListQuery::Page(page) => {
            let page = state.store.get_all(&source, page).await?;
            state
                .metrics
                .excuses_read_total
                .inc_by(page.excuses.len() as u64);
            Ok(Json(ListResponse::from(page)).into_response())
        }
    }
}

/// Handle GET /api/codexcuses/{source}/{id}
pub async fn handle_get(
    State(state): State<AppState>,
    Path((source, id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    match state.store.get(&source, &id).await? {
        Some(excuse) => {
            state.metrics.excuses_read_total.inc();
            Ok(Json(excuse).into_response())
        }
        None => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(MessageResponse::new(NOT_FOUND_MESSAGE)),
        )
            .into_response()),
    }
}

/// Handle POST /api/codexcuses/{source}
///
/// The body is parsed by hand so that malformed JSON and missing fields get
/// the service's own error bodies.
pub async fn handle_add(
    State(state): State<AppState>,
    Path(source): Path<String>,
    body: Bytes,
) -> Result<Json<CreatedResponse>, ApiError> {
    let excuse = AddExcuseRequest::from_body(&body)?;
    let id = state.store.add(&source, excuse).await?;
    state.metrics.excuses_added_total.inc();
    tracing::info!(%source, %id, "excuse added");
    Ok(Json(CreatedResponse::new(id)))
}

/// Handle DELETE /api/codexcuses/{source}/{id}
pub async fn handle_delete(
    State(state): State<AppState>,
    Path((source, id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete(&source, &id).await?;
    state.metrics.excuses_deleted_total.inc();
    tracing::info!(%source, %id, "excuse deleted");
    Ok(Json(MessageResponse::ok()))
}

/// Handle GET /health/ping
pub async fn handle_ping(State(state): State<AppState>) -> Json<HealthResponse> {
    tracing::debug!("health check called");
    Json(HealthResponse::healthy(&state.environment))
}

/// Handle GET /metrics
pub async fn handle_metrics(State(state): State<AppState>) -> String {
    state.metrics.encode()
}
