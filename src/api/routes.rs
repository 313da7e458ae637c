//! API route definitions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::error::ApiError;
use super::state::AppState;
use crate::queue::{WorkOrder, WorkOrderResponse};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/queue", get(list_ids).delete(dequeue))
        .route("/queue/meantime", get(mean_wait_time))
        .route("/queue/{id}", get(position).delete(remove))
        .route("/queue/{id}/{date}", post(enqueue))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "queued": state.queue.len().await,
    }))
}

/// Ids from highest to lowest rank.
async fn list_ids(State(state): State<AppState>) -> Json<Vec<i64>> {
    Json(state.queue.list_ids().await)
}

/// Zero-based position of an order, `-1` when it is not queued.
async fn position(State(state): State<AppState>, Path(id): Path<i64>) -> Json<i64> {
    let position = state
        .queue
        .position_of(id)
        .await
        .map_or(-1, |p| p as i64);
    Json(position)
}

/// Mean wait in seconds, `0` for an empty queue.
async fn mean_wait_time(State(state): State<AppState>) -> Json<f64> {
    Json(state.queue.average_wait_time().await)
}

async fn enqueue(
    State(state): State<AppState>,
    Path((id, date)): Path<(i64, String)>,
) -> Result<(StatusCode, Json<WorkOrderResponse>), ApiError> {
    let order = WorkOrder::new(id, &date);
    let response = WorkOrderResponse::from(&order);
    let tier = order.tier();

    if let Err(e) = state.queue.insert(order).await {
        warn!(id, error = %e, "order rejected");
        return Err(e.into());
    }

    info!(id, %tier, date = %response.date, "order created");
    Ok((StatusCode::CREATED, Json(response)))
}

async fn dequeue(State(state): State<AppState>) -> Result<Json<WorkOrderResponse>, ApiError> {
    let order = state.queue.remove_top().await.ok_or(ApiError::EmptyQueue)?;
    info!(id = order.id(), "order dequeued");
    Ok(Json(WorkOrderResponse::from(&order)))
}

/// Remove a specific order. The id is echoed back whatever the outcome.
async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> (StatusCode, Json<i64>) {
    match state.queue.remove(id).await {
        Ok(_) => {
            info!(id, "order removed");
            (StatusCode::OK, Json(id))
        }
        Err(e) => {
            warn!(id, error = %e, "remove rejected");
            (ApiError::from(e).status(), Json(id))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
