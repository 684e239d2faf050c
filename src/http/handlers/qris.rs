use crate::domain::transaction::{QrisDecodeRequest, QrisPayRequest};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

pub async fn decode(
    State(state): State<AppState>,
    Json(req): Json<QrisDecodeRequest>,
) -> impl IntoResponse {
    match state.qris_service.decode(&req.payload).await {
        Ok(resp) => (axum::http::StatusCode::OK, Json(resp)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn pay(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<QrisPayRequest>,
) -> impl IntoResponse {
    match state.qris_service.pay(user_id, req).await {
        Ok(resp) => (axum::http::StatusCode::OK, Json(resp)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}
