use crate::domain::transaction::CreateTopUpRequest;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

pub async fn create_topup(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<CreateTopUpRequest>,
) -> impl IntoResponse {
    match state.topup_service.create(user_id, req).await {
        Ok(resp) => (axum::http::StatusCode::CREATED, Json(resp)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn get_transaction_status(
    State(state): State<AppState>,
    Path(reference_no): Path<String>,
) -> impl IntoResponse {
    match state.topup_service.check_status(&reference_no).await {
        Ok(resp) => (axum::http::StatusCode::OK, Json(resp)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}
