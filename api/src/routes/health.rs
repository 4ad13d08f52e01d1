use axum::{Json, Router, http::StatusCode, routing::get};

use crate::response::{ApiResponse, Empty};
use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

async fn health() -> (StatusCode, Json<ApiResponse<Empty>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(Empty {}, "Service is healthy")),
    )
}
