use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::AuthUser;
use crate::response::{ApiResponse, Empty};
use crate::state::AppState;

use super::common::error_response;

/// DELETE /api/attendance/requests/{request_id}
///
/// Only the owning student may cancel, and only while pending.
pub async fn cancel_request(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    match services::request::cancel_request(state.db(), claims.sub, request_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty {}, "Correction request cancelled")),
        ),
        Err(err) => error_response(err),
    }
}
