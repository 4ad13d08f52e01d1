use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

use db::models::{attendance_record, attendance_request};

/// GET /api/attendance/requests — the caller's own requests, newest first.
pub async fn list_requests(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<Vec<attendance_request::Model>>>) {
    match attendance_request::Model::list_for_student(state.db(), claims.sub).await {
        Ok(requests) => (
            StatusCode::OK,
            Json(ApiResponse::success(requests, "Correction requests fetched")),
        ),
        Err(err) => {
            log::error!("failed to list requests for user {}: {err}", claims.sub);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to fetch correction requests")),
            )
        }
    }
}

/// GET /api/attendance/records — the caller's own attendance, newest first.
pub async fn list_records(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<Vec<attendance_record::Model>>>) {
    match attendance_record::Model::list_for_student(state.db(), claims.sub).await {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::success(records, "Attendance records fetched")),
        ),
        Err(err) => {
            log::error!("failed to list records for user {}: {err}", claims.sub);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to fetch attendance records")),
            )
        }
    }
}
