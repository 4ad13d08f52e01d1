use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

use super::common::{DecideRequestReq, DecisionKind, RequestDecided, error_response};
use services::request::Decision;

/// PUT /api/attendance/requests/{request_id}
///
/// Teacher verdict on a pending request addressed to them.
pub async fn decide_request(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<DecideRequestReq>,
) -> (StatusCode, Json<ApiResponse<RequestDecided>>) {
    let decision = match body.decision {
        DecisionKind::Approve => Decision::Approve,
        DecisionKind::Reject => Decision::Reject {
            reason: body.rejection_reason.unwrap_or_default(),
        },
    };

    match services::request::decide_request(state.db(), claims.sub, request_id, decision, Utc::now())
        .await
    {
        Ok(request) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                RequestDecided {
                    request_id: request.id,
                    status: request.status.to_string(),
                },
                "Correction request updated",
            )),
        ),
        Err(err) => error_response(err),
    }
}
