use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

use super::common::{
    RecordCreated, RedeemOtpReq, RequestCreated, SubmitRequestReq, current_user, error_response,
};
use services::request::NewRequest;

/// POST /api/attendance/requests
pub async fn submit_request(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<SubmitRequestReq>,
) -> (StatusCode, Json<ApiResponse<RequestCreated>>) {
    let db = state.db();
    let now = Utc::now();

    let student = match current_user(db, claims.sub).await {
        Ok(user) => user,
        Err(rejection) => return rejection,
    };

    let params = NewRequest {
        date: body.date,
        reason: body.reason,
        subject_id: body.subject_id,
        teacher_id: body.teacher_id,
        latitude: body.latitude,
        longitude: body.longitude,
    };

    match services::request::submit_request(db, &student, params, now).await {
        Ok(request) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                RequestCreated {
                    request_id: request.id,
                },
                "Correction request submitted",
            )),
        ),
        Err(err) => error_response(err),
    }
}

/// POST /api/attendance/otp/redeem
pub async fn redeem_otp(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<RedeemOtpReq>,
) -> (StatusCode, Json<ApiResponse<RecordCreated>>) {
    let db = state.db();
    let now = Utc::now();

    let student = match current_user(db, claims.sub).await {
        Ok(user) => user,
        Err(rejection) => return rejection,
    };

    match services::otp::redeem_otp(db, &student, &body.code, body.latitude, body.longitude, now)
        .await
    {
        Ok(record) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                RecordCreated {
                    record_id: record.id,
                },
                "Attendance recorded",
            )),
        ),
        Err(err) => error_response(err),
    }
}
