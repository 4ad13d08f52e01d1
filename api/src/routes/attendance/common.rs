use axum::{Json, http::StatusCode};
use chrono::NaiveDate;
use db::models::user;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use services::{AttendanceError, ErrorCategory};

use crate::response::ApiResponse;

#[derive(Deserialize)]
pub struct SubmitRequestReq {
    pub date: NaiveDate,
    pub reason: String,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Deserialize)]
pub struct RedeemOtpReq {
    pub code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    Approve,
    Reject,
}

#[derive(Deserialize)]
pub struct DecideRequestReq {
    pub decision: DecisionKind,
    pub rejection_reason: Option<String>,
}

#[derive(Serialize, Default)]
pub struct RequestCreated {
    pub request_id: i64,
}

#[derive(Serialize, Default)]
pub struct RecordCreated {
    pub record_id: i64,
}

#[derive(Serialize, Default)]
pub struct RequestDecided {
    pub request_id: i64,
    pub status: String,
}

pub fn status_for(err: &AttendanceError) -> StatusCode {
    match err.category() {
        ErrorCategory::Validation | ErrorCategory::Temporal | ErrorCategory::CalendarConflict => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorCategory::Duplicate | ErrorCategory::State => StatusCode::CONFLICT,
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::Geofence => StatusCode::FORBIDDEN,
        ErrorCategory::Auth => StatusCode::UNAUTHORIZED,
        ErrorCategory::Store => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Folds a rule-engine error into the response envelope. Store failures are
/// logged here and surfaced as an opaque 500.
pub fn error_response<T>(err: AttendanceError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    if let AttendanceError::Db(ref db_err) = err {
        log::error!("attendance store failure: {db_err}");
    }
    (
        status_for(&err),
        Json(ApiResponse::error_kind(
            err.kind(),
            err.category().as_str(),
            err.to_string(),
        )),
    )
}

/// Loads the account behind the token. A token whose user no longer exists
/// gets a 401, not a 500.
pub async fn current_user<T>(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<user::Model, (StatusCode, Json<ApiResponse<T>>)>
where
    T: Serialize + Default,
{
    match user::Model::find_by_id(db, user_id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Unknown user")),
        )),
        Err(err) => {
            log::error!("failed to load user {user_id}: {err}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to load user")),
            ))
        }
    }
}
