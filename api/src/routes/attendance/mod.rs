use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};

use crate::auth::guards::{require_student, require_teacher};
use crate::state::AppState;

mod common;
mod delete;
mod get;
mod post;
mod put;

pub use self::delete::cancel_request;
pub use self::get::{list_records, list_requests};
pub use self::post::{redeem_otp, submit_request};
pub use self::put::decide_request;

pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/requests",
            post(submit_request).route_layer(from_fn(require_student)),
        )
        .route(
            "/requests",
            get(list_requests).route_layer(from_fn(require_student)),
        )
        .route(
            "/requests/{request_id}",
            delete(cancel_request).route_layer(from_fn(require_student)),
        )
        .route(
            "/requests/{request_id}",
            put(decide_request).route_layer(from_fn(require_teacher)),
        )
        .route(
            "/otp/redeem",
            post(redeem_otp).route_layer(from_fn(require_student)),
        )
        .route(
            "/records",
            get(list_records).route_layer(from_fn(require_student)),
        )
}
