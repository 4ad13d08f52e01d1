//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/attendance` → correction requests and OTP redemption (role-guarded
//!   per route: students file/cancel, teachers decide)

use axum::Router;

use crate::state::AppState;

pub mod attendance;
pub mod health;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/attendance", attendance::attendance_routes())
}
