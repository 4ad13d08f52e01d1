use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use db::models::user::Role;

use crate::auth::claims::AuthUser;
use crate::response::{ApiResponse, Empty};

/// Pulls a validated `AuthUser` out of the request and re-inserts it as an
/// extension so handlers can take `Extension(AuthUser(claims))`.
async fn extract_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

fn forbidden(needed: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ApiResponse::<Empty>::error(format!(
            "Only {needed} may use this endpoint"
        ))),
    )
        .into_response()
}

pub async fn require_student(req: Request<Body>, next: Next) -> Response {
    match extract_authuser(req).await {
        Ok((req, AuthUser(claims))) if claims.role == Role::Student => next.run(req).await,
        Ok(_) => forbidden("students"),
        Err(rejection) => rejection.into_response(),
    }
}

pub async fn require_teacher(req: Request<Body>, next: Next) -> Response {
    match extract_authuser(req).await {
        Ok((req, AuthUser(claims))) if claims.role == Role::Teacher => next.run(req).await,
        Ok(_) => forbidden("teachers"),
        Err(rejection) => rejection.into_response(),
    }
}
