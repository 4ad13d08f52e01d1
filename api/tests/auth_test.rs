mod helpers;

use axum::http::StatusCode;
use db::models::user::Role;
use serde_json::json;
use tower::ServiceExt;

use helpers::{json_request, last_weekday, make_test_app, response_json, seed_campus};

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (app, _db) = make_test_app().await;

    let res = app
        .oneshot(json_request("GET", "/api/attendance/requests", None, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let (app, _db) = make_test_app().await;

    let res = app
        .oneshot(json_request(
            "GET",
            "/api/attendance/requests",
            Some("not-a-jwt"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn teachers_cannot_file_requests() {
    let (app, db) = make_test_app().await;
    let campus = seed_campus(&db).await;
    let (teacher_token, _) = api::auth::generate_jwt(campus.teacher.id, Role::Teacher);

    let res = app
        .oneshot(json_request(
            "POST",
            "/api/attendance/requests",
            Some(&teacher_token),
            Some(json!({
                "date": last_weekday().to_string(),
                "reason": "should never get this far",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = response_json(res).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn students_cannot_decide_requests() {
    let (app, db) = make_test_app().await;
    let campus = seed_campus(&db).await;
    let (student_token, _) = api::auth::generate_jwt(campus.student.id, Role::Student);

    let res = app
        .oneshot(json_request(
            "PUT",
            "/api/attendance/requests/1",
            Some(&student_token),
            Some(json!({ "decision": "approve" })),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}
