#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, header},
};
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use sea_orm::DatabaseConnection;
use serde_json::Value;

use api::routes::routes;
use api::state::AppState;
use db::models::{class_group, subject, user};
use db::test_utils::setup_test_db;

pub struct TestCampus {
    pub teacher: user::Model,
    pub student: user::Model,
    pub class: class_group::Model,
    pub subject: subject::Model,
}

pub async fn make_test_app() -> (Router, DatabaseConnection) {
    let db = setup_test_db().await;
    let app = Router::new()
        .nest("/api", routes())
        .with_state(AppState::new(db.clone()));
    (app, db)
}

pub async fn seed_campus(db: &DatabaseConnection) -> TestCampus {
    let teacher = user::Model::create(
        db,
        "prof_iyer",
        "iyer@campus.test",
        "password",
        user::Role::Teacher,
        None,
    )
    .await
    .expect("create teacher");

    let student = user::Model::create(
        db,
        "stud_meera",
        "meera@campus.test",
        "password",
        user::Role::Student,
        Some(5),
    )
    .await
    .expect("create student");

    let class = class_group::Model::create(db, "EC-5B", 2026)
        .await
        .expect("create class");

    let subject = subject::Model::create(db, class.id, teacher.id, "EC502", "Signal Processing", 5)
        .await
        .expect("create subject");

    TestCampus {
        teacher,
        student,
        class,
        subject,
    }
}

/// Most recent weekday strictly before today; keeps request dates valid
/// no matter when the suite runs.
pub fn last_weekday() -> NaiveDate {
    let mut date = Utc::now().date_naive() - Duration::days(1);
    while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        date -= Duration::days(1);
    }
    date
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    builder.body(body).expect("request")
}

pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}
