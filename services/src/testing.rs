//! Shared seed data for service tests.

use db::models::{class_group, subject, user};
use sea_orm::DatabaseConnection;

pub struct Campus {
    pub teacher: user::Model,
    pub student: user::Model,
    pub class: class_group::Model,
    pub subject: subject::Model,
}

/// One teacher, one semester-3 student, one class with one subject.
pub async fn seed_campus(db: &DatabaseConnection) -> Campus {
    let teacher = user::Model::create(
        db,
        "prof_rao",
        "rao@campus.test",
        "password",
        user::Role::Teacher,
        None,
    )
    .await
    .expect("create teacher");

    let student = user::Model::create(
        db,
        "stud_anita",
        "anita@campus.test",
        "password",
        user::Role::Student,
        Some(3),
    )
    .await
    .expect("create student");

    let class = class_group::Model::create(db, "CS-3A", 2026)
        .await
        .expect("create class");

    let subject = subject::Model::create(db, class.id, teacher.id, "CS301", "Computer Networks", 3)
        .await
        .expect("create subject");

    Campus {
        teacher,
        student,
        class,
        subject,
    }
}
