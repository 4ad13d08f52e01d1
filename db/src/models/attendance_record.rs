use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One marked day of attendance. Immutable once created; unique per
/// (student, subject, date) via `ux_att_rec_student_subject_date`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub date: NaiveDate,
    pub status: RecordStatus,
    pub marked_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RecordStatus {
    #[sea_orm(string_value = "present")]
    Present,
    #[sea_orm(string_value = "absent")]
    Absent,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        subject_id: i64,
        class_id: i64,
        teacher_id: i64,
        date: NaiveDate,
        status: RecordStatus,
        marked_at: DateTime<Utc>,
    ) -> Result<Self, DbErr> {
        ActiveModel {
            student_id: Set(student_id),
            subject_id: Set(subject_id),
            class_id: Set(class_id),
            teacher_id: Set(teacher_id),
            date: Set(date),
            status: Set(status),
            marked_at: Set(marked_at),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn list_for_student(
        db: &DatabaseConnection,
        student_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn exists_for<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        subject_id: i64,
        date: NaiveDate,
    ) -> Result<bool, DbErr> {
        let found = Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::Date.eq(date))
            .one(db)
            .await?;
        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{class_group, subject, user};
    use crate::test_utils::setup_test_db;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn duplicate_record_for_same_day_is_rejected_by_the_store() {
        let db = setup_test_db().await;

        let teacher = user::Model::create(&db, "t1", "t1@test.com", "pw", user::Role::Teacher, None)
            .await
            .unwrap();
        let student =
            user::Model::create(&db, "s1", "s1@test.com", "pw", user::Role::Student, Some(3))
                .await
                .unwrap();
        let class = class_group::Model::create(&db, "CS-3A", 2026).await.unwrap();
        let subj = subject::Model::create(&db, class.id, teacher.id, "CS301", "Networks", 3)
            .await
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        Model::create(
            &db,
            student.id,
            subj.id,
            class.id,
            teacher.id,
            day,
            RecordStatus::Present,
            chrono::Utc::now(),
        )
        .await
        .expect("first insert");

        let dup = Model::create(
            &db,
            student.id,
            subj.id,
            class.id,
            teacher.id,
            day,
            RecordStatus::Present,
            chrono::Utc::now(),
        )
        .await;

        assert!(dup.is_err(), "unique index should reject the second row");
    }
}
