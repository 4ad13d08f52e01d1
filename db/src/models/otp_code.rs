use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, Set};
use serde::Serialize;

/// A teacher-issued attendance code, pinned to a subject/class and
/// (optionally) to a location. Never mutated on redemption; the duplicate
/// guard on attendance_records is what stops repeat marking.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "otp_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_meters: f64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
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
    pub async fn create(
        db: &DatabaseConnection,
        code: &str,
        teacher_id: i64,
        subject_id: i64,
        class_id: i64,
        latitude: Option<f64>,
        longitude: Option<f64>,
        radius_meters: f64,
        expires_at: DateTime<Utc>,
    ) -> Result<Self, DbErr> {
        ActiveModel {
            code: Set(code.to_owned()),
            teacher_id: Set(teacher_id),
            subject_id: Set(subject_id),
            class_id: Set(class_id),
            latitude: Set(latitude),
            longitude: Set(longitude),
            radius_meters: Set(radius_meters),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// The code row matching `code` that is still alive at `now`, if any.
    pub async fn find_valid(
        db: &DatabaseConnection,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Code.eq(code))
            .filter(Column::ExpiresAt.gt(now))
            .one(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{class_group, subject, user};
    use crate::test_utils::setup_test_db;
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn find_valid_respects_expiry() {
        let db = setup_test_db().await;

        let teacher = user::Model::create(&db, "t1", "t1@test.com", "pw", user::Role::Teacher, None)
            .await
            .unwrap();
        let class = class_group::Model::create(&db, "CS-1A", 2026).await.unwrap();
        let subj = subject::Model::create(&db, class.id, teacher.id, "CS101", "Intro", 1)
            .await
            .unwrap();

        let expiry = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        Model::create(&db, "482913", teacher.id, subj.id, class.id, None, None, 50.0, expiry)
            .await
            .unwrap();

        let before = expiry - Duration::seconds(1);
        assert!(Model::find_valid(&db, "482913", before).await.unwrap().is_some());

        // expiry is exclusive: at or after the deadline the code is dead
        assert!(Model::find_valid(&db, "482913", expiry).await.unwrap().is_none());
        let after = expiry + Duration::seconds(1);
        assert!(Model::find_valid(&db, "482913", after).await.unwrap().is_none());
    }
}
