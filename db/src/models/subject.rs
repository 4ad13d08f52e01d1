use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryOrder, Set};
use serde::Serialize;

/// A taught subject, tying a teacher and a class group to a semester.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub code: String,
    pub name: String,
    pub semester: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class_group::Entity",
        from = "Column::ClassId",
        to = "super::class_group::Column::Id"
    )]
    ClassGroup,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
}

impl Related<super::class_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        class_id: i64,
        teacher_id: i64,
        code: &str,
        name: &str,
        semester: i32,
    ) -> Result<Self, DbErr> {
        ActiveModel {
            class_id: Set(class_id),
            teacher_id: Set(teacher_id),
            code: Set(code.to_owned()),
            name: Set(name.to_owned()),
            semester: Set(semester),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// First subject assigned to a semester, optionally pinned to one teacher.
    /// Used to resolve the responsible teacher for a correction request.
    pub async fn first_for_semester(
        db: &DatabaseConnection,
        semester: i32,
        teacher_id: Option<i64>,
    ) -> Result<Option<Self>, DbErr> {
        let mut query = Entity::find()
            .filter(Column::Semester.eq(semester))
            .order_by_asc(Column::Id);
        if let Some(teacher_id) = teacher_id {
            query = query.filter(Column::TeacherId.eq(teacher_id));
        }
        query.one(db).await
    }
}
