use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, Set};
use serde::Serialize;

/// Campus calendar entry; gates both correction requests and OTP redemption.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "holidays")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: NaiveDate,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        date: NaiveDate,
        name: &str,
    ) -> Result<Self, DbErr> {
        ActiveModel {
            date: Set(date),
            name: Set(name.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn exists_on(db: &DatabaseConnection, date: NaiveDate) -> Result<bool, DbErr> {
        let found = Entity::find().filter(Column::Date.eq(date)).one(db).await?;
        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn exists_on_finds_only_listed_dates() {
        let db = setup_test_db().await;

        let day = NaiveDate::from_ymd_opt(2026, 1, 26).unwrap();
        Model::create(&db, day, "Republic Day").await.unwrap();

        assert!(Model::exists_on(&db, day).await.unwrap());
        assert!(
            !Model::exists_on(&db, day.succ_opt().unwrap())
                .await
                .unwrap()
        );
    }
}
