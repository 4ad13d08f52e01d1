use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202601120001_create_users::Migration),
            Box::new(migrations::m202601120002_create_class_groups::Migration),
            Box::new(migrations::m202601120003_create_subjects::Migration),
            Box::new(migrations::m202601120004_create_holidays::Migration),
            Box::new(migrations::m202601120005_create_attendance_records::Migration),
            Box::new(migrations::m202601120006_create_attendance_requests::Migration),
            Box::new(migrations::m202601120007_create_otp_codes::Migration),
            Box::new(migrations::m202601120008_create_activity_logs::Migration),
        ]
    }
}
