//! Fire-and-forget audit logging.
//!
//! A failed audit write must never fail the operation it describes; the
//! failure itself still lands in the diagnostic log so it stays observable.

use db::models::activity_log;
use sea_orm::DatabaseConnection;

pub async fn log_best_effort(
    db: &DatabaseConnection,
    user_id: i64,
    action: &str,
    detail: Option<String>,
) {
    if let Err(err) = activity_log::Model::record(db, user_id, action, detail).await {
        log::warn!("activity log write failed (user={user_id}, action={action}): {err}");
    }
}
