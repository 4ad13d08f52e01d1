//! OTP redemption: code lookup, semester gate, calendar gate, duplicate
//! gate, geofence.

use chrono::{DateTime, Utc};
use db::models::{
    attendance_record::{self, RecordStatus},
    holiday, otp_code, subject, user,
};
use sea_orm::DatabaseConnection;

use crate::activity;
use crate::error::{AttendanceError, is_unique_violation};
use crate::geo;

/// Redeems `submitted_code` for `student`, marking today present on success.
///
/// The geofence only applies when both the student and the code carry
/// coordinates; either side missing skips the check, so codes without a
/// pinned location are usable from anywhere.
pub async fn redeem_otp(
    db: &DatabaseConnection,
    student: &user::Model,
    submitted_code: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    now: DateTime<Utc>,
) -> Result<attendance_record::Model, AttendanceError> {
    let code = otp_code::Model::find_valid(db, submitted_code.trim(), now)
        .await?
        .ok_or(AttendanceError::InvalidOrExpiredCode)?;

    // a code whose subject vanished is as good as expired
    let subject = subject::Model::find_by_id(db, code.subject_id)
        .await?
        .ok_or(AttendanceError::InvalidOrExpiredCode)?;

    match student.semester {
        Some(semester) if semester == subject.semester => {}
        _ => return Err(AttendanceError::SemesterMismatch),
    }

    let today = now.date_naive();
    if holiday::Model::exists_on(db, today).await? {
        return Err(AttendanceError::HolidayDate);
    }
    if attendance_record::Model::exists_for(db, student.id, code.subject_id, today).await? {
        return Err(AttendanceError::AlreadyMarkedToday);
    }

    if let (Some(slat), Some(slon), Some(clat), Some(clon)) =
        (latitude, longitude, code.latitude, code.longitude)
    {
        let raw = geo::haversine_m(slat, slon, clat, clon);
        if geo::effective_distance_m(raw) > code.radius_meters {
            return Err(AttendanceError::OutOfRange {
                distance_m: raw,
                radius_m: code.radius_meters,
            });
        }
    }

    let record = attendance_record::Model::create(
        db,
        student.id,
        code.subject_id,
        code.class_id,
        code.teacher_id,
        today,
        RecordStatus::Present,
        now,
    )
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            AttendanceError::AlreadyMarkedToday
        } else {
            AttendanceError::Db(err)
        }
    })?;

    activity::log_best_effort(
        db,
        student.id,
        "attendance_marked",
        Some(format!("{} via code on {}", subject.code, today)),
    )
    .await;

    Ok(record)
}
