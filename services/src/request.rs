//! Correction-request rules: submission, cancellation, teacher decision.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use db::models::{
    activity_log, attendance_record,
    attendance_record::RecordStatus,
    attendance_request::{self, ActiveModel, Entity, RequestStatus},
    holiday, subject, user,
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, TransactionError,
    TransactionTrait,
};

use crate::activity;
use crate::error::{AttendanceError, is_unique_violation};

pub const MIN_REASON_LEN: usize = 10;
pub const MAX_BACKDATE_DAYS: i64 = 30;

/// Student-supplied payload for a new correction request.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub date: NaiveDate,
    pub reason: String,
    /// Explicit subject; otherwise resolved from the student's semester.
    pub subject_id: Option<i64>,
    /// Explicit addressee; otherwise the resolved subject's teacher.
    pub teacher_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Teacher verdict on a pending request.
#[derive(Debug, Clone)]
pub enum Decision {
    Approve,
    Reject { reason: String },
}

/// Validates and files a correction request for `student`.
///
/// `now` is injected by the caller; "today" is its calendar day. Rules are
/// checked in the order the portal reports them: reason, date window,
/// calendar conflicts, then duplicates.
pub async fn submit_request(
    db: &DatabaseConnection,
    student: &user::Model,
    params: NewRequest,
    now: DateTime<Utc>,
) -> Result<attendance_request::Model, AttendanceError> {
    let today = now.date_naive();

    let reason = params.reason.trim();
    if reason.is_empty() {
        return Err(AttendanceError::EmptyReason);
    }
    if reason.chars().count() < MIN_REASON_LEN {
        return Err(AttendanceError::ReasonTooShort);
    }

    if params.date >= today {
        return Err(AttendanceError::FutureDate);
    }
    if params.date < today - Duration::days(MAX_BACKDATE_DAYS) {
        return Err(AttendanceError::TooOld);
    }
    if holiday::Model::exists_on(db, params.date).await? {
        return Err(AttendanceError::HolidayDate);
    }
    if matches!(params.date.weekday(), Weekday::Sat | Weekday::Sun) {
        return Err(AttendanceError::WeekendDate);
    }

    let subject = resolve_subject(db, student, &params).await?;
    let teacher_id = params.teacher_id.unwrap_or(subject.teacher_id);

    if attendance_record::Model::exists_for(db, student.id, subject.id, params.date).await? {
        return Err(AttendanceError::AlreadyMarked);
    }
    if attendance_request::Model::active_exists_for(db, student.id, subject.id, params.date).await? {
        return Err(AttendanceError::DuplicateRequest);
    }

    let request = ActiveModel {
        student_id: Set(student.id),
        teacher_id: Set(teacher_id),
        subject_id: Set(subject.id),
        class_id: Set(subject.class_id),
        date: Set(params.date),
        reason: Set(reason.to_owned()),
        latitude: Set(params.latitude),
        longitude: Set(params.longitude),
        status: Set(RequestStatus::Pending),
        rejection_reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| {
        // two submissions racing past the pre-check; the index settles it
        if is_unique_violation(&err) {
            AttendanceError::DuplicateRequest
        } else {
            AttendanceError::Db(err)
        }
    })?;

    activity::log_best_effort(
        db,
        student.id,
        "attendance_request_submitted",
        Some(format!("{} on {}", subject.code, params.date)),
    )
    .await;

    Ok(request)
}

/// Picks the subject a request is filed against, and with it the
/// responsible teacher.
async fn resolve_subject(
    db: &DatabaseConnection,
    student: &user::Model,
    params: &NewRequest,
) -> Result<subject::Model, AttendanceError> {
    if let Some(subject_id) = params.subject_id {
        return subject::Model::find_by_id(db, subject_id)
            .await?
            .ok_or(AttendanceError::SubjectNotFound);
    }
    let semester = student.semester.ok_or(AttendanceError::NoTeacher)?;
    subject::Model::first_for_semester(db, semester, params.teacher_id)
        .await?
        .ok_or(AttendanceError::NoTeacher)
}

/// Deletes a pending request owned by `student_id`.
///
/// The delete and its audit entry run in one transaction: if the audit
/// write fails the row comes back, so there is never a silent deletion.
pub async fn cancel_request(
    db: &DatabaseConnection,
    student_id: i64,
    request_id: i64,
) -> Result<(), AttendanceError> {
    let request = attendance_request::Model::find_for_student(db, request_id, student_id)
        .await?
        .ok_or(AttendanceError::RequestNotFound)?;

    if request.status != RequestStatus::Pending {
        return Err(AttendanceError::RequestNotPending);
    }

    let detail = format!("request {} for {}", request.id, request.date);
    db.transaction::<_, (), DbErr>(|txn| {
        Box::pin(async move {
            Entity::delete_by_id(request_id).exec(txn).await?;
            activity_log::Model::record(
                txn,
                student_id,
                "attendance_request_cancelled",
                Some(detail),
            )
            .await?;
            Ok(())
        })
    })
    .await
    .map_err(flatten_txn_err)?;

    Ok(())
}

/// Teacher verdict on a pending request addressed to `teacher_id`.
///
/// Approval also writes the attendance record (present) unless one already
/// exists for that day; status change and record insert are atomic.
pub async fn decide_request(
    db: &DatabaseConnection,
    teacher_id: i64,
    request_id: i64,
    decision: Decision,
    now: DateTime<Utc>,
) -> Result<attendance_request::Model, AttendanceError> {
    let request = attendance_request::Model::find_for_teacher(db, request_id, teacher_id)
        .await?
        .ok_or(AttendanceError::RequestNotFound)?;

    if request.status != RequestStatus::Pending {
        return Err(AttendanceError::RequestNotPending);
    }

    let (status, rejection_reason) = match decision {
        Decision::Approve => (RequestStatus::Approved, None),
        Decision::Reject { reason } => {
            let reason = reason.trim().to_owned();
            if reason.is_empty() {
                return Err(AttendanceError::EmptyReason);
            }
            (RequestStatus::Rejected, Some(reason))
        }
    };

    let updated = db
        .transaction::<_, attendance_request::Model, DbErr>(move |txn| {
            Box::pin(async move {
                if status == RequestStatus::Approved
                    && !attendance_record::Model::exists_for(
                        txn,
                        request.student_id,
                        request.subject_id,
                        request.date,
                    )
                    .await?
                {
                    attendance_record::Model::create(
                        txn,
                        request.student_id,
                        request.subject_id,
                        request.class_id,
                        request.teacher_id,
                        request.date,
                        RecordStatus::Present,
                        now,
                    )
                    .await?;
                }

                let mut active: ActiveModel = request.into();
                active.status = Set(status);
                active.rejection_reason = Set(rejection_reason);
                active.updated_at = Set(now);
                active.update(txn).await
            })
        })
        .await
        .map_err(flatten_txn_err)?;

    activity::log_best_effort(
        db,
        teacher_id,
        match updated.status {
            RequestStatus::Approved => "attendance_request_approved",
            _ => "attendance_request_rejected",
        },
        Some(format!("request {}", updated.id)),
    )
    .await;

    Ok(updated)
}

fn flatten_txn_err(err: TransactionError<DbErr>) -> AttendanceError {
    match err {
        TransactionError::Connection(e) => AttendanceError::Db(e),
        TransactionError::Transaction(e) => AttendanceError::Db(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seed_campus;
    use chrono::TimeZone;
    use db::test_utils::setup_test_db;

    // Friday noon; requests target earlier weekdays
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 13, 12, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn params(date: NaiveDate) -> NewRequest {
        NewRequest {
            date,
            reason: "I was attending a medical appointment".into(),
            subject_id: None,
            teacher_id: None,
            latitude: None,
            longitude: None,
        }
    }

    #[tokio::test]
    async fn today_and_future_dates_are_rejected() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;

        for date in [day(2026, 2, 13), day(2026, 2, 14), day(2026, 3, 1)] {
            let err = submit_request(&db, &campus.student, params(date), now())
                .await
                .unwrap_err();
            assert!(matches!(err, AttendanceError::FutureDate), "{date}: {err}");
        }
    }

    #[tokio::test]
    async fn thirty_day_window_boundary() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;

        // 31 days back is out
        let err = submit_request(&db, &campus.student, params(day(2026, 1, 13)), now())
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::TooOld));

        // exactly 30 days back is still in
        let ok = submit_request(&db, &campus.student, params(day(2026, 1, 14)), now()).await;
        assert!(ok.is_ok(), "{:?}", ok.err().map(|e| e.to_string()));
    }

    #[tokio::test]
    async fn holidays_are_rejected() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;
        holiday::Model::create(&db, day(2026, 2, 10), "Founders Day")
            .await
            .unwrap();

        let err = submit_request(&db, &campus.student, params(day(2026, 2, 10)), now())
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::HolidayDate));
    }

    #[tokio::test]
    async fn weekends_are_rejected() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;

        for date in [day(2026, 2, 7), day(2026, 2, 8)] {
            let err = submit_request(&db, &campus.student, params(date), now())
                .await
                .unwrap_err();
            assert!(matches!(err, AttendanceError::WeekendDate), "{date}");
        }
    }

    #[tokio::test]
    async fn reason_length_boundary() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;

        let mut p = params(day(2026, 2, 11));
        p.reason = "".into();
        assert!(matches!(
            submit_request(&db, &campus.student, p, now()).await.unwrap_err(),
            AttendanceError::EmptyReason
        ));

        let mut p = params(day(2026, 2, 11));
        p.reason = "123456789".into(); // 9 chars
        assert!(matches!(
            submit_request(&db, &campus.student, p, now()).await.unwrap_err(),
            AttendanceError::ReasonTooShort
        ));

        let mut p = params(day(2026, 2, 11));
        p.reason = "1234567890".into(); // 10 chars, boundary accepted
        assert!(submit_request(&db, &campus.student, p, now()).await.is_ok());
    }

    #[tokio::test]
    async fn second_submission_for_same_day_is_a_duplicate() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;

        submit_request(&db, &campus.student, params(day(2026, 2, 11)), now())
            .await
            .unwrap();
        let err = submit_request(&db, &campus.student, params(day(2026, 2, 11)), now())
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::DuplicateRequest));
    }

    #[tokio::test]
    async fn marked_days_cannot_be_requested() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;

        attendance_record::Model::create(
            &db,
            campus.student.id,
            campus.subject.id,
            campus.class.id,
            campus.teacher.id,
            day(2026, 2, 11),
            RecordStatus::Present,
            now(),
        )
        .await
        .unwrap();

        let err = submit_request(&db, &campus.student, params(day(2026, 2, 11)), now())
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::AlreadyMarked));
    }

    #[tokio::test]
    async fn teacher_is_resolved_from_the_student_semester() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;

        let request = submit_request(&db, &campus.student, params(day(2026, 2, 11)), now())
            .await
            .unwrap();
        assert_eq!(request.teacher_id, campus.teacher.id);
        assert_eq!(request.subject_id, campus.subject.id);
        assert_eq!(request.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn student_without_semester_has_no_teacher() {
        let db = setup_test_db().await;
        let _campus = seed_campus(&db).await;
        let drifter = user::Model::create(
            &db,
            "stud_drift",
            "drift@campus.test",
            "password",
            user::Role::Student,
            None,
        )
        .await
        .unwrap();

        let err = submit_request(&db, &drifter, params(day(2026, 2, 11)), now())
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::NoTeacher));
    }

    #[tokio::test]
    async fn cancel_removes_a_pending_request() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;

        let request = submit_request(&db, &campus.student, params(day(2026, 2, 11)), now())
            .await
            .unwrap();
        cancel_request(&db, campus.student.id, request.id)
            .await
            .unwrap();

        let gone = attendance_request::Model::find_for_student(&db, request.id, campus.student.id)
            .await
            .unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn cancel_refuses_foreign_and_decided_requests() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;

        let request = submit_request(&db, &campus.student, params(day(2026, 2, 11)), now())
            .await
            .unwrap();

        // not the owner
        let err = cancel_request(&db, campus.teacher.id, request.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::RequestNotFound));

        decide_request(&db, campus.teacher.id, request.id, Decision::Approve, now())
            .await
            .unwrap();

        // approved is terminal, and the row must survive the attempt
        let err = cancel_request(&db, campus.student.id, request.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::RequestNotPending));

        let still_there =
            attendance_request::Model::find_for_student(&db, request.id, campus.student.id)
                .await
                .unwrap()
                .expect("row unchanged");
        assert_eq!(still_there.status, RequestStatus::Approved);
    }

    #[tokio::test]
    async fn approval_marks_the_day_present() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;

        let request = submit_request(&db, &campus.student, params(day(2026, 2, 11)), now())
            .await
            .unwrap();
        let updated = decide_request(&db, campus.teacher.id, request.id, Decision::Approve, now())
            .await
            .unwrap();

        assert_eq!(updated.status, RequestStatus::Approved);
        assert!(
            attendance_record::Model::exists_for(
                &db,
                campus.student.id,
                campus.subject.id,
                day(2026, 2, 11)
            )
            .await
            .unwrap()
        );
    }

    #[tokio::test]
    async fn rejection_needs_a_reason_and_is_terminal() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;

        let request = submit_request(&db, &campus.student, params(day(2026, 2, 11)), now())
            .await
            .unwrap();

        let err = decide_request(
            &db,
            campus.teacher.id,
            request.id,
            Decision::Reject { reason: "   ".into() },
            now(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AttendanceError::EmptyReason));

        let updated = decide_request(
            &db,
            campus.teacher.id,
            request.id,
            Decision::Reject { reason: "No supporting document".into() },
            now(),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, RequestStatus::Rejected);
        assert_eq!(
            updated.rejection_reason.as_deref(),
            Some("No supporting document")
        );

        let err = decide_request(&db, campus.teacher.id, request.id, Decision::Approve, now())
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::RequestNotPending));
    }

    #[tokio::test]
    async fn rejected_requests_do_not_block_resubmission() {
        let db = setup_test_db().await;
        let campus = seed_campus(&db).await;

        let request = submit_request(&db, &campus.student, params(day(2026, 2, 11)), now())
            .await
            .unwrap();
        decide_request(
            &db,
            campus.teacher.id,
            request.id,
            Decision::Reject { reason: "No supporting document".into() },
            now(),
        )
        .await
        .unwrap();

        let retry = submit_request(&db, &campus.student, params(day(2026, 2, 11)), now()).await;
        assert!(retry.is_ok(), "{:?}", retry.err().map(|e| e.to_string()));
    }
}
