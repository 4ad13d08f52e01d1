use sea_orm::DbErr;
use thiserror::Error;

use crate::request::{MAX_BACKDATE_DAYS, MIN_REASON_LEN};

/// Everything the attendance ruleset can refuse, plus store failures.
///
/// Each variant carries a stable machine-readable `kind()` surfaced at the
/// API boundary, and folds into a coarser [`ErrorCategory`].
#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("a reason is required")]
    EmptyReason,
    #[error("reason must be at least {MIN_REASON_LEN} characters")]
    ReasonTooShort,
    #[error("requests can only be filed for past dates")]
    FutureDate,
    #[error("requests older than {MAX_BACKDATE_DAYS} days are not accepted")]
    TooOld,
    #[error("the requested date is a holiday")]
    HolidayDate,
    #[error("the requested date falls on a weekend")]
    WeekendDate,
    #[error("attendance is already marked for that date")]
    AlreadyMarked,
    #[error("a request for that date already exists")]
    DuplicateRequest,
    #[error("no responsible teacher could be resolved")]
    NoTeacher,
    #[error("subject not found")]
    SubjectNotFound,
    #[error("invalid or expired attendance code")]
    InvalidOrExpiredCode,
    #[error("this code belongs to a different semester")]
    SemesterMismatch,
    #[error("attendance already marked for today")]
    AlreadyMarkedToday,
    #[error("out of range: {distance_m:.1} m from session location (allowed {radius_m:.1} m)")]
    OutOfRange { distance_m: f64, radius_m: f64 },
    #[error("request not found")]
    RequestNotFound,
    #[error("request is no longer pending")]
    RequestNotPending,
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

/// Coarse error taxonomy, one bucket per failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Temporal,
    CalendarConflict,
    Duplicate,
    NotFound,
    State,
    Geofence,
    Auth,
    Store,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Temporal => "temporal",
            ErrorCategory::CalendarConflict => "calendar_conflict",
            ErrorCategory::Duplicate => "duplicate",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::State => "state",
            ErrorCategory::Geofence => "geofence",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Store => "store",
        }
    }
}

impl AttendanceError {
    pub fn kind(&self) -> &'static str {
        match self {
            AttendanceError::EmptyReason => "empty_reason",
            AttendanceError::ReasonTooShort => "reason_too_short",
            AttendanceError::FutureDate => "future_date",
            AttendanceError::TooOld => "too_old",
            AttendanceError::HolidayDate => "holiday_date",
            AttendanceError::WeekendDate => "weekend_date",
            AttendanceError::AlreadyMarked => "already_marked",
            AttendanceError::DuplicateRequest => "duplicate_request",
            AttendanceError::NoTeacher => "no_teacher",
            AttendanceError::SubjectNotFound => "subject_not_found",
            AttendanceError::InvalidOrExpiredCode => "invalid_or_expired_code",
            AttendanceError::SemesterMismatch => "semester_mismatch",
            AttendanceError::AlreadyMarkedToday => "already_marked_today",
            AttendanceError::OutOfRange { .. } => "out_of_range",
            AttendanceError::RequestNotFound => "request_not_found",
            AttendanceError::RequestNotPending => "request_not_pending",
            AttendanceError::Db(_) => "store_error",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AttendanceError::EmptyReason | AttendanceError::ReasonTooShort => {
                ErrorCategory::Validation
            }
            AttendanceError::FutureDate | AttendanceError::TooOld => ErrorCategory::Temporal,
            AttendanceError::HolidayDate | AttendanceError::WeekendDate => {
                ErrorCategory::CalendarConflict
            }
            AttendanceError::AlreadyMarked
            | AttendanceError::DuplicateRequest
            | AttendanceError::AlreadyMarkedToday => ErrorCategory::Duplicate,
            AttendanceError::NoTeacher
            | AttendanceError::SubjectNotFound
            | AttendanceError::RequestNotFound => ErrorCategory::NotFound,
            AttendanceError::RequestNotPending => ErrorCategory::State,
            AttendanceError::OutOfRange { .. } => ErrorCategory::Geofence,
            AttendanceError::InvalidOrExpiredCode | AttendanceError::SemesterMismatch => {
                ErrorCategory::Auth
            }
            AttendanceError::Db(_) => ErrorCategory::Store,
        }
    }
}

/// Unique-index violations are how a race loser finds out it lost; callers
/// map them back onto the matching duplicate variant.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_)))
}
