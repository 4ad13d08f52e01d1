pub mod activity_log;
pub mod attendance_record;
pub mod attendance_request;
pub mod class_group;
pub mod holiday;
pub mod otp_code;
pub mod subject;
pub mod user;

pub use activity_log::Entity as ActivityLog;
pub use attendance_record::Entity as AttendanceRecord;
pub use attendance_request::Entity as AttendanceRequest;
pub use class_group::Entity as ClassGroup;
pub use holiday::Entity as Holiday;
pub use otp_code::Entity as OtpCode;
pub use subject::Entity as Subject;
pub use user::Entity as User;
