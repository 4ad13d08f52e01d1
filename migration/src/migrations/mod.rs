pub mod m202601120001_create_users;
pub mod m202601120002_create_class_groups;
pub mod m202601120003_create_subjects;
pub mod m202601120004_create_holidays;
pub mod m202601120005_create_attendance_records;
pub mod m202601120006_create_attendance_requests;
pub mod m202601120007_create_otp_codes;
pub mod m202601120008_create_activity_logs;
