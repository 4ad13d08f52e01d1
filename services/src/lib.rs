pub mod activity;
pub mod error;
pub mod geo;
pub mod otp;
pub mod request;

pub use error::{AttendanceError, ErrorCategory};

#[cfg(test)]
pub(crate) mod testing;
