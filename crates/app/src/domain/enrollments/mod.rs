//! Enrollments

pub mod records;
pub(crate) mod repository;

pub use records::{BogoBonus, EnrollmentRecord, EnrollmentUuid, NewEnrollment};
