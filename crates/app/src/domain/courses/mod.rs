//! Courses

pub mod records;
pub(crate) mod repository;

pub use records::{CourseRecord, CourseUuid};
