//! Enroll
//!
//! Pure course-fulfillment rules: course categories, time-bounded discount and
//! buy-one-get-one offer evaluation, enrollment plan inference from free-text
//! durations, session tiers and enrollment number generation.
//!
//! Nothing in this crate performs I/O; storage and orchestration live in
//! `enroll-app`.

pub mod categories;
pub mod enrollment_numbers;
pub mod offers;
pub mod plans;
pub mod sessions;

pub mod prelude;
