//! Fulfillment Domain Concerns

pub mod bogo;
pub mod checkout;
pub mod courses;
pub mod enrollments;
pub mod ledger;
pub mod notifications;
pub mod roster;
pub mod store;
pub mod users;
