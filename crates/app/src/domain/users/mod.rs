//! Users

pub mod records;
pub(crate) mod repository;

pub use records::{GuestUserRecord, NewGuestUser, UserId};
