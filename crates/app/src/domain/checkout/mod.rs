//! Checkout
//!
//! Turns a paid cart into enrollments. Every cart course is priced, enrolled
//! and added to its roster, BOGO bonuses are resolved once per source course,
//! and the whole checkout commits or aborts as one transaction. Notification
//! jobs and ledger rows go out only after the commit.

pub mod context;
pub mod errors;
pub mod models;
mod service;

pub use errors::CheckoutError;
pub use models::{
    BogoSelection, CheckoutRequest, EnrollmentSummary, GuestIdentity, OfferQuote, UserIdentity,
};
pub use service::*;
