//! Checkout errors.

use enroll::offers::OfferError;
use thiserror::Error;

use crate::domain::{courses::CourseUuid, store::StoreError};

/// Errors that abort a checkout. Nothing is committed when one is returned.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("course {0} does not exist")]
    CourseNotFound(CourseUuid),

    #[error("course pricing is invalid")]
    Pricing(#[from] OfferError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
