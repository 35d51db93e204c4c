//! Prelude

pub use crate::{
    categories::CourseCategory,
    enrollment_numbers::{EnrollmentNumber, short_code},
    offers::{
        BogoOffer, CourseOffers, DiscountOffer, Offer, OfferError, OfferWindow, TimeLeft,
        evaluate,
    },
    plans::{Plan, infer_plan, plan_end_date},
    sessions::SessionTier,
};
