//! Checkout Models

use enroll::{categories::CourseCategory, offers::Offer, plans::Plan, sessions::SessionTier};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::domain::{
    courses::CourseUuid,
    enrollments::{EnrollmentRecord, EnrollmentUuid},
    users::{NewGuestUser, UserId, records::normalize_email},
};

/// Details supplied by an unauthenticated buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestIdentity {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Who is checking out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserIdentity {
    Account {
        user_id: UserId,
        name: String,
        email: String,
        phone: Option<String>,
    },
    Guest(GuestIdentity),
}

impl UserIdentity {
    /// Identifier recorded on enrollments and rosters. Guests are keyed by
    /// their normalized email.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        match self {
            Self::Account { user_id, .. } => user_id.clone(),
            Self::Guest(guest) => UserId::for_guest_email(&guest.email),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Account { name, .. } => name,
            Self::Guest(guest) => &guest.name,
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Account { email, .. } => email,
            Self::Guest(guest) => &guest.email,
        }
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        match self {
            Self::Account { phone, .. } => phone.as_deref(),
            Self::Guest(guest) => guest.phone.as_deref(),
        }
    }

    #[must_use]
    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest(_))
    }

    /// Guest user to create or refresh, if this is a guest checkout.
    #[must_use]
    pub fn guest_user(&self) -> Option<NewGuestUser> {
        match self {
            Self::Account { .. } => None,
            Self::Guest(guest) => Some(NewGuestUser {
                email: normalize_email(&guest.email),
                name: guest.name.trim().to_string(),
                phone: guest.phone.clone(),
            }),
        }
    }
}

/// Buyer's choice of free companion for one BOGO course.
///
/// A selection without `free_course` asks for the automatic pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BogoSelection {
    pub source_course: CourseUuid,
    pub free_course: Option<CourseUuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub identity: UserIdentity,

    /// Purchased courses in cart order. A course may appear more than once.
    pub courses: Vec<CourseUuid>,

    #[serde(default)]
    pub bogo_selections: Vec<BogoSelection>,
}

/// Receipt line for one created or reused enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentSummary {
    pub enrollment_uuid: EnrollmentUuid,
    pub enrollment_number: String,
    pub course_uuid: CourseUuid,
    pub course_name: String,
    pub course_category: CourseCategory,
    pub plan: Option<Plan>,
    pub session_count: Option<u32>,
    pub session_tier: Option<SessionTier>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub amount_paid: u64,
    pub original_price: u64,
    pub is_bogo_free: bool,
    pub bogo_source_course_uuid: Option<CourseUuid>,
    pub bogo_offer_name: Option<String>,

    /// The enrollment already existed from an earlier checkout.
    pub reused: bool,
}

impl EnrollmentSummary {
    #[must_use]
    pub fn new(enrollment: &EnrollmentRecord, reused: bool) -> Self {
        Self {
            enrollment_uuid: enrollment.uuid,
            enrollment_number: enrollment.enrollment_number.to_string(),
            course_uuid: enrollment.course_uuid,
            course_name: enrollment.course_name.clone(),
            course_category: enrollment.course_category.clone(),
            plan: enrollment.plan,
            session_count: enrollment.session_count,
            session_tier: enrollment.session_tier,
            start_date: enrollment.start_date,
            end_date: enrollment.end_date,
            amount_paid: enrollment.amount_paid,
            original_price: enrollment.original_price,
            is_bogo_free: enrollment.is_bogo_free(),
            bogo_source_course_uuid: enrollment
                .bogo
                .as_ref()
                .map(|bonus| bonus.source_course_uuid),
            bogo_offer_name: enrollment
                .bogo
                .as_ref()
                .map(|bonus| bonus.offer_name.clone()),
            reused,
        }
    }
}

/// Offer state of a course at an instant, as shown on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferQuote {
    pub course_uuid: CourseUuid,
    pub course_name: String,
    pub course_category: CourseCategory,
    pub base_price: u64,
    pub price: u64,
    pub seats_left: u32,
    pub offer: Option<Offer>,
}
