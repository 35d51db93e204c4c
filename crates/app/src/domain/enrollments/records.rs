//! Enrollment Records

use enroll::{
    categories::CourseCategory, enrollment_numbers::EnrollmentNumber, plans::Plan,
    sessions::SessionTier,
};
use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{courses::CourseUuid, users::UserId},
    uuids::TypedUuid,
};

/// Enrollment UUID
pub type EnrollmentUuid = TypedUuid<EnrollmentRecord>;

/// Marks an enrollment granted free by a buy-one-get-one offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BogoBonus {
    pub source_course_uuid: CourseUuid,
    pub source_course_name: String,
    pub offer_name: String,
}

/// Enrollment Record
#[derive(Debug, Clone)]
pub struct EnrollmentRecord {
    pub uuid: EnrollmentUuid,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub course_uuid: CourseUuid,
    pub course_name: String,
    pub course_category: CourseCategory,
    pub enrollment_number: EnrollmentNumber,
    pub plan: Option<Plan>,
    pub session_count: Option<u32>,
    pub session_tier: Option<SessionTier>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub amount_paid: u64,
    pub original_price: u64,
    pub is_guest: bool,
    pub bogo: Option<BogoBonus>,
    pub created_at: Timestamp,
}

impl EnrollmentRecord {
    #[must_use]
    pub fn is_bogo_free(&self) -> bool {
        self.bogo.is_some()
    }
}

/// New Enrollment Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewEnrollment {
    pub uuid: EnrollmentUuid,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub course_uuid: CourseUuid,
    pub course_name: String,
    pub course_category: CourseCategory,
    pub enrollment_number: EnrollmentNumber,
    pub plan: Option<Plan>,
    pub session_count: Option<u32>,
    pub session_tier: Option<SessionTier>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub amount_paid: u64,
    pub original_price: u64,
    pub is_guest: bool,
    pub bogo: Option<BogoBonus>,
}

impl NewEnrollment {
    /// Record as stored at `created_at`.
    #[must_use]
    pub fn into_record(self, created_at: Timestamp) -> EnrollmentRecord {
        EnrollmentRecord {
            uuid: self.uuid,
            user_id: self.user_id,
            user_name: self.user_name,
            user_email: self.user_email,
            user_phone: self.user_phone,
            course_uuid: self.course_uuid,
            course_name: self.course_name,
            course_category: self.course_category,
            enrollment_number: self.enrollment_number,
            plan: self.plan,
            session_count: self.session_count,
            session_tier: self.session_tier,
            start_date: self.start_date,
            end_date: self.end_date,
            amount_paid: self.amount_paid,
            original_price: self.original_price,
            is_guest: self.is_guest,
            bogo: self.bogo,
            created_at,
        }
    }
}
