//! Course Records

use enroll::{
    categories::CourseCategory,
    offers::CourseOffers,
    plans::{Plan, infer_plan},
};
use jiff::{Timestamp, civil::Date};

use crate::{domain::users::UserId, uuids::TypedUuid};

/// Course UUID
pub type CourseUuid = TypedUuid<CourseRecord>;

/// Course Record
///
/// `capacity == 0` means the course is closed to new enrollments.
#[derive(Debug, Clone)]
pub struct CourseRecord {
    pub uuid: CourseUuid,
    pub name: String,
    pub category: CourseCategory,
    pub short_code: Option<String>,
    pub offers: CourseOffers,
    pub capacity: u32,
    pub enrolled_users: Vec<UserId>,
    pub duration: Option<String>,
    pub session_count: Option<u32>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CourseRecord {
    /// Seats left on the course; a closed course has none.
    #[must_use]
    pub fn seats_left(&self) -> u32 {
        let taken = u32::try_from(self.enrolled_users.len()).unwrap_or(u32::MAX);

        self.capacity.saturating_sub(taken)
    }

    /// No seats left, either because the course is full or closed.
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.seats_left() == 0
    }

    /// Plan of an enrollment in this course; only multi-plan categories
    /// have one.
    #[must_use]
    pub fn enrollment_plan(&self) -> Option<Plan> {
        if !self.category.is_multi_plan() {
            return None;
        }

        infer_plan(self.duration.as_deref())
    }

    #[must_use]
    pub fn has_user(&self, user: &UserId) -> bool {
        self.enrolled_users.contains(user)
    }
}
