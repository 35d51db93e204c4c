//! Test Helpers

use enroll::{
    categories::CourseCategory,
    enrollment_numbers::EnrollmentNumber,
    offers::{BogoOffer, CourseOffers, DiscountOffer, OfferWindow},
    plans::Plan,
    sessions::SessionTier,
};
use jiff::{Timestamp, civil::Date};

use crate::domain::{
    courses::{CourseRecord, CourseUuid},
    enrollments::{BogoBonus, EnrollmentRecord, EnrollmentUuid},
    users::UserId,
};

/// Course with sensible defaults: a certificate priced 1000 with 100 seats
/// and no offers.
pub(crate) struct CourseBuilder {
    course: CourseRecord,
}

impl CourseBuilder {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            course: CourseRecord {
                uuid: CourseUuid::new(),
                name: name.to_string(),
                category: CourseCategory::Certificate,
                short_code: None,
                offers: CourseOffers::priced(1_000),
                capacity: 100,
                enrolled_users: Vec::new(),
                duration: None,
                session_count: None,
                start_date: None,
                end_date: None,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
        }
    }

    pub(crate) fn category(mut self, category: CourseCategory) -> Self {
        self.course.category = category;
        self
    }

    pub(crate) fn short_code(mut self, code: &str) -> Self {
        self.course.short_code = Some(code.to_string());
        self
    }

    pub(crate) fn price(mut self, base_price: u64) -> Self {
        self.course.offers.base_price = base_price;
        self
    }

    pub(crate) fn capacity(mut self, capacity: u32) -> Self {
        self.course.capacity = capacity;
        self
    }

    pub(crate) fn enrolled(mut self, users: impl IntoIterator<Item = UserId>) -> Self {
        self.course.enrolled_users.extend(users);
        self
    }

    /// Fill `count` seats with placeholder users.
    pub(crate) fn enrolled_count(self, count: usize) -> Self {
        self.enrolled((0..count).map(|seat| UserId::new(format!("seat-{seat}"))))
    }

    pub(crate) fn duration(mut self, duration: &str) -> Self {
        self.course.duration = Some(duration.to_string());
        self
    }

    pub(crate) fn sessions(mut self, count: u32) -> Self {
        self.course.session_count = Some(count);
        self
    }

    pub(crate) fn start(mut self, date: Date) -> Self {
        self.course.start_date = Some(date);
        self
    }

    pub(crate) fn end(mut self, date: Date) -> Self {
        self.course.end_date = Some(date);
        self
    }

    /// Open-ended BOGO offer.
    pub(crate) fn bogo(self) -> Self {
        self.bogo_offer(OfferWindow::unbounded())
    }

    pub(crate) fn bogo_window(self, start_at: Timestamp, end_at: Timestamp) -> Self {
        self.bogo_offer(OfferWindow::between(start_at, end_at))
    }

    fn bogo_offer(mut self, window: OfferWindow) -> Self {
        self.course.offers.bogo = Some(BogoOffer {
            enabled: true,
            window,
            label: None,
        });
        self
    }

    pub(crate) fn discount(mut self, discount: DiscountOffer) -> Self {
        self.course.offers.discount = Some(discount);
        self
    }

    pub(crate) fn build(self) -> CourseRecord {
        self.course
    }
}

/// Stored enrollment of `user-1`, paid at 1000.
pub(crate) struct EnrollmentBuilder {
    enrollment: EnrollmentRecord,
}

impl EnrollmentBuilder {
    pub(crate) fn new(course_name: &str, category: CourseCategory) -> Self {
        let (enrollment_number, session_tier) = if category.is_session_priced() {
            (EnrollmentNumber::NotApplicable, Some(SessionTier::Single))
        } else {
            (EnrollmentNumber::Code("TST-0124-0042".to_string()), None)
        };

        Self {
            enrollment: EnrollmentRecord {
                uuid: EnrollmentUuid::new(),
                user_id: UserId::new("user-1"),
                user_name: "Meera Nair".to_string(),
                user_email: "meera@example.com".to_string(),
                user_phone: None,
                course_uuid: CourseUuid::new(),
                course_name: course_name.to_string(),
                course_category: category,
                enrollment_number,
                plan: None,
                session_count: None,
                session_tier,
                start_date: None,
                end_date: None,
                amount_paid: 1_000,
                original_price: 1_000,
                is_guest: false,
                bogo: None,
                created_at: Timestamp::UNIX_EPOCH,
            },
        }
    }

    pub(crate) fn plan(mut self, plan: Plan) -> Self {
        self.enrollment.plan = Some(plan);
        self
    }

    pub(crate) fn dates(mut self, start_date: Date, end_date: Date) -> Self {
        self.enrollment.start_date = Some(start_date);
        self.enrollment.end_date = Some(end_date);
        self
    }

    pub(crate) fn paid(mut self, amount_paid: u64, original_price: u64) -> Self {
        self.enrollment.amount_paid = amount_paid;
        self.enrollment.original_price = original_price;
        self
    }

    /// Free bonus granted by `bonus`.
    pub(crate) fn bogo(mut self, bonus: BogoBonus) -> Self {
        self.enrollment.amount_paid = 0;
        self.enrollment.bogo = Some(bonus);
        self
    }

    pub(crate) fn build(self) -> EnrollmentRecord {
        self.enrollment
    }
}
