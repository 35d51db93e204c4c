//! Fulfillment Store
//!
//! Transactional access to courses, enrollments and guest users. Single
//! writes are atomic; a sequence of reads and writes inside one transaction
//! is not serialized against other transactions, so the course roster is
//! only ever changed through [`FulfillmentTx::try_append_user`].

use async_trait::async_trait;
use enroll::categories::CourseCategory;

use crate::domain::{
    courses::{CourseRecord, CourseUuid},
    enrollments::{EnrollmentRecord, NewEnrollment},
    users::{GuestUserRecord, NewGuestUser, UserId},
};

pub mod errors;
mod postgres;

pub use errors::StoreError;
pub use postgres::PgFulfillmentStore;

#[async_trait]
pub trait FulfillmentStore: Send + Sync {
    /// Begin a transaction. Dropping it without [`FulfillmentTx::commit`]
    /// rolls it back.
    async fn begin(&self) -> Result<Box<dyn FulfillmentTx>, StoreError>;
}

#[async_trait]
pub trait FulfillmentTx: Send {
    /// Retrieve a single course.
    async fn get_course(&mut self, course: CourseUuid) -> Result<Option<CourseRecord>, StoreError>;

    /// All courses tagged with `category`, in no particular order.
    async fn list_courses_in_category(
        &mut self,
        category: &CourseCategory,
    ) -> Result<Vec<CourseRecord>, StoreError>;

    /// Fresh read of a course's enrolled users.
    async fn course_roster(&mut self, course: CourseUuid) -> Result<Vec<UserId>, StoreError>;

    /// Append `user` to the course roster in one atomic write.
    ///
    /// Returns `false` when nothing was written: the user is already present
    /// or the course has no seats left.
    async fn try_append_user(
        &mut self,
        course: CourseUuid,
        user: &UserId,
    ) -> Result<bool, StoreError>;

    /// Existing free BOGO enrollment of `user` in `course`.
    async fn find_bogo_enrollment(
        &mut self,
        user: &UserId,
        course: CourseUuid,
    ) -> Result<Option<EnrollmentRecord>, StoreError>;

    /// Insert a new enrollment.
    ///
    /// A second free BOGO enrollment of the same user in the same course is
    /// refused with [`StoreError::AlreadyExists`]; the transaction stays
    /// usable afterwards.
    async fn insert_enrollment(
        &mut self,
        enrollment: NewEnrollment,
    ) -> Result<EnrollmentRecord, StoreError>;

    /// Create or refresh a guest user keyed by email.
    async fn upsert_guest_user(
        &mut self,
        guest: NewGuestUser,
    ) -> Result<GuestUserRecord, StoreError>;

    /// Commit every write made in this transaction.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
