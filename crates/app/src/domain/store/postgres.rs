//! `PostgreSQL` fulfillment store.

use async_trait::async_trait;
use enroll::categories::CourseCategory;
use sqlx::{Acquire, Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        courses::{CourseRecord, CourseUuid, repository::PgCoursesRepository},
        enrollments::{EnrollmentRecord, NewEnrollment, repository::PgEnrollmentsRepository},
        store::{FulfillmentStore, FulfillmentTx, StoreError},
        users::{GuestUserRecord, NewGuestUser, UserId, repository::PgGuestUsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgFulfillmentStore {
    db: Db,
    repositories: Repositories,
}

#[derive(Debug, Clone, Default)]
struct Repositories {
    courses: PgCoursesRepository,
    enrollments: PgEnrollmentsRepository,
    guests: PgGuestUsersRepository,
}

impl PgFulfillmentStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repositories: Repositories {
                courses: PgCoursesRepository::new(),
                enrollments: PgEnrollmentsRepository::new(),
                guests: PgGuestUsersRepository::new(),
            },
        }
    }
}

#[async_trait]
impl FulfillmentStore for PgFulfillmentStore {
    async fn begin(&self) -> Result<Box<dyn FulfillmentTx>, StoreError> {
        let tx = self.db.begin_transaction().await?;

        Ok(Box::new(PgFulfillmentTx {
            tx,
            repositories: self.repositories.clone(),
        }))
    }
}

struct PgFulfillmentTx {
    tx: Transaction<'static, Postgres>,
    repositories: Repositories,
}

#[async_trait]
impl FulfillmentTx for PgFulfillmentTx {
    async fn get_course(&mut self, course: CourseUuid) -> Result<Option<CourseRecord>, StoreError> {
        Ok(self
            .repositories
            .courses
            .get_course(&mut self.tx, course)
            .await?)
    }

    async fn list_courses_in_category(
        &mut self,
        category: &CourseCategory,
    ) -> Result<Vec<CourseRecord>, StoreError> {
        Ok(self
            .repositories
            .courses
            .list_courses_in_category(&mut self.tx, category)
            .await?)
    }

    async fn course_roster(&mut self, course: CourseUuid) -> Result<Vec<UserId>, StoreError> {
        Ok(self
            .repositories
            .courses
            .get_course_roster(&mut self.tx, course)
            .await?)
    }

    async fn try_append_user(
        &mut self,
        course: CourseUuid,
        user: &UserId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .repositories
            .courses
            .append_course_user(&mut self.tx, course, user)
            .await?)
    }

    async fn find_bogo_enrollment(
        &mut self,
        user: &UserId,
        course: CourseUuid,
    ) -> Result<Option<EnrollmentRecord>, StoreError> {
        Ok(self
            .repositories
            .enrollments
            .find_bogo_enrollment(&mut self.tx, user, course)
            .await?)
    }

    async fn insert_enrollment(
        &mut self,
        enrollment: NewEnrollment,
    ) -> Result<EnrollmentRecord, StoreError> {
        // Savepoint keeps the transaction usable after a refused insert.
        let mut savepoint = Acquire::begin(&mut self.tx).await?;

        match self
            .repositories
            .enrollments
            .create_enrollment(&mut savepoint, enrollment)
            .await
        {
            Ok(record) => {
                savepoint.commit().await?;

                Ok(record)
            }
            Err(error) => {
                savepoint.rollback().await?;

                Err(error.into())
            }
        }
    }

    async fn upsert_guest_user(
        &mut self,
        guest: NewGuestUser,
    ) -> Result<GuestUserRecord, StoreError> {
        Ok(self
            .repositories
            .guests
            .upsert_guest_user(&mut self.tx, guest)
            .await?)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;

        Ok(())
    }
}
