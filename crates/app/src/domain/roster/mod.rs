//! Course Roster
//!
//! Adds a buyer to a course's enrolled users. The roster is shared by every
//! concurrent checkout of the course, so each append is a fresh read, one
//! atomic conditional write and a verifying re-read, retried once when the
//! write did not land. A lost append is logged and tolerated: the enrollment
//! record stays authoritative even if the roster briefly lags.

use tracing::{debug, warn};

use crate::domain::{
    courses::CourseUuid,
    store::{FulfillmentTx, StoreError},
    users::UserId,
};

/// Result of adding a user to a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterOutcome {
    /// The user was already enrolled; nothing was written.
    AlreadyPresent,

    /// The first append landed.
    Appended,

    /// The first append was lost and the retry landed.
    Retried,

    /// Both appends were lost.
    Lost,
}

impl RosterOutcome {
    /// Whether the roster contains the user afterwards.
    #[must_use]
    pub const fn is_on_roster(self) -> bool {
        !matches!(self, Self::Lost)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RosterPatcher;

impl RosterPatcher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Add `user` to the roster of `course`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store itself fails; a lost race is
    /// reported as [`RosterOutcome::Lost`].
    #[tracing::instrument(
        name = "roster.add_user_to_roster",
        skip(self, tx),
        fields(course_uuid = %course, user_id = %user),
        err
    )]
    pub async fn add_user_to_roster(
        &self,
        tx: &mut dyn FulfillmentTx,
        course: CourseUuid,
        user: &UserId,
    ) -> Result<RosterOutcome, StoreError> {
        if tx.course_roster(course).await?.contains(user) {
            debug!("user already on roster");

            return Ok(RosterOutcome::AlreadyPresent);
        }

        if append_and_verify(tx, course, user).await? {
            return Ok(RosterOutcome::Appended);
        }

        warn!("roster append did not land; retrying once");

        if append_and_verify(tx, course, user).await? {
            return Ok(RosterOutcome::Retried);
        }

        warn!("roster append lost after retry; enrollment record remains authoritative");

        Ok(RosterOutcome::Lost)
    }
}

async fn append_and_verify(
    tx: &mut dyn FulfillmentTx,
    course: CourseUuid,
    user: &UserId,
) -> Result<bool, StoreError> {
    let written = tx.try_append_user(course, user).await?;

    let landed = tx.course_roster(course).await?.contains(user);

    if written && !landed {
        debug!("roster write was overwritten by a concurrent writer");
    }

    Ok(landed)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::store::FulfillmentStore,
        test::{MemoryStore, helpers::CourseBuilder},
    };

    use super::*;

    #[tokio::test]
    async fn appends_new_user() -> TestResult {
        let store = MemoryStore::new();
        let course = store.insert_course(CourseBuilder::new("Art Therapy").build());
        let user = UserId::new("user-1");

        let mut tx = store.begin().await?;

        let outcome = RosterPatcher::new()
            .add_user_to_roster(tx.as_mut(), course, &user)
            .await?;

        tx.commit().await?;

        assert_eq!(outcome, RosterOutcome::Appended);
        assert_eq!(store.course(course)?.enrolled_users, vec![user]);

        Ok(())
    }

    #[tokio::test]
    async fn existing_user_is_a_no_op() -> TestResult {
        let store = MemoryStore::new();
        let user = UserId::new("user-1");
        let course = store.insert_course(
            CourseBuilder::new("Art Therapy")
                .enrolled([user.clone()])
                .build(),
        );

        let mut tx = store.begin().await?;

        let outcome = RosterPatcher::new()
            .add_user_to_roster(tx.as_mut(), course, &user)
            .await?;

        tx.commit().await?;

        assert_eq!(outcome, RosterOutcome::AlreadyPresent);
        assert_eq!(store.course(course)?.enrolled_users.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn lost_append_is_retried_once() -> TestResult {
        let store = MemoryStore::new();
        let course = store.insert_course(CourseBuilder::new("Diploma").build());
        let user = UserId::new("user-1");

        store.lose_next_appends(1);

        let mut tx = store.begin().await?;

        let outcome = RosterPatcher::new()
            .add_user_to_roster(tx.as_mut(), course, &user)
            .await?;

        tx.commit().await?;

        assert_eq!(outcome, RosterOutcome::Retried);
        assert!(store.course(course)?.has_user(&user));

        Ok(())
    }

    #[tokio::test]
    async fn second_lost_append_is_tolerated() -> TestResult {
        let store = MemoryStore::new();
        let course = store.insert_course(CourseBuilder::new("Diploma").build());
        let user = UserId::new("user-1");

        store.lose_next_appends(2);

        let mut tx = store.begin().await?;

        let outcome = RosterPatcher::new()
            .add_user_to_roster(tx.as_mut(), course, &user)
            .await?;

        tx.commit().await?;

        assert_eq!(outcome, RosterOutcome::Lost);
        assert!(!outcome.is_on_roster());
        assert!(store.course(course)?.enrolled_users.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn closed_course_refuses_new_users() -> TestResult {
        let store = MemoryStore::new();
        let course = store.insert_course(CourseBuilder::new("Closed").capacity(0).build());
        let user = UserId::new("user-1");

        let mut tx = store.begin().await?;

        let outcome = RosterPatcher::new()
            .add_user_to_roster(tx.as_mut(), course, &user)
            .await?;

        tx.commit().await?;

        assert_eq!(outcome, RosterOutcome::Lost);
        assert!(store.course(course)?.enrolled_users.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn full_course_is_not_overbooked() -> TestResult {
        let store = MemoryStore::new();
        let course = store.insert_course(
            CourseBuilder::new("Masterclass")
                .capacity(1)
                .enrolled([UserId::new("someone-else")])
                .build(),
        );
        let user = UserId::new("user-1");

        let mut tx = store.begin().await?;

        let outcome = RosterPatcher::new()
            .add_user_to_roster(tx.as_mut(), course, &user)
            .await?;

        tx.commit().await?;

        assert_eq!(outcome, RosterOutcome::Lost);
        assert_eq!(store.course(course)?.enrolled_users.len(), 1);

        Ok(())
    }
}
