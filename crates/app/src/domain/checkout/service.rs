//! Checkout Service

use std::sync::Arc;

use async_trait::async_trait;
use enroll::{
    enrollment_numbers::{EnrollmentNumber, short_code},
    offers::{DEFAULT_BOGO_LABEL, evaluate},
    plans::{Plan, plan_end_date},
    sessions::SessionTier,
};
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;
use tracing::{Span, debug, info, warn};

use crate::domain::{
    bogo::{BogoGrant, BogoResolver},
    checkout::{
        CheckoutError,
        context::CheckoutContext,
        models::{CheckoutRequest, EnrollmentSummary, OfferQuote, UserIdentity},
    },
    courses::{CourseRecord, CourseUuid},
    enrollments::{BogoBonus, EnrollmentRecord, EnrollmentUuid, NewEnrollment},
    ledger::{LedgerRow, LedgerSink},
    notifications::{NotificationDispatcher, NotificationJob},
    roster::RosterPatcher,
    store::{FulfillmentStore, FulfillmentTx, StoreError},
};

#[derive(Clone)]
pub struct FulfillmentCheckoutService {
    store: Arc<dyn FulfillmentStore>,
    notifications: Arc<dyn NotificationDispatcher>,
    ledger: Arc<dyn LedgerSink>,
    resolver: BogoResolver,
    roster: RosterPatcher,
}

impl FulfillmentCheckoutService {
    #[must_use]
    pub fn new(
        store: Arc<dyn FulfillmentStore>,
        notifications: Arc<dyn NotificationDispatcher>,
        ledger: Arc<dyn LedgerSink>,
    ) -> Self {
        Self {
            store,
            notifications,
            ledger,
            resolver: BogoResolver::new(),
            roster: RosterPatcher::new(),
        }
    }

    /// Insert one enrollment and put its buyer on the course roster.
    async fn fulfill(
        &self,
        tx: &mut dyn FulfillmentTx,
        identity: &UserIdentity,
        course: &CourseRecord,
        terms: Terms,
        now: Timestamp,
    ) -> Result<EnrollmentRecord, CheckoutError> {
        let enrollment = tx
            .insert_enrollment(new_enrollment(identity, course, terms, now))
            .await?;

        let outcome = self
            .roster
            .add_user_to_roster(tx, course.uuid, &enrollment.user_id)
            .await?;

        debug!(
            enrollment_uuid = %enrollment.uuid,
            course_uuid = %course.uuid,
            roster = ?outcome,
            "enrollment fulfilled"
        );

        Ok(enrollment)
    }

    /// Enroll the buyer in a granted free course, or reuse the bonus an
    /// earlier checkout already created.
    ///
    /// A concurrent checkout may insert the same bonus after our lookup; the
    /// store then refuses the duplicate and the committed bonus is reused.
    async fn fulfill_bonus(
        &self,
        tx: &mut dyn FulfillmentTx,
        identity: &UserIdentity,
        source: &CourseRecord,
        grant: BogoGrant,
        offer_name: &str,
        now: Timestamp,
    ) -> Result<BonusEnrollment, CheckoutError> {
        let user_id = identity.user_id();
        let free_course = grant.free_course;

        if let Some(existing) = tx.find_bogo_enrollment(&user_id, free_course.uuid).await? {
            return self.reuse_bonus(tx, existing).await;
        }

        let terms = Terms::bonus(
            grant.plan,
            BogoBonus {
                source_course_uuid: source.uuid,
                source_course_name: source.name.clone(),
                offer_name: offer_name.to_string(),
            },
        );

        match self.fulfill(tx, identity, &free_course, terms, now).await {
            Ok(enrollment) => Ok(BonusEnrollment::Created(enrollment)),
            Err(CheckoutError::Store(StoreError::AlreadyExists)) => {
                warn!(
                    free_course_uuid = %free_course.uuid,
                    "bogo enrollment created by a concurrent checkout"
                );

                let existing = tx
                    .find_bogo_enrollment(&user_id, free_course.uuid)
                    .await?
                    .ok_or(StoreError::AlreadyExists)?;

                self.reuse_bonus(tx, existing).await
            }
            Err(error) => Err(error),
        }
    }

    async fn reuse_bonus(
        &self,
        tx: &mut dyn FulfillmentTx,
        existing: EnrollmentRecord,
    ) -> Result<BonusEnrollment, CheckoutError> {
        info!(
            enrollment_uuid = %existing.uuid,
            free_course_uuid = %existing.course_uuid,
            "bogo enrollment already exists; reusing"
        );

        self.roster
            .add_user_to_roster(tx, existing.course_uuid, &existing.user_id)
            .await?;

        Ok(BonusEnrollment::Reused(existing))
    }

    /// Hand jobs and ledger rows to their collectors. Failures are logged
    /// and never reach the caller.
    async fn dispatch(&self, jobs: Vec<NotificationJob>, rows: Vec<LedgerRow>) {
        for job in jobs {
            let template = job.template;

            if let Err(error) = self.notifications.schedule(job).await {
                warn!(%error, ?template, "failed to schedule notification");
            }
        }

        for row in rows {
            let enrollment_uuid = row.enrollment_uuid;

            if let Err(error) = self.ledger.append_row(row).await {
                warn!(%error, %enrollment_uuid, "failed to append ledger row");
            }
        }
    }
}

#[async_trait]
impl CheckoutService for FulfillmentCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self, request),
        fields(
            user_id = %request.identity.user_id(),
            is_guest = request.identity.is_guest(),
            course_count = request.courses.len(),
            enrollment_count = tracing::field::Empty,
            bonus_count = tracing::field::Empty
        ),
        err
    )]
    async fn checkout(
        &self,
        request: CheckoutRequest,
        now: Timestamp,
    ) -> Result<Vec<EnrollmentSummary>, CheckoutError> {
        let CheckoutRequest {
            identity,
            courses,
            bogo_selections,
        } = request;

        let mut tx = self.store.begin().await?;

        if let Some(guest) = identity.guest_user() {
            tx.upsert_guest_user(guest).await?;
        }

        let mut context = CheckoutContext::new(bogo_selections);
        let mut bonus_count = 0_usize;

        for course_uuid in courses {
            let course = tx
                .get_course(course_uuid)
                .await?
                .ok_or(CheckoutError::CourseNotFound(course_uuid))?;

            let terms = Terms::paid(&course, now)?;

            let enrollment = self
                .fulfill(tx.as_mut(), &identity, &course, terms, now)
                .await?;

            context.record_created(enrollment);

            let Some(claim) = context.claim_bogo(&course, now) else {
                continue;
            };

            let offer_name = course
                .offers
                .active_bogo(now)
                .map_or(DEFAULT_BOGO_LABEL, |offer| offer.label())
                .to_string();

            let grants = self
                .resolver
                .resolve(tx.as_mut(), &course, now, claim.selection)
                .await?;

            for grant in grants {
                let bonus = self
                    .fulfill_bonus(tx.as_mut(), &identity, &course, grant, &offer_name, now)
                    .await?;

                match bonus {
                    BonusEnrollment::Created(enrollment) => {
                        bonus_count += 1;

                        context.record_created(enrollment);
                    }
                    BonusEnrollment::Reused(enrollment) => context.record_reused(&enrollment),
                }
            }
        }

        tx.commit().await?;

        let outcome = context.finish();

        let span = Span::current();

        span.record("enrollment_count", outcome.summaries.len());
        span.record("bonus_count", bonus_count);

        info!("checkout committed");

        self.dispatch(outcome.jobs, outcome.ledger_rows).await;

        Ok(outcome.summaries)
    }

    #[tracing::instrument(
        name = "checkout.service.enroll",
        skip(self, identity),
        fields(course_uuid = %course),
        err
    )]
    async fn enroll(
        &self,
        identity: UserIdentity,
        course: CourseUuid,
        now: Timestamp,
    ) -> Result<Vec<EnrollmentSummary>, CheckoutError> {
        self.checkout(
            CheckoutRequest {
                identity,
                courses: vec![course],
                bogo_selections: Vec::new(),
            },
            now,
        )
        .await
    }

    #[tracing::instrument(
        name = "checkout.service.quote",
        skip(self),
        fields(course_uuid = %course),
        err
    )]
    async fn quote(&self, course: CourseUuid, now: Timestamp) -> Result<OfferQuote, CheckoutError> {
        let mut tx = self.store.begin().await?;

        let record = tx
            .get_course(course)
            .await?
            .ok_or(CheckoutError::CourseNotFound(course))?;

        let offer = evaluate(&record.offers, now)?;

        Ok(OfferQuote {
            course_uuid: record.uuid,
            price: offer
                .as_ref()
                .map_or(record.offers.base_price, |offer| offer.effective_price),
            base_price: record.offers.base_price,
            seats_left: record.seats_left(),
            course_name: record.name,
            course_category: record.category,
            offer,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Enroll the buyer in every cart course and any BOGO bonus, in one
    /// transaction.
    async fn checkout(
        &self,
        request: CheckoutRequest,
        now: Timestamp,
    ) -> Result<Vec<EnrollmentSummary>, CheckoutError>;

    /// Checkout of a single course without BOGO selections.
    async fn enroll(
        &self,
        identity: UserIdentity,
        course: CourseUuid,
        now: Timestamp,
    ) -> Result<Vec<EnrollmentSummary>, CheckoutError>;

    /// Offer state of a course at `now`.
    async fn quote(&self, course: CourseUuid, now: Timestamp) -> Result<OfferQuote, CheckoutError>;
}

/// Free enrollment produced by one BOGO grant.
#[derive(Debug)]
enum BonusEnrollment {
    Created(EnrollmentRecord),
    Reused(EnrollmentRecord),
}

/// Commercial terms of one enrollment.
#[derive(Debug, Clone)]
struct Terms {
    plan: Option<Plan>,
    amount_paid: u64,
    bogo: Option<BogoBonus>,
}

impl Terms {
    fn paid(course: &CourseRecord, now: Timestamp) -> Result<Self, CheckoutError> {
        Ok(Self {
            plan: course.enrollment_plan(),
            amount_paid: course.offers.price_at(now)?,
            bogo: None,
        })
    }

    fn bonus(plan: Option<Plan>, bogo: BogoBonus) -> Self {
        Self {
            plan,
            amount_paid: 0,
            bogo: Some(bogo),
        }
    }
}

fn new_enrollment(
    identity: &UserIdentity,
    course: &CourseRecord,
    terms: Terms,
    now: Timestamp,
) -> NewEnrollment {
    let order_date = now.to_zoned(TimeZone::UTC).date();

    let enrollment_number = EnrollmentNumber::generate(
        &course.category,
        &short_code(course.short_code.as_deref(), &course.name),
        course.start_date,
        order_date,
        &mut rand::thread_rng(),
    );

    let session_tier = course
        .category
        .is_session_priced()
        .then(|| SessionTier::from_count(course.session_count));

    NewEnrollment {
        uuid: EnrollmentUuid::new(),
        user_id: identity.user_id(),
        user_name: identity.name().trim().to_string(),
        user_email: identity.email().trim().to_string(),
        user_phone: identity.phone().map(str::to_string),
        course_uuid: course.uuid,
        course_name: course.name.clone(),
        course_category: course.category.clone(),
        enrollment_number,
        plan: terms.plan,
        session_count: course.session_count,
        session_tier,
        start_date: course.start_date,
        end_date: plan_end_date(terms.plan, course.start_date, course.end_date),
        amount_paid: terms.amount_paid,
        original_price: course.offers.base_price,
        is_guest: identity.is_guest(),
        bogo: terms.bogo,
    }
}
