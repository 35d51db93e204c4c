//! Per-checkout accumulated state.

use enroll::categories::CourseCategory;
use jiff::Timestamp;
use rustc_hash::FxHashSet;

use crate::domain::{
    checkout::models::{BogoSelection, EnrollmentSummary},
    courses::{CourseRecord, CourseUuid},
    enrollments::EnrollmentRecord,
    ledger::LedgerRow,
    notifications::NotificationJob,
};

/// Source courses whose BOGO offer was already handled in this checkout.
#[derive(Debug, Clone, Default)]
pub struct ProcessedSources(FxHashSet<CourseUuid>);

impl ProcessedSources {
    /// Mark `course` as processed; `false` when it already was.
    pub fn mark(&mut self, course: CourseUuid) -> bool {
        self.0.insert(course)
    }

    #[must_use]
    pub fn contains(&self, course: CourseUuid) -> bool {
        self.0.contains(&course)
    }
}

/// BOGO resolution claimed for a source course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BogoClaim {
    /// Companion explicitly chosen by the buyer.
    pub selection: Option<CourseUuid>,
}

/// Notification grouping of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentBucket {
    /// Booked sessions, confirmed together in one job.
    GuidedSession,

    /// Confirmed one job per enrollment.
    Standard,
}

impl From<&CourseCategory> for FulfillmentBucket {
    fn from(category: &CourseCategory) -> Self {
        if category.is_guided_session() {
            Self::GuidedSession
        } else {
            Self::Standard
        }
    }
}

/// Everything a checkout produces besides store writes.
#[derive(Debug, Default)]
pub struct CheckoutContext {
    selections: Vec<BogoSelection>,
    processed: ProcessedSources,
    summaries: Vec<EnrollmentSummary>,
    guided: Vec<EnrollmentRecord>,
    standard: Vec<EnrollmentRecord>,
}

impl CheckoutContext {
    #[must_use]
    pub fn new(selections: Vec<BogoSelection>) -> Self {
        Self {
            selections,
            ..Self::default()
        }
    }

    /// Whether BOGO should be resolved for `course`, and with which selection.
    ///
    /// Each source course is handled at most once per checkout. When the
    /// buyer made any selections only the selected sources are handled;
    /// otherwise every source with an active offer is.
    pub fn claim_bogo(&mut self, course: &CourseRecord, now: Timestamp) -> Option<BogoClaim> {
        if self.processed.contains(course.uuid) {
            return None;
        }

        let selection = if self.selections.is_empty() {
            course.offers.active_bogo(now)?;

            None
        } else {
            self.selections
                .iter()
                .find(|selection| selection.source_course == course.uuid)?
                .free_course
        };

        self.processed.mark(course.uuid);

        Some(BogoClaim { selection })
    }

    /// Record a newly created enrollment.
    pub fn record_created(&mut self, enrollment: EnrollmentRecord) {
        self.summaries.push(EnrollmentSummary::new(&enrollment, false));

        match FulfillmentBucket::from(&enrollment.course_category) {
            FulfillmentBucket::GuidedSession => self.guided.push(enrollment),
            FulfillmentBucket::Standard => self.standard.push(enrollment),
        }
    }

    /// Record an enrollment reused from an earlier checkout. Reused
    /// enrollments are not notified or synced again.
    pub fn record_reused(&mut self, enrollment: &EnrollmentRecord) {
        self.summaries.push(EnrollmentSummary::new(enrollment, true));
    }

    #[must_use]
    pub fn finish(self) -> CheckoutOutcome {
        let mut jobs: Vec<NotificationJob> = self
            .standard
            .iter()
            .map(NotificationJob::for_enrollment)
            .collect();

        jobs.extend(NotificationJob::session_booking(&self.guided));

        let ledger_rows = self
            .standard
            .iter()
            .chain(&self.guided)
            .map(LedgerRow::from)
            .collect();

        CheckoutOutcome {
            summaries: self.summaries,
            jobs,
            ledger_rows,
        }
    }
}

#[derive(Debug)]
pub struct CheckoutOutcome {
    pub summaries: Vec<EnrollmentSummary>,
    pub jobs: Vec<NotificationJob>,
    pub ledger_rows: Vec<LedgerRow>,
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use crate::test::helpers::{CourseBuilder, EnrollmentBuilder};

    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_second(1_710_000_000).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    #[test]
    fn source_is_claimed_once() {
        let course = CourseBuilder::new("Internship").bogo().build();
        let mut context = CheckoutContext::new(Vec::new());

        assert_eq!(
            context.claim_bogo(&course, now()),
            Some(BogoClaim { selection: None })
        );
        assert_eq!(context.claim_bogo(&course, now()), None);
    }

    #[test]
    fn inactive_offer_is_not_claimed_without_selections() {
        let course = CourseBuilder::new("Internship")
            .bogo_window(
                now() + SignedDuration::from_hours(1),
                now() + SignedDuration::from_hours(2),
            )
            .build();
        let mut context = CheckoutContext::new(Vec::new());

        assert_eq!(context.claim_bogo(&course, now()), None);
    }

    #[test]
    fn selections_limit_claims_to_selected_sources() {
        let selected = CourseBuilder::new("Selected").bogo().build();
        let other = CourseBuilder::new("Other").bogo().build();
        let free = CourseUuid::new();

        let mut context = CheckoutContext::new(vec![BogoSelection {
            source_course: selected.uuid,
            free_course: Some(free),
        }]);

        assert_eq!(context.claim_bogo(&other, now()), None);
        assert_eq!(
            context.claim_bogo(&selected, now()),
            Some(BogoClaim {
                selection: Some(free)
            })
        );
    }

    #[test]
    fn guided_sessions_share_one_job() {
        let mut context = CheckoutContext::new(Vec::new());

        context.record_created(
            EnrollmentBuilder::new("Art Therapy", CourseCategory::Therapy).build(),
        );
        context.record_created(
            EnrollmentBuilder::new("Supervised Practice", CourseCategory::Supervised).build(),
        );
        context.record_created(
            EnrollmentBuilder::new("Diploma", CourseCategory::Diploma).build(),
        );

        let outcome = context.finish();

        assert_eq!(outcome.summaries.len(), 3);
        assert_eq!(outcome.jobs.len(), 2);
        assert_eq!(outcome.ledger_rows.len(), 3);
    }

    #[test]
    fn reused_enrollments_produce_no_jobs() {
        let mut context = CheckoutContext::new(Vec::new());

        context.record_reused(
            &EnrollmentBuilder::new("Diploma", CourseCategory::Diploma).build(),
        );

        let outcome = context.finish();

        assert_eq!(outcome.summaries.len(), 1);
        assert!(outcome.summaries.iter().all(|summary| summary.reused));
        assert!(outcome.jobs.is_empty());
        assert!(outcome.ledger_rows.is_empty());
    }
}
