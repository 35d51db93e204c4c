//! Buy-One-Get-One Resolution
//!
//! Decides which free companion course, if any, a BOGO purchase grants. An
//! explicit selection is validated; an invalid or absent one falls back to
//! an automatic search over the source course's category. When nothing
//! qualifies the purchase still succeeds and no bonus is granted.

use std::cmp::Ordering;

use enroll::plans::Plan;
use jiff::Timestamp;
use smallvec::SmallVec;
use tracing::{Span, debug, info, warn};

use crate::domain::{
    courses::{CourseRecord, CourseUuid},
    store::{FulfillmentTx, StoreError},
};

pub mod errors;

pub use errors::BogoRejection;

/// Free companion course granted by a BOGO offer.
#[derive(Debug, Clone)]
pub struct BogoGrant {
    pub free_course: CourseRecord,
    pub plan: Option<Plan>,
}

impl BogoGrant {
    fn new(free_course: CourseRecord) -> Self {
        let plan = free_course.enrollment_plan();

        Self { free_course, plan }
    }
}

/// Grants resolved for one source course; empty when none apply.
pub type BogoGrants = SmallVec<[BogoGrant; 1]>;

#[derive(Debug, Clone, Copy, Default)]
pub struct BogoResolver;

impl BogoResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolve the free companion of `source` at `now`.
    ///
    /// Reads the store but never writes to it.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store fails.
    #[tracing::instrument(
        name = "bogo.resolver.resolve",
        skip(self, tx, source),
        fields(
            source_course_uuid = %source.uuid,
            selection = ?selection,
            free_course_uuid = tracing::field::Empty,
            fallback = tracing::field::Empty
        ),
        err
    )]
    pub async fn resolve(
        &self,
        tx: &mut dyn FulfillmentTx,
        source: &CourseRecord,
        now: Timestamp,
        selection: Option<CourseUuid>,
    ) -> Result<BogoGrants, StoreError> {
        let span = Span::current();

        if source.offers.active_bogo(now).is_none() {
            debug!("bogo offer not active");

            return Ok(BogoGrants::new());
        }

        if let Some(selected) = selection {
            let candidate = tx.get_course(selected).await?;

            match validate_selection(source, selected, candidate.as_ref()) {
                Ok(()) => {
                    if let Some(free_course) = candidate {
                        span.record("free_course_uuid", tracing::field::display(free_course.uuid));
                        span.record("fallback", false);

                        return Ok(smallvec::smallvec![BogoGrant::new(free_course)]);
                    }
                }
                Err(rejection) => {
                    warn!(%rejection, "bogo selection rejected; searching for a fallback");
                }
            }
        }

        span.record("fallback", true);

        let candidates = tx.list_courses_in_category(&source.category).await?;

        let Some(free_course) = select_fallback(source, &candidates) else {
            warn!("no bogo companion available; granting no bonus");

            return Ok(BogoGrants::new());
        };

        span.record("free_course_uuid", tracing::field::display(free_course.uuid));

        info!(free_course_uuid = %free_course.uuid, "bogo fallback selected");

        Ok(smallvec::smallvec![BogoGrant::new(free_course.clone())])
    }
}

/// Check an explicitly selected companion course against its source.
///
/// # Errors
///
/// Returns the first reason the selection cannot be granted.
pub fn validate_selection(
    source: &CourseRecord,
    selected: CourseUuid,
    candidate: Option<&CourseRecord>,
) -> Result<(), BogoRejection> {
    let Some(candidate) = candidate else {
        return Err(BogoRejection::NotFound(selected));
    };

    if candidate.category != source.category {
        return Err(BogoRejection::CategoryMismatch {
            expected: source.category.clone(),
            found: candidate.category.clone(),
        });
    }

    if candidate.uuid == source.uuid {
        return Err(BogoRejection::SameAsSource);
    }

    if candidate.is_sold_out() {
        return Err(BogoRejection::SoldOut(candidate.uuid));
    }

    Ok(())
}

/// Pick the automatic companion for `source` among `candidates`.
///
/// Candidates must share the source's category, differ from it and have
/// seats left. The earliest start date wins, then the lowest base price.
/// Courses without a start date rank last.
pub fn select_fallback<'a>(
    source: &CourseRecord,
    candidates: &'a [CourseRecord],
) -> Option<&'a CourseRecord> {
    candidates
        .iter()
        .filter(|candidate| {
            candidate.category == source.category
                && candidate.uuid != source.uuid
                && !candidate.is_sold_out()
        })
        .min_by(|a, b| fallback_order(a, b))
}

fn fallback_order(a: &CourseRecord, b: &CourseRecord) -> Ordering {
    let start_date = match (a.start_date, b.start_date) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    start_date.then_with(|| a.offers.base_price.cmp(&b.offers.base_price))
}
