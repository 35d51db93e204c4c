//! BOGO selection errors.

use enroll::categories::CourseCategory;
use thiserror::Error;

use crate::domain::courses::CourseUuid;

/// Why an explicitly selected companion course was not granted.
///
/// Rejections never fail a checkout; they trigger the fallback search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BogoRejection {
    #[error("selected course {0} does not exist")]
    NotFound(CourseUuid),

    #[error("selected course is a {found} course, expected {expected}")]
    CategoryMismatch {
        expected: CourseCategory,
        found: CourseCategory,
    },

    #[error("selected course is the purchased course")]
    SameAsSource,

    #[error("selected course {0} has no seats left")]
    SoldOut(CourseUuid),
}
