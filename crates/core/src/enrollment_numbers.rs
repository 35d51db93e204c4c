//! Enrollment Numbers
//!
//! Human-facing purchase codes of the form `CODE-MMYY-NNNN`: a course short
//! code, the course's start month and year, and a random four digit suffix.
//! Codes are not checked for uniqueness; the suffix space makes a collision
//! within one course cohort unlikely but possible.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::civil::Date;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::categories::CourseCategory;

/// Stored value for enrollments without a number.
pub const NOT_APPLICABLE: &str = "N/A";

const MAX_SHORT_CODE_LEN: usize = 4;
const FALLBACK_SHORT_CODE: &str = "CRS";
const SUFFIX_SPACE: u32 = 10_000;

/// Enrollment number of a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EnrollmentNumber {
    /// Session-priced purchases carry no number.
    NotApplicable,

    /// Generated code.
    Code(String),
}

impl EnrollmentNumber {
    /// Number for an enrollment in a course of `category`.
    ///
    /// `start_date` is the course start; `fallback_date` (usually the order
    /// date) supplies the month and year for courses without one.
    pub fn generate<R: Rng + ?Sized>(
        category: &CourseCategory,
        short_code: &str,
        start_date: Option<Date>,
        fallback_date: Date,
        rng: &mut R,
    ) -> Self {
        if category.is_session_priced() {
            return Self::NotApplicable;
        }

        let date = start_date.unwrap_or(fallback_date);
        let suffix = rng.gen_range(0..SUFFIX_SPACE);

        Self::Code(format!(
            "{short_code}-{month:02}{year:02}-{suffix:04}",
            month = date.month(),
            year = date.year().rem_euclid(100),
        ))
    }

    /// Stored text of the number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotApplicable => NOT_APPLICABLE,
            Self::Code(code) => code,
        }
    }
}

impl Display for EnrollmentNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl From<String> for EnrollmentNumber {
    fn from(value: String) -> Self {
        if value == NOT_APPLICABLE {
            Self::NotApplicable
        } else {
            Self::Code(value)
        }
    }
}

impl From<EnrollmentNumber> for String {
    fn from(value: EnrollmentNumber) -> Self {
        match value {
            EnrollmentNumber::NotApplicable => NOT_APPLICABLE.to_string(),
            EnrollmentNumber::Code(code) => code,
        }
    }
}

/// Short code for a course.
///
/// An explicit catalog code wins; otherwise the initials of the course name
/// are used, e.g. "Clinical Psychology Internship" becomes `CPI`.
#[must_use]
pub fn short_code(explicit: Option<&str>, course_name: &str) -> String {
    let code = match explicit.map(str::trim).filter(|code| !code.is_empty()) {
        Some(code) => code
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_uppercase())
            .collect(),
        None => course_name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter_map(|word| word.chars().next())
            .take(MAX_SHORT_CODE_LEN)
            .map(|c| c.to_ascii_uppercase())
            .collect::<String>(),
    };

    if code.is_empty() {
        FALLBACK_SHORT_CODE.to_string()
    } else {
        code
    }
}
