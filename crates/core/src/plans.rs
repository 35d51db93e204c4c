//! Enrollment Plans
//!
//! Multi-plan courses describe their length as free text ("2 weeks",
//! "240 hours", ...). The plan inferred from that text selects the
//! confirmation template and the derived end date of an enrollment. The
//! inference is a heuristic: text that does not map to a plan yields `None`,
//! never an error.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::{ToSpan, civil::Date};
use serde::{Deserialize, Serialize};

const SHORT_PLAN_MAX_WEEKS: u32 = 2;
const LONG_PLAN_MIN_WEEKS: u32 = 4;
const SHORT_PLAN_MAX_HOURS: u32 = 120;
const LONG_PLAN_MIN_HOURS: u32 = 240;

/// Coarse enrollment plan of a multi-plan course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Two-week programme.
    Short,

    /// Four-week programme.
    Long,
}

impl Plan {
    /// Stored tag of the plan.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Long => "long",
        }
    }

    /// Parse a stored tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "short" => Some(Self::Short),
            "long" => Some(Self::Long),
            _ => None,
        }
    }

    /// Programme length in weeks.
    #[must_use]
    pub const fn weeks(self) -> i64 {
        match self {
            Self::Short => 2,
            Self::Long => 4,
        }
    }
}

impl Display for Plan {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DurationUnit {
    Weeks,
    Hours,
}

impl DurationUnit {
    fn parse(word: &str) -> Option<Self> {
        if word.starts_with("week") || word.starts_with("wk") {
            Some(Self::Weeks)
        } else if word.starts_with("hour") || word.starts_with("hr") || word == "h" {
            Some(Self::Hours)
        } else {
            None
        }
    }
}

/// Infer the plan described by a free-text duration.
///
/// The first `<number> <unit>` pair with a week or hour unit decides: up to
/// 2 weeks or 120 hours is [`Plan::Short`], from 4 weeks or 240 hours is
/// [`Plan::Long`]. Anything else, including month-based text, is `None`.
#[must_use]
pub fn infer_plan(duration: Option<&str>) -> Option<Plan> {
    let (amount, unit) = first_duration(duration?)?;

    let (short_max, long_min) = match unit {
        DurationUnit::Weeks => (SHORT_PLAN_MAX_WEEKS, LONG_PLAN_MIN_WEEKS),
        DurationUnit::Hours => (SHORT_PLAN_MAX_HOURS, LONG_PLAN_MIN_HOURS),
    };

    if amount == 0 {
        None
    } else if amount <= short_max {
        Some(Plan::Short)
    } else if amount >= long_min {
        Some(Plan::Long)
    } else {
        None
    }
}

/// End date of an enrollment.
///
/// A plan derives the end date from the start date; without a plan (or a
/// start date) the course's stored end date is kept.
#[must_use]
pub fn plan_end_date(
    plan: Option<Plan>,
    start_date: Option<Date>,
    stored_end_date: Option<Date>,
) -> Option<Date> {
    match (plan, start_date) {
        (Some(plan), Some(start)) => start
            .checked_add(plan.weeks().weeks())
            .ok()
            .or(stored_end_date),
        _ => stored_end_date,
    }
}

fn first_duration(text: &str) -> Option<(u32, DurationUnit)> {
    let text = text.to_lowercase();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let Some(first_digit) = c.to_digit(10) else {
            continue;
        };

        let mut amount = first_digit;

        while let Some(digit) = chars.peek().and_then(|next| next.to_digit(10)) {
            amount = amount.saturating_mul(10).saturating_add(digit);
            chars.next();
        }

        while chars
            .next_if(|next| next.is_whitespace() || *next == '-')
            .is_some()
        {}

        let mut word = String::new();

        while let Some(letter) = chars.next_if(char::is_ascii_alphabetic) {
            word.push(letter);
        }

        if let Some(unit) = DurationUnit::parse(&word) {
            return Some((amount, unit));
        }
    }

    None
}
