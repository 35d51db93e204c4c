//! Course Offers
//!
//! Time-bounded discount and buy-one-get-one offers, and the evaluator that
//! turns a course's offers into the price and badges shown at an instant.
//! Evaluation is pure and cheap enough to run on every render tick.

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label used for a BOGO offer that has no label of its own.
pub const DEFAULT_BOGO_LABEL: &str = "Buy One Get One Free";

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Errors raised while evaluating a course's offers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OfferError {
    /// Discount percentage above 100.
    #[error("discount of {0}% is out of range")]
    PercentOutOfRange(u8),

    /// Discounted price could not be represented in minor units.
    #[error("discounted price could not be converted to minor units")]
    PriceConversion,
}

/// Inclusive time window. An absent bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferWindow {
    /// First instant the offer applies.
    pub start_at: Option<Timestamp>,

    /// Last instant the offer applies.
    pub end_at: Option<Timestamp>,
}

impl OfferWindow {
    /// Window with both bounds set.
    #[must_use]
    pub const fn between(start_at: Timestamp, end_at: Timestamp) -> Self {
        Self {
            start_at: Some(start_at),
            end_at: Some(end_at),
        }
    }

    /// Window that never closes.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start_at: None,
            end_at: None,
        }
    }

    /// Whether `now` falls within `[start_at, end_at]`.
    #[must_use]
    pub fn contains(&self, now: Timestamp) -> bool {
        self.start_at.is_none_or(|start| start <= now) && self.end_at.is_none_or(|end| now <= end)
    }
}

/// Percentage discount valid for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountOffer {
    /// Whole-number percentage off the base price.
    pub percent: u8,

    /// When the discount applies.
    pub window: OfferWindow,
}

impl DiscountOffer {
    /// Whether the discount applies at `now`.
    #[must_use]
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.percent > 0 && self.window.contains(now)
    }
}

/// Buy-one-get-one offer valid for a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BogoOffer {
    /// Master switch set by catalog management.
    pub enabled: bool,

    /// When the offer applies.
    pub window: OfferWindow,

    /// Display label, e.g. "Buy 1 Get 1".
    pub label: Option<String>,
}

impl BogoOffer {
    /// Whether the offer applies at `now`.
    #[must_use]
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.enabled && self.window.contains(now)
    }

    /// Label shown to the buyer and recorded on bonus enrollments.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_BOGO_LABEL)
    }
}

/// Price and offers attached to a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOffers {
    /// Base price in minor units.
    pub base_price: u64,

    /// Optional percentage discount.
    pub discount: Option<DiscountOffer>,

    /// Optional buy-one-get-one offer.
    pub bogo: Option<BogoOffer>,
}

impl CourseOffers {
    /// Offers for a course with no promotions.
    #[must_use]
    pub const fn priced(base_price: u64) -> Self {
        Self {
            base_price,
            discount: None,
            bogo: None,
        }
    }

    /// Active BOGO offer at `now`, if any.
    #[must_use]
    pub fn active_bogo(&self, now: Timestamp) -> Option<&BogoOffer> {
        self.bogo.as_ref().filter(|bogo| bogo.is_active(now))
    }

    /// Active discount at `now`, if any.
    #[must_use]
    pub fn active_discount(&self, now: Timestamp) -> Option<&DiscountOffer> {
        self.discount
            .as_ref()
            .filter(|discount| discount.is_active(now))
    }

    /// Price charged at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error when the active discount is out of range.
    pub fn price_at(&self, now: Timestamp) -> Result<u64, OfferError> {
        match self.active_discount(now) {
            Some(discount) => discounted_price(self.base_price, discount.percent),
            None => Ok(self.base_price),
        }
    }
}

/// Remaining time of an offer, split for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLeft {
    /// Whole days.
    pub days: u64,

    /// Hours past the whole days.
    pub hours: u8,

    /// Minutes past the whole hours.
    pub minutes: u8,
}

impl TimeLeft {
    fn until(end: Timestamp, now: Timestamp) -> Self {
        let seconds = end.duration_since(now).as_secs().max(0);

        Self {
            days: u64::try_from(seconds / SECONDS_PER_DAY).unwrap_or_default(),
            hours: u8::try_from((seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR).unwrap_or_default(),
            minutes: u8::try_from((seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE)
                .unwrap_or_default(),
        }
    }
}

/// Offer state of a course at an instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Price charged.
    pub effective_price: u64,

    /// Whether a discount applies.
    pub has_discount: bool,

    /// Applied discount, 0 when none.
    pub discount_percent: u8,

    /// Base price before any discount.
    pub original_price: u64,

    /// Whether buy-one-get-one applies.
    pub has_bogo: bool,

    /// Label of the active BOGO offer.
    pub bogo_label: Option<String>,

    /// Time until the nearest active offer closes; `None` when every active
    /// offer is open-ended.
    pub time_left: Option<TimeLeft>,
}

/// Evaluate a course's offers at `now`.
///
/// Returns `Ok(None)` when neither the discount nor the BOGO offer is active.
///
/// # Errors
///
/// Returns an error when the active discount is out of range.
pub fn evaluate(offers: &CourseOffers, now: Timestamp) -> Result<Option<Offer>, OfferError> {
    let discount = offers.active_discount(now);
    let bogo = offers.active_bogo(now);

    if discount.is_none() && bogo.is_none() {
        return Ok(None);
    }

    let effective_price = match discount {
        Some(discount) => discounted_price(offers.base_price, discount.percent)?,
        None => offers.base_price,
    };

    let nearest_end = discount
        .and_then(|discount| discount.window.end_at)
        .into_iter()
        .chain(bogo.and_then(|bogo| bogo.window.end_at))
        .min();

    Ok(Some(Offer {
        effective_price,
        has_discount: discount.is_some(),
        discount_percent: discount.map_or(0, |discount| discount.percent),
        original_price: offers.base_price,
        has_bogo: bogo.is_some(),
        bogo_label: bogo.map(|bogo| bogo.label().to_string()),
        time_left: nearest_end.map(|end| TimeLeft::until(end, now)),
    }))
}

/// Apply a whole-number percentage discount, rounding half away from zero.
///
/// # Errors
///
/// Returns an error when `percent` exceeds 100 or the result cannot be
/// represented in minor units.
pub fn discounted_price(base_price: u64, percent: u8) -> Result<u64, OfferError> {
    if percent > 100 {
        return Err(OfferError::PercentOutOfRange(percent));
    }

    let remaining = Decimal::ONE_HUNDRED - Decimal::from(percent);

    (Decimal::from(base_price) * remaining / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(OfferError::PriceConversion)
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use super::*;

    fn now() -> TestResult<Timestamp> {
        Ok("2024-03-10T12:00:00Z".parse()?)
    }

    fn discount(percent: u8, window: OfferWindow) -> CourseOffers {
        CourseOffers {
            base_price: 999,
            discount: Some(DiscountOffer { percent, window }),
            bogo: None,
        }
    }

    #[test]
    fn discount_ending_one_second_ago_is_inactive() -> TestResult {
        let now = now()?;
        let offers = discount(
            20,
            OfferWindow::between(
                now - SignedDuration::from_hours(24),
                now - SignedDuration::from_secs(1),
            ),
        );

        assert_eq!(evaluate(&offers, now)?, None);
        assert_eq!(offers.price_at(now)?, 999);

        Ok(())
    }

    #[test]
    fn discount_ending_in_one_second_is_active() -> TestResult {
        let now = now()?;
        let offers = discount(
            20,
            OfferWindow::between(
                now - SignedDuration::from_hours(24),
                now + SignedDuration::from_secs(1),
            ),
        );

        let offer = evaluate(&offers, now)?.ok_or("expected an active offer")?;

        assert!(offer.has_discount);
        assert_eq!(offer.discount_percent, 20);
        assert_eq!(offer.original_price, 999);
        assert_eq!(offer.effective_price, 799);
        assert_eq!(
            offer.time_left,
            Some(TimeLeft {
                days: 0,
                hours: 0,
                minutes: 0
            })
        );

        Ok(())
    }

    #[test]
    fn window_bounds_are_inclusive() -> TestResult {
        let now = now()?;

        assert!(OfferWindow::between(now, now).contains(now));
        assert!(OfferWindow::unbounded().contains(now));
        assert!(
            !OfferWindow {
                start_at: Some(now + SignedDuration::from_secs(1)),
                end_at: None,
            }
            .contains(now),
            "window starting in the future should not contain now"
        );

        Ok(())
    }

    #[test]
    fn zero_percent_discount_is_never_active() -> TestResult {
        let now = now()?;

        assert_eq!(evaluate(&discount(0, OfferWindow::unbounded()), now)?, None);

        Ok(())
    }

    #[test]
    fn discounted_price_rounds_half_away_from_zero() -> TestResult {
        assert_eq!(discounted_price(999, 50)?, 500);
        assert_eq!(discounted_price(1_000, 33)?, 670);
        assert_eq!(discounted_price(4_999, 100)?, 0);
        assert_eq!(
            discounted_price(100, 120),
            Err(OfferError::PercentOutOfRange(120))
        );

        Ok(())
    }

    #[test]
    fn bogo_is_evaluated_independently_of_discount() -> TestResult {
        let now = now()?;
        let offers = CourseOffers {
            base_price: 2_000,
            discount: Some(DiscountOffer {
                percent: 10,
                window: OfferWindow::between(
                    now - SignedDuration::from_hours(48),
                    now + SignedDuration::from_hours(72),
                ),
            }),
            bogo: Some(BogoOffer {
                enabled: true,
                window: OfferWindow::between(
                    now - SignedDuration::from_hours(24),
                    now + SignedDuration::from_mins(26 * 60 + 5),
                ),
                label: None,
            }),
        };

        let offer = evaluate(&offers, now)?.ok_or("expected an active offer")?;

        assert!(offer.has_discount);
        assert!(offer.has_bogo);
        assert_eq!(offer.effective_price, 1_800);
        assert_eq!(offer.bogo_label.as_deref(), Some(DEFAULT_BOGO_LABEL));
        assert_eq!(
            offer.time_left,
            Some(TimeLeft {
                days: 1,
                hours: 2,
                minutes: 5
            }),
            "time left should count down to the nearer window end"
        );

        Ok(())
    }

    #[test]
    fn disabled_bogo_is_inactive() -> TestResult {
        let now = now()?;
        let offers = CourseOffers {
            base_price: 500,
            discount: None,
            bogo: Some(BogoOffer {
                enabled: false,
                window: OfferWindow::unbounded(),
                label: Some("BOGO".to_string()),
            }),
        };

        assert_eq!(evaluate(&offers, now)?, None);
        assert!(offers.active_bogo(now).is_none());

        Ok(())
    }

    #[test]
    fn open_ended_bogo_has_no_time_left() -> TestResult {
        let now = now()?;
        let offers = CourseOffers {
            base_price: 500,
            discount: None,
            bogo: Some(BogoOffer {
                enabled: true,
                window: OfferWindow::unbounded(),
                label: Some("Buy 1 Get 1".to_string()),
            }),
        };

        let offer = evaluate(&offers, now)?.ok_or("expected an active offer")?;

        assert_eq!(offer.effective_price, 500);
        assert!(!offer.has_discount);
        assert_eq!(offer.bogo_label.as_deref(), Some("Buy 1 Get 1"));
        assert_eq!(offer.time_left, None);

        Ok(())
    }
}
