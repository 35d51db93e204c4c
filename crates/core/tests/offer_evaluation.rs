//! Integration tests for offer evaluation and plan inference through the prelude.

use jiff::{SignedDuration, Timestamp, civil::date};
use testresult::TestResult;

use enroll::prelude::*;

fn now() -> TestResult<Timestamp> {
    Ok(Timestamp::from_second(1_710_000_000)?)
}

fn discounted(percent: u8, window: OfferWindow) -> CourseOffers {
    CourseOffers {
        base_price: 1_000,
        discount: Some(DiscountOffer { percent, window }),
        bogo: None,
    }
}

#[test]
fn discount_ending_one_second_ago_is_inactive() -> TestResult {
    let now = now()?;
    let offers = discounted(
        30,
        OfferWindow {
            start_at: None,
            end_at: Some(now - SignedDuration::from_secs(1)),
        },
    );

    assert_eq!(evaluate(&offers, now)?, None);
    assert_eq!(offers.price_at(now)?, 1_000);

    Ok(())
}

#[test]
fn discount_ending_one_second_ahead_is_active() -> TestResult {
    let now = now()?;
    let offers = discounted(
        30,
        OfferWindow {
            start_at: None,
            end_at: Some(now + SignedDuration::from_secs(1)),
        },
    );

    let offer = evaluate(&offers, now)?.ok_or("expected an active offer")?;

    assert!(offer.has_discount);
    assert_eq!(offer.effective_price, 700);
    assert_eq!(offer.original_price, 1_000);
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
fn discount_and_bogo_apply_together() -> TestResult {
    let now = now()?;
    let closes = now + SignedDuration::from_hours(50) + SignedDuration::from_mins(5);

    let offers = CourseOffers {
        base_price: 999,
        discount: Some(DiscountOffer {
            percent: 15,
            window: OfferWindow::unbounded(),
        }),
        bogo: Some(BogoOffer {
            enabled: true,
            window: OfferWindow::between(now - SignedDuration::from_hours(1), closes),
            label: Some("Buy 1 Get 1".to_string()),
        }),
    };

    let offer = evaluate(&offers, now)?.ok_or("expected an active offer")?;

    assert!(offer.has_bogo);
    assert_eq!(offer.bogo_label.as_deref(), Some("Buy 1 Get 1"));
    assert_eq!(offer.discount_percent, 15);
    assert_eq!(offer.effective_price, 849);
    assert_eq!(
        offer.time_left,
        Some(TimeLeft {
            days: 2,
            hours: 2,
            minutes: 5
        })
    );

    Ok(())
}

#[test]
fn disabled_bogo_is_never_active() -> TestResult {
    let now = now()?;
    let offers = CourseOffers {
        base_price: 500,
        discount: None,
        bogo: Some(BogoOffer {
            enabled: false,
            window: OfferWindow::unbounded(),
            label: None,
        }),
    };

    assert_eq!(evaluate(&offers, now)?, None);
    assert!(offers.active_bogo(now).is_none());

    Ok(())
}

#[test]
fn plans_drive_end_dates() {
    let start = Some(date(2024, 2, 1));
    let stored_end = Some(date(2024, 6, 30));

    for (duration, plan, end) in [
        ("2 weeks", Some(Plan::Short), Some(date(2024, 2, 15))),
        ("120 hours", Some(Plan::Short), Some(date(2024, 2, 15))),
        ("4 weeks", Some(Plan::Long), Some(date(2024, 2, 29))),
        ("240 hours", Some(Plan::Long), Some(date(2024, 2, 29))),
        ("3 months", None, stored_end),
    ] {
        let inferred = infer_plan(Some(duration));

        assert_eq!(inferred, plan, "plan for {duration:?}");
        assert_eq!(
            plan_end_date(inferred, start, stored_end),
            end,
            "end date for {duration:?}"
        );
    }
}

#[test]
fn session_priced_categories_skip_enrollment_numbers() {
    let mut rng = rand::thread_rng();

    let therapy = EnrollmentNumber::generate(
        &CourseCategory::from("therapy"),
        &short_code(None, "Art Therapy"),
        None,
        date(2024, 3, 9),
        &mut rng,
    );

    let diploma = EnrollmentNumber::generate(
        &CourseCategory::from("diploma"),
        &short_code(None, "Diploma in Counselling"),
        Some(date(2024, 11, 4)),
        date(2024, 3, 9),
        &mut rng,
    );

    assert_eq!(therapy.as_str(), "N/A");
    assert!(diploma.as_str().starts_with("DIC-1124-"), "got {diploma}");
}
