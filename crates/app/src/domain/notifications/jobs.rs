//! Notification job payloads.

use enroll::plans::Plan;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::domain::{
    enrollments::EnrollmentRecord,
    notifications::templates::{NotificationTemplate, template_for},
};

/// Start and end of the enrolled schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDates {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Fire-and-forget job submitted to the notification scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationJob {
    pub template: NotificationTemplate,
    pub recipient_email: String,
    pub recipient_name: String,
    pub course_name: String,
    pub enrollment_number: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_dates: Option<ScheduleDates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,

    pub is_bogo_free: bool,
}

impl NotificationJob {
    /// Job confirming a single enrollment.
    #[must_use]
    pub fn for_enrollment(enrollment: &EnrollmentRecord) -> Self {
        Self {
            template: template_for(&enrollment.course_category, enrollment.plan),
            recipient_email: enrollment.user_email.clone(),
            recipient_name: enrollment.user_name.clone(),
            course_name: enrollment.course_name.clone(),
            enrollment_number: enrollment.enrollment_number.to_string(),
            schedule_dates: schedule_dates(enrollment),
            plan: enrollment.plan,
            is_bogo_free: enrollment.is_bogo_free(),
        }
    }

    /// One booking job covering every guided-session enrollment of a checkout.
    ///
    /// Returns `None` for an empty slice.
    #[must_use]
    pub fn session_booking(enrollments: &[EnrollmentRecord]) -> Option<Self> {
        let first = enrollments.first()?;

        let join = |field: fn(&EnrollmentRecord) -> String| {
            enrollments.iter().map(field).collect::<Vec<_>>().join(", ")
        };

        Some(Self {
            template: NotificationTemplate::SessionBooking,
            recipient_email: first.user_email.clone(),
            recipient_name: first.user_name.clone(),
            course_name: join(|enrollment| enrollment.course_name.clone()),
            enrollment_number: join(|enrollment| enrollment.enrollment_number.to_string()),
            schedule_dates: None,
            plan: None,
            is_bogo_free: enrollments.iter().all(EnrollmentRecord::is_bogo_free),
        })
    }
}

fn schedule_dates(enrollment: &EnrollmentRecord) -> Option<ScheduleDates> {
    if enrollment.start_date.is_none() && enrollment.end_date.is_none() {
        return None;
    }

    Some(ScheduleDates {
        start_date: enrollment.start_date,
        end_date: enrollment.end_date,
    })
}
