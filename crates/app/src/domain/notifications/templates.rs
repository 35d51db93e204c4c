//! Notification template selection.

use enroll::{categories::CourseCategory, plans::Plan};
use serde::{Deserialize, Serialize};

/// Message shape the scheduler renders for an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTemplate {
    CertificateConfirmation,
    InternshipConfirmation,
    InternshipShortPlan,
    InternshipLongPlan,
    DiplomaConfirmation,
    PreRecordedAccess,
    MasterclassConfirmation,
    SessionBooking,
    ResumeStudioBooking,
    WorksheetDelivery,
    GenericConfirmation,
}

/// Category tag and plan to template. A `None` plan matches any plan.
const TEMPLATES: &[(&str, Option<Plan>, NotificationTemplate)] = &[
    ("certificate", None, NotificationTemplate::CertificateConfirmation),
    (
        "internship",
        Some(Plan::Short),
        NotificationTemplate::InternshipShortPlan,
    ),
    (
        "internship",
        Some(Plan::Long),
        NotificationTemplate::InternshipLongPlan,
    ),
    ("internship", None, NotificationTemplate::InternshipConfirmation),
    ("diploma", None, NotificationTemplate::DiplomaConfirmation),
    ("pre-recorded", None, NotificationTemplate::PreRecordedAccess),
    ("masterclass", None, NotificationTemplate::MasterclassConfirmation),
    ("therapy", None, NotificationTemplate::SessionBooking),
    ("supervised", None, NotificationTemplate::SessionBooking),
    ("resume-studio", None, NotificationTemplate::ResumeStudioBooking),
    ("worksheet", None, NotificationTemplate::WorksheetDelivery),
];

/// Template for an enrollment in `category` under `plan`.
///
/// Tags without an entry get [`NotificationTemplate::GenericConfirmation`].
#[must_use]
pub fn template_for(category: &CourseCategory, plan: Option<Plan>) -> NotificationTemplate {
    let tag = category.as_str();

    let exact = plan.and_then(|plan| {
        TEMPLATES
            .iter()
            .find(|(entry_tag, entry_plan, _)| *entry_tag == tag && *entry_plan == Some(plan))
    });

    exact
        .or_else(|| {
            TEMPLATES
                .iter()
                .find(|(entry_tag, entry_plan, _)| *entry_tag == tag && entry_plan.is_none())
        })
        .map_or(NotificationTemplate::GenericConfirmation, |(_, _, template)| {
            *template
        })
}
