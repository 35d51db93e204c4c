//! Enrollment Ledger
//!
//! Best-effort row append to the external spreadsheet sync, one row per
//! newly created enrollment.

use async_trait::async_trait;
use enroll::plans::Plan;
use jiff::{Timestamp, civil::Date};
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::enrollments::{EnrollmentRecord, EnrollmentUuid};

/// Denormalized enrollment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub enrollment_uuid: EnrollmentUuid,
    pub enrollment_number: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub course_name: String,
    pub course_category: String,
    pub plan: Option<Plan>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub amount_paid: u64,
    pub original_price: u64,
    pub is_guest: bool,
    pub is_bogo_free: bool,
    pub bogo_source_course: Option<String>,
    pub created_at: Timestamp,
}

impl From<&EnrollmentRecord> for LedgerRow {
    fn from(enrollment: &EnrollmentRecord) -> Self {
        Self {
            enrollment_uuid: enrollment.uuid,
            enrollment_number: enrollment.enrollment_number.to_string(),
            user_id: enrollment.user_id.to_string(),
            user_name: enrollment.user_name.clone(),
            user_email: enrollment.user_email.clone(),
            user_phone: enrollment.user_phone.clone(),
            course_name: enrollment.course_name.clone(),
            course_category: enrollment.course_category.to_string(),
            plan: enrollment.plan,
            start_date: enrollment.start_date,
            end_date: enrollment.end_date,
            amount_paid: enrollment.amount_paid,
            original_price: enrollment.original_price,
            is_guest: enrollment.is_guest,
            is_bogo_free: enrollment.is_bogo_free(),
            bogo_source_course: enrollment
                .bogo
                .as_ref()
                .map(|bonus| bonus.source_course_name.clone()),
            created_at: enrollment.created_at,
        }
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from ledger sync: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait LedgerSink: Send + Sync {
    /// Append one row.
    async fn append_row(&self, row: LedgerRow) -> Result<(), LedgerError>;
}

/// Posts rows as JSON to the ledger sync endpoint.
#[derive(Debug, Clone)]
pub struct HttpLedgerSink {
    url: String,
    http: Client,
}

impl HttpLedgerSink {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl LedgerSink for HttpLedgerSink {
    #[tracing::instrument(
        name = "ledger.http.append_row",
        skip(self, row),
        fields(enrollment_uuid = %row.enrollment_uuid),
        err
    )]
    async fn append_row(&self, row: LedgerRow) -> Result<(), LedgerError> {
        let response = self.http.post(&self.url).json(&row).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(LedgerError::UnexpectedResponse(format!(
                "row append failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}

/// Sink used when no ledger sync is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledLedgerSink;

#[async_trait]
impl LedgerSink for DisabledLedgerSink {
    async fn append_row(&self, row: LedgerRow) -> Result<(), LedgerError> {
        debug!(enrollment_uuid = %row.enrollment_uuid, "ledger sync disabled; row skipped");

        Ok(())
    }
}
