//! Enrollment Notifications
//!
//! Jobs are handed to an external scheduler after the checkout commits. The
//! engine never waits on delivery and never inspects the outcome beyond
//! logging a failed submission.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use tracing::info;

pub mod errors;
pub mod jobs;
pub mod templates;

pub use errors::DispatchError;
pub use jobs::{NotificationJob, ScheduleDates};
pub use templates::{NotificationTemplate, template_for};

#[automock]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Submit `job` to the scheduler.
    async fn schedule(&self, job: NotificationJob) -> Result<(), DispatchError>;
}

/// Connection details of the notification scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Job submission endpoint, e.g. `"https://jobs.example.com/v1/jobs"`.
    pub url: String,

    /// Bearer token sent with each submission.
    pub token: Option<String>,
}

/// Posts jobs as JSON to the notification scheduler.
#[derive(Debug, Clone)]
pub struct HttpNotificationDispatcher {
    config: SchedulerConfig,
    http: Client,
}

impl HttpNotificationDispatcher {
    #[must_use]
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl NotificationDispatcher for HttpNotificationDispatcher {
    #[tracing::instrument(
        name = "notifications.http.schedule",
        skip(self, job),
        fields(template = ?job.template),
        err
    )]
    async fn schedule(&self, job: NotificationJob) -> Result<(), DispatchError> {
        let mut request = self.http.post(&self.config.url).json(&job);

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(DispatchError::UnexpectedResponse(format!(
                "job submission failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}

/// Dispatcher used when no scheduler is configured; jobs are only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotificationDispatcher;

#[async_trait]
impl NotificationDispatcher for LoggingNotificationDispatcher {
    async fn schedule(&self, job: NotificationJob) -> Result<(), DispatchError> {
        info!(
            template = ?job.template,
            recipient = %job.recipient_email,
            course = %job.course_name,
            "notification scheduler not configured; job logged only"
        );

        Ok(())
    }
}
