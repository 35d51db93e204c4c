//! Application configuration

use std::sync::Arc;

use clap::Args;

use crate::domain::{
    ledger::{DisabledLedgerSink, HttpLedgerSink, LedgerSink},
    notifications::{
        HttpNotificationDispatcher, LoggingNotificationDispatcher, NotificationDispatcher,
        SchedulerConfig,
    },
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        global = true,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact
    )]
    pub log_format: LogFormat,
}

/// Database settings.
#[derive(Debug, Clone, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

/// Outbound notification and ledger settings. Each collector is disabled
/// when its URL is absent.
#[derive(Debug, Clone, Default, Args)]
pub struct DispatchConfig {
    /// Notification scheduler job endpoint
    #[arg(long, env = "NOTIFICATION_SCHEDULER_URL")]
    pub notification_scheduler_url: Option<String>,

    /// Notification scheduler bearer token
    #[arg(long, env = "NOTIFICATION_SCHEDULER_TOKEN", hide_env_values = true)]
    pub notification_scheduler_token: Option<String>,

    /// Spreadsheet ledger sync endpoint
    #[arg(long, env = "LEDGER_SYNC_URL")]
    pub ledger_sync_url: Option<String>,
}

impl DispatchConfig {
    #[must_use]
    pub fn notifications(&self) -> Arc<dyn NotificationDispatcher> {
        match non_empty(self.notification_scheduler_url.as_deref()) {
            Some(url) => Arc::new(HttpNotificationDispatcher::new(SchedulerConfig {
                url: url.to_string(),
                token: non_empty(self.notification_scheduler_token.as_deref()).map(str::to_string),
            })),
            None => Arc::new(LoggingNotificationDispatcher),
        }
    }

    #[must_use]
    pub fn ledger(&self) -> Arc<dyn LedgerSink> {
        match non_empty(self.ledger_sync_url.as_deref()) {
            Some(url) => Arc::new(HttpLedgerSink::new(url)),
            None => Arc::new(DisabledLedgerSink),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
