use clap::Args;
use enroll_app::{
    config::{DatabaseConfig, DispatchConfig},
    context::AppContext,
    domain::courses::CourseUuid,
};
use jiff::Timestamp;

use super::print_json;

#[derive(Debug, Args)]
pub(crate) struct OfferArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    /// Course to evaluate
    #[arg(long)]
    course: CourseUuid,

    /// Instant to evaluate at (RFC 3339); defaults to now
    #[arg(long)]
    at: Option<Timestamp>,
}

pub(crate) async fn run(args: OfferArgs) -> Result<(), String> {
    let context = AppContext::from_config(&args.database, &DispatchConfig::default())
        .await
        .map_err(|error| format!("failed to initialise: {error}"))?;

    let quote = context
        .checkout
        .quote(args.course, args.at.unwrap_or_else(Timestamp::now))
        .await
        .map_err(|error| format!("failed to evaluate offer: {error}"))?;

    print_json(&quote)
}
