use clap::Args;
use enroll_app::{
    config::{DatabaseConfig, DispatchConfig},
    context::AppContext,
    domain::courses::CourseUuid,
};
use jiff::Timestamp;

use super::{buyer::BuyerArgs, print_json};

#[derive(Debug, Args)]
pub(crate) struct EnrollArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    dispatch: DispatchConfig,

    #[command(flatten)]
    buyer: BuyerArgs,

    /// Course to enroll in
    #[arg(long)]
    course: CourseUuid,
}

pub(crate) async fn run(args: EnrollArgs) -> Result<(), String> {
    let identity = args.buyer.into_identity()?;

    let context = AppContext::from_config(&args.database, &args.dispatch)
        .await
        .map_err(|error| format!("failed to initialise: {error}"))?;

    let summaries = context
        .checkout
        .enroll(identity, args.course, Timestamp::now())
        .await
        .map_err(|error| format!("enrollment failed: {error}"))?;

    print_json(&summaries)
}
