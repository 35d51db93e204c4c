use clap::Args;
use enroll_app::{
    config::{DatabaseConfig, DispatchConfig},
    context::AppContext,
    domain::{
        checkout::{BogoSelection, CheckoutRequest},
        courses::CourseUuid,
    },
};
use jiff::Timestamp;

use super::{buyer::BuyerArgs, print_json};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    dispatch: DispatchConfig,

    #[command(flatten)]
    buyer: BuyerArgs,

    /// Course to purchase; repeat for each cart item
    #[arg(long = "course", required = true)]
    courses: Vec<CourseUuid>,

    /// BOGO choice as `SOURCE` (automatic pick) or `SOURCE=FREE`; repeatable
    #[arg(long = "bogo", value_parser = parse_bogo_selection)]
    bogo_selections: Vec<BogoSelection>,
}

pub(crate) async fn run(args: CheckoutArgs) -> Result<(), String> {
    let identity = args.buyer.into_identity()?;

    let context = AppContext::from_config(&args.database, &args.dispatch)
        .await
        .map_err(|error| format!("failed to initialise: {error}"))?;

    let summaries = context
        .checkout
        .checkout(
            CheckoutRequest {
                identity,
                courses: args.courses,
                bogo_selections: args.bogo_selections,
            },
            Timestamp::now(),
        )
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    print_json(&summaries)
}

fn parse_bogo_selection(value: &str) -> Result<BogoSelection, String> {
    let (source, free) = match value.split_once('=') {
        Some((source, free)) => (source, Some(free)),
        None => (value, None),
    };

    let parse = |uuid: &str| {
        uuid.trim()
            .parse::<CourseUuid>()
            .map_err(|error| format!("invalid course uuid {uuid:?}: {error}"))
    };

    Ok(BogoSelection {
        source_course: parse(source)?,
        free_course: free.map(parse).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const SOURCE: &str = "0190a7d4-6c1e-7b3a-9f00-000000000001";
    const FREE: &str = "0190a7d4-6c1e-7b3a-9f00-000000000002";

    #[test]
    fn bogo_selection_without_companion() -> TestResult {
        let selection = parse_bogo_selection(SOURCE)?;

        assert_eq!(selection.source_course.to_string(), SOURCE);
        assert_eq!(selection.free_course, None);

        Ok(())
    }

    #[test]
    fn bogo_selection_with_companion() -> TestResult {
        let selection = parse_bogo_selection(&format!("{SOURCE}={FREE}"))?;

        assert_eq!(
            selection
                .free_course
                .map(|uuid| uuid.to_string())
                .as_deref(),
            Some(FREE)
        );

        Ok(())
    }

    #[test]
    fn malformed_bogo_selection_is_rejected() {
        assert!(parse_bogo_selection("not-a-uuid").is_err());
        assert!(parse_bogo_selection(&format!("{SOURCE}=nope")).is_err());
    }
}
