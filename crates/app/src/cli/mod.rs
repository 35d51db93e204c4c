use clap::{Parser, Subcommand};
use enroll_app::config::LoggingConfig;
use serde::Serialize;

mod buyer;
mod checkout;
mod db;
mod enroll;
mod offer;

#[derive(Debug, Parser)]
#[command(name = "enroll-app", about = "Course fulfillment CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Enroll a buyer in a cart of courses
    Checkout(checkout::CheckoutArgs),

    /// Enroll a buyer in a single course
    Enroll(enroll::EnrollArgs),

    /// Show the offer state of a course
    Offer(offer::OfferArgs),

    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Checkout(args) => checkout::run(args).await,
            Commands::Enroll(args) => enroll::run(args).await,
            Commands::Offer(args) => offer::run(args).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|error| format!("failed to serialize output: {error}"))?;

    println!("{json}");

    Ok(())
}
