#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Maintenance CLI for the covid dashboard.
//!
//! `update-geo` rebuilds the city reference CSV from the live API so
//! that newly-affected municipalities show up in the dropdowns.

mod geo;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "covid-dashboard", about = "Covid dashboard maintenance tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the city reference CSV from the live API
    UpdateGeo {
        /// Path of the reference CSV to rewrite
        #[arg(long, default_value = "data/cities_ibge_code.csv")]
        csv: PathBuf,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    match cli.command {
        Command::UpdateGeo { csv, yes } => geo::update(&csv, yes).await,
    }
}
