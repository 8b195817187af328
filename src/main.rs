use anyhow::Result;
use clap::Parser;
use log::info;

use gallery_category_field::cli::Cli;
use gallery_category_field::cli::app::Commands;
use gallery_category_field::cli::commands::{Output, field_command};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();
    info!("Starting category-field");

    match cli.command {
        Commands::Render(args) => field_command(args, Output::Markup).await,
        Commands::Options(args) => field_command(args, Output::Json).await,
    }
}
