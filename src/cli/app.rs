use super::commands::FieldArgs;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "category-field")]
#[command(about = "Render the gallery category dropdown for a field declaration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the dropdown markup
    Render(FieldArgs),
    /// Print the option list as JSON
    Options(FieldArgs),
}
