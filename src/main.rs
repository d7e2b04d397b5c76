//! webembed - bundle, minify and embed web assets as C arrays.

mod bundle;
mod cli;
mod config;
mod core;
mod emit;
mod generator;
mod logger;
mod manifest;
mod minify;
mod pipeline;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::EmbedConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = EmbedConfig::load(&cli)?;
    debug!(
        "config";
        "{}",
        config
            .config_path
            .as_ref()
            .map_or_else(|| "defaults".to_owned(), |p| p.display().to_string())
    );

    match &cli.command {
        Commands::Build { clean, .. } => cli::build::build(&config, *clean),
        Commands::Bundle { names, .. } => cli::stage::bundle(&config, names),
        Commands::Embed { names } => cli::stage::embed(&config, names),
        Commands::Table => cli::stage::table(&config),
        Commands::List { json } => cli::list::list(&config, *json),
    }
}
