mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, blocks, catalog, export, init, new_section, repair, validate, ApplyArgs, ExportArgs, InitArgs,
    NewSectionArgs, RepairArgs, ValidateArgs,
};
use config::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Folio CLI - edit and check navigation menus and page layouts
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and data directory
    Init(InitArgs),

    /// Check menus for depth, missing fields and duplicate links
    Validate(ValidateArgs),

    /// Give missing or duplicate menu ids fresh values
    Repair(RepairArgs),

    /// Run a list of editing operations against a menu or page
    Apply(ApplyArgs),

    /// List section templates
    Catalog,

    /// Print a new section built from a template
    NewSection(NewSectionArgs),

    /// Print the public shape of a menu
    Export(ExportArgs),

    /// List block kinds
    Blocks,
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, cwd: &Path) -> anyhow::Result<()> {
    let config = Config::load(cwd)?;
    init_logging(&config);

    match cli.command {
        Command::Init(args) => init(args, cwd),
        Command::Validate(args) => validate(args, &config, cwd),
        Command::Repair(args) => repair(args, &config, cwd),
        Command::Apply(args) => apply(args, &config, cwd),
        Command::Catalog => catalog(),
        Command::NewSection(args) => new_section(args),
        Command::Export(args) => export(args, &config, cwd),
        Command::Blocks => blocks(),
    }
}

fn main() {
    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| run(cli, &cwd));

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
