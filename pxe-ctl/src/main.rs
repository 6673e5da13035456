use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use pxe_ctl::settings::{load_settings, Settings};

mod cli;
mod disable_cmd;
mod enable_cmd;
mod show_cmd;
mod status_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let settings = match &cli.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings {}", path.display()))?,
        None => Settings::default(),
    };

    match cli.command {
        Command::Enable(args) => enable_cmd::run_enable(args, &settings),
        Command::Disable(args) => disable_cmd::run_disable(args, &settings),
        Command::Status(args) => status_cmd::run_status(args, &settings),
        Command::Show(args) => show_cmd::run_show(args, &settings),
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    builder.init();
}
