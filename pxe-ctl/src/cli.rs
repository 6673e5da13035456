use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use pxe_ctl::pxe::DEFAULT_CONFIG_NAME;

#[derive(Parser, Debug)]
#[command(name = "pxe-ctl")]
#[command(about = "Enable and disable the bootpd/tftpd PXE boot service")]
pub struct Cli {
    /// TOML file overriding well-known paths and launchd labels.
    #[arg(long, global = true, env = "PXE_CTL_SETTINGS")]
    pub settings: Option<PathBuf>,
    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Serve a boot file over TFTP and hand out DHCP leases for it.
    Enable(EnableArgs),
    /// Stop the PXE service previously enabled under a configuration name.
    Disable(DisableArgs),
    /// Show launchd status of the PXE daemons.
    Status(StatusArgs),
    /// Show the active bootpd configuration.
    Show(ShowArgs),
}

#[derive(Parser, Debug)]
pub struct EnableArgs {
    /// Interface to answer DHCP requests on.
    #[arg(short, long)]
    pub interface: String,
    /// First address handed out.
    #[arg(short, long)]
    pub first_ip: String,
    /// Last address handed out.
    #[arg(short, long)]
    pub last_ip: String,
    /// Boot file, relative to the TFTP root.
    #[arg(short, long)]
    pub bootfile: String,
    /// Configuration name recorded in bootpd.plist.
    #[arg(long, default_value = DEFAULT_CONFIG_NAME)]
    pub name: String,
    /// Validate and print the bootpd configuration without changing anything.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct DisableArgs {
    /// Configuration name given at enable time.
    #[arg(default_value = DEFAULT_CONFIG_NAME)]
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// launchd labels to report. Defaults to the bootpd and tftpd labels.
    pub labels: Vec<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
