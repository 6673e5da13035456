use anyhow::{Context, Result};
use pxe_ctl::bootpd::read_config;
use pxe_ctl::report::render_config;
use pxe_ctl::settings::Settings;

use crate::cli::{OutputFormat, ShowArgs};

pub fn run_show(args: ShowArgs, settings: &Settings) -> Result<()> {
    let config = read_config(&settings.bootpd_plist).with_context(|| {
        format!(
            "no readable bootpd configuration at {}",
            settings.bootpd_plist.display()
        )
    })?;

    match args.format {
        OutputFormat::Text => println!("{}", render_config(&config)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
