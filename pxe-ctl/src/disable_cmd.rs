use anyhow::{Context, Result};
use pxe_ctl::launchctl::ServiceRegistry;
use pxe_ctl::platform::SystemPlatform;
use pxe_ctl::pxe::Pxe;
use pxe_ctl::settings::Settings;

use crate::cli::DisableArgs;

pub fn run_disable(args: DisableArgs, settings: &Settings) -> Result<()> {
    let platform = SystemPlatform::new(&settings.launchctl)?;
    let registry = ServiceRegistry::new(&settings.launch_daemons_dir);
    let pxe = Pxe::new(&platform, &registry, settings);

    pxe.disable(&args.name)
        .with_context(|| format!("failed to disable PXE configuration {}", args.name))?;
    println!("PXE configuration {} disabled", args.name);
    Ok(())
}
