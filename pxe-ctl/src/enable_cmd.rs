use anyhow::{Context, Result};
use pxe_ctl::launchctl::ServiceRegistry;
use pxe_ctl::platform::SystemPlatform;
use pxe_ctl::pxe::{EnableRequest, Pxe};
use pxe_ctl::settings::Settings;

use crate::cli::EnableArgs;

pub fn run_enable(args: EnableArgs, settings: &Settings) -> Result<()> {
    let platform = SystemPlatform::new(&settings.launchctl)?;
    let registry = ServiceRegistry::new(&settings.launch_daemons_dir);
    let pxe = Pxe::new(&platform, &registry, settings);
    let request = EnableRequest {
        config_name: args.name,
        interface: args.interface,
        first_ip: args.first_ip,
        last_ip: args.last_ip,
        bootfile: args.bootfile,
    };

    if args.dry_run {
        let config = pxe
            .plan(&request)
            .with_context(|| format!("cannot enable PXE on {}", request.interface))?;
        print!("{}", config.to_xml()?);
        return Ok(());
    }

    pxe.enable(&request)
        .with_context(|| format!("failed to enable PXE on {}", request.interface))?;
    println!(
        "PXE enabled on {} serving {} as {}",
        request.interface, request.bootfile, request.config_name
    );
    Ok(())
}
