use anyhow::Result;
use pxe_ctl::launchctl::ServiceRegistry;
use pxe_ctl::platform::SystemPlatform;
use pxe_ctl::report::{render_status, StatusRow};
use pxe_ctl::settings::Settings;

use crate::cli::{OutputFormat, StatusArgs};

pub fn run_status(args: StatusArgs, settings: &Settings) -> Result<()> {
    let platform = SystemPlatform::new(&settings.launchctl)?;
    let registry = ServiceRegistry::new(&settings.launch_daemons_dir);

    let labels = if args.labels.is_empty() {
        vec![settings.bootpd_label.clone(), settings.tftpd_label.clone()]
    } else {
        args.labels
    };

    let mut rows = Vec::with_capacity(labels.len());
    for label in &labels {
        let service = registry.lookup(label);
        let status = match service {
            Some(service) => service.status(&platform)?,
            None => None,
        };
        rows.push(StatusRow::new(label, service, status));
    }

    match args.format {
        OutputFormat::Text => println!("{}", render_status(&rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}
