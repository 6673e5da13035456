use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::bootpd::BootpdConfig;
use crate::launchctl::{Service, ServiceStatus};

/// What is known about one launchd label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    pub label: String,
    /// Descriptor plist, `None` if no descriptor carries this label.
    pub path: Option<PathBuf>,
    /// `None` if the job is not listed by launchd.
    pub status: Option<ServiceStatus>,
}

impl StatusRow {
    pub fn new(label: &str, service: Option<&Service>, status: Option<ServiceStatus>) -> Self {
        Self {
            label: label.to_string(),
            path: service.map(|service| service.path().to_path_buf()),
            status,
        }
    }
}

/// One line per row: `label: path (PID: x RC: y)`, `label: path` when the
/// job is not listed, or `label: Not found.` without a descriptor.
pub fn render_status(rows: &[StatusRow]) -> String {
    rows.iter()
        .map(|row| {
            let Some(path) = &row.path else {
                return format!("{}: {}", row.label, "Not found.".red());
            };
            match row.status {
                Some(status) => {
                    let pid = status
                        .pid
                        .map(|pid| pid.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    let detail = format!("(PID: {pid} RC: {})", status.status);
                    let detail = if status.pid.is_some() {
                        detail.green()
                    } else {
                        detail.yellow()
                    };
                    format!("{}: {} {detail}", row.label, path.display())
                }
                None => format!("{}: {}", row.label, path.display()),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summary of a bootpd configuration for terminal output.
pub fn render_config(config: &BootpdConfig) -> String {
    let mut out = Vec::new();
    let owner = config.owner().unwrap_or("<none>");
    out.push(format!("configuration: {}", owner.cyan()));
    out.push(format!("dhcp_enabled: {}", config.dhcp_enabled.join(", ")));
    for subnet in &config.subnets {
        out.push(format!(
            "- {}: {}/{} range={}-{} allocate={}",
            subnet.name,
            subnet.net_address,
            subnet.net_mask,
            subnet.net_range.0,
            subnet.net_range.1,
            subnet.allocate
        ));
        if let Some(server) = &subnet.tftp_server {
            out.push(format!("  tftp_server: {server}"));
        }
        if let Some(file) = &subnet.boot_file {
            out.push(format!("  boot_file: {file}"));
        }
    }
    out.join("\n")
}
