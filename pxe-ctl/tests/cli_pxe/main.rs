use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn path_as_str(path: &Path) -> &str {
    path.to_str().expect("path should be valid utf-8")
}

#[cfg(target_os = "macos")]
const LOOPBACK: &str = "lo0";
#[cfg(not(target_os = "macos"))]
const LOOPBACK: &str = "lo";

const LIST_OUTPUT: &str = "PID\tStatus\tLabel\n311\t0\tcom.apple.tftpd\n-\t78\tcom.apple.bootpd.helper\n";

/// Sandboxed host: a TFTP root, a LaunchDaemons copy, and a stub launchctl
/// that records its arguments instead of touching launchd.
struct Host {
    dir: TempDir,
}

impl Host {
    fn new() -> Self {
        Self::with_failure(None)
    }

    /// Stub launchctl exits 1 when its arguments start with `fail_prefix`.
    fn with_failure(fail_prefix: Option<&str>) -> Self {
        let dir = tempdir().expect("tempdir");
        let root = dir.path();

        fs::create_dir_all(root.join("tftpboot/boot")).expect("tftp root");
        fs::write(root.join("tftpboot/boot/image.efi"), b"efi").expect("bootfile");

        let daemons = root.join("LaunchDaemons");
        fs::create_dir_all(&daemons).expect("daemons dir");
        for name in ["tftp.plist", "bootps.plist", "unlabeled.plist", "truncated.plist"] {
            fs::copy(fixture(&format!("fixtures/LaunchDaemons/{name}")), daemons.join(name))
                .expect("copy descriptor");
        }

        let fail_case = match fail_prefix {
            Some(prefix) => format!(
                "case \"$*\" in\n  '{prefix}'*) echo 'Operation not permitted' >&2; exit 1 ;;\nesac\n"
            ),
            None => String::new(),
        };
        let stub = root.join("launchctl");
        fs::write(
            &stub,
            format!(
                "#!/bin/sh\necho \"$*\" >> '{calls}'\n{fail_case}if [ \"$1\" = list ]; then\n  printf '{list}'\nfi\n",
                calls = root.join("calls.log").display(),
                list = LIST_OUTPUT.replace('\t', "\\t").replace('\n', "\\n"),
            ),
        )
        .expect("stub");
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).expect("chmod");

        fs::write(
            root.join("pxe-ctl.toml"),
            format!(
                "bootpd_plist = \"{}\"\ntftp_root = \"{}\"\nlaunch_daemons_dir = \"{}\"\nlaunchctl = [\"{}\"]\nlock_file = \"{}\"\n",
                root.join("bootpd.plist").display(),
                root.join("tftpboot").display(),
                daemons.display(),
                stub.display(),
                root.join("pxe-ctl.lock").display(),
            ),
        )
        .expect("settings");

        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn bootpd_plist(&self) -> PathBuf {
        self.path("bootpd.plist")
    }

    fn daemon(&self, name: &str) -> String {
        path_as_str(&self.path("LaunchDaemons").join(name)).to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pxe-ctl"));
        cmd.env("PXE_CTL_SETTINGS", self.path("pxe-ctl.toml"))
            .env_remove("RUST_LOG");
        cmd
    }

    fn enable(&self, bootfile: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.args([
            "enable",
            "-i",
            LOOPBACK,
            "-f",
            "127.0.0.100",
            "-l",
            "127.0.0.200",
            "-b",
            bootfile,
        ]);
        cmd
    }

    fn calls(&self) -> Vec<String> {
        match fs::read_to_string(self.path("calls.log")) {
            Ok(raw) => raw.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}

mod disable;
mod enable;
mod status;
