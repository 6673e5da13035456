use super::*;

#[test]
fn status_reports_default_daemons() {
    let host = Host::new();

    host.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "com.apple.tftpd: {} (PID: 311 RC: 0)",
            host.daemon("tftp.plist")
        )))
        .stdout(predicate::str::contains(format!(
            "com.apple.bootpd: {}\n",
            host.daemon("bootps.plist")
        )));
}

#[test]
fn status_marks_unknown_labels() {
    let host = Host::new();

    host.cmd()
        .args(["status", "com.example.absent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.absent: Not found."));
    assert!(host.calls().is_empty());
}

#[test]
fn status_json_carries_pid_and_path() {
    let host = Host::new();

    let output = host
        .cmd()
        .args(["status", "com.apple.tftpd", "--format", "json"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(rows[0]["label"], "com.apple.tftpd");
    assert_eq!(rows[0]["status"]["pid"], 311);
    assert_eq!(rows[0]["path"], host.daemon("tftp.plist").as_str());
}

#[test]
fn show_renders_active_configuration() {
    let host = Host::new();
    fs::copy(fixture("fixtures/bootpd.plist"), host.bootpd_plist()).expect("copy");

    host.cmd()
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration: pxetgree.config"))
        .stdout(predicate::str::contains("boot_file: boot/image.efi"));

    host.cmd()
        .args(["show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dhcp_enabled\""));
}

#[test]
fn bad_settings_file_is_reported() {
    let host = Host::new();
    fs::write(host.path("pxe-ctl.toml"), "launchctl = []\n").expect("write");

    host.cmd()
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load settings"));
}
