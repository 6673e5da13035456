use super::*;

#[test]
fn enable_writes_config_and_starts_both_daemons() {
    let host = Host::new();

    host.enable("boot/image.efi")
        .assert()
        .success()
        .stdout(predicate::str::contains("Service com.apple.tftpd started."))
        .stdout(predicate::str::contains("Service com.apple.bootpd started."))
        .stdout(predicate::str::contains("PXE enabled on"));

    let written = fs::read_to_string(host.bootpd_plist()).expect("bootpd.plist");
    assert!(written.contains("<string>pxetgree.config</string>"));
    assert!(written.contains("<string>127.0.0.0</string>"));
    assert!(written.contains("<string>255.0.0.0</string>"));
    assert!(written.contains("<string>boot/image.efi</string>"));
    assert!(written.contains(&format!("<string>{LOOPBACK}</string>")));

    let tftp = host.daemon("tftp.plist");
    let bootps = host.daemon("bootps.plist");
    assert_eq!(
        host.calls(),
        vec![
            format!("unload -w {tftp}"),
            format!("load -w {tftp}"),
            "start com.apple.tftpd".to_string(),
            format!("unload -w {bootps}"),
            format!("load -w {bootps}"),
            "start com.apple.bootpd".to_string(),
        ]
    );
}

#[test]
fn enable_with_unpublished_bootfile_fails_without_side_effects() {
    let host = Host::new();

    host.enable("boot/missing.efi")
        .assert()
        .failure()
        .stderr(predicate::str::contains("boot/missing.efi not found in"));

    assert!(!host.bootpd_plist().exists());
    assert!(host.calls().is_empty());
}

#[test]
fn enable_rejects_range_off_the_interface_subnet() {
    let host = Host::new();

    let mut cmd = host.cmd();
    cmd.args([
        "enable", "-i", LOOPBACK, "-f", "10.0.0.1", "-l", "10.0.0.9", "-b", "boot/image.efi",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid subnet"));

    assert!(!host.bootpd_plist().exists());
    assert!(host.calls().is_empty());
}

#[test]
fn enable_rejects_malformed_address() {
    let host = Host::new();

    let mut cmd = host.cmd();
    cmd.args([
        "enable", "-i", LOOPBACK, "-f", "127.0.0", "-l", "127.0.0.9", "-b", "boot/image.efi",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid IPv4 address '127.0.0'"));

    assert!(host.calls().is_empty());
}

#[test]
fn dry_run_prints_config_and_changes_nothing() {
    let host = Host::new();

    host.enable("boot/image.efi")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?xml"))
        .stdout(predicate::str::contains("<key>dhcp_option_67</key>"));

    assert!(!host.bootpd_plist().exists());
    assert!(host.calls().is_empty());
}

#[test]
fn bootpd_failure_is_reported_and_tftpd_stays_up() {
    let host = Host::with_failure(Some("start com.apple.bootpd"));

    host.enable("boot/image.efi")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Operation not permitted"));

    let calls = host.calls();
    assert!(calls.contains(&"start com.apple.tftpd".to_string()));
    assert_eq!(calls.last().map(String::as_str), Some("start com.apple.bootpd"));
    assert!(host.bootpd_plist().exists());
}
