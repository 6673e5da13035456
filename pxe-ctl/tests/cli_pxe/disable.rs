use super::*;

#[test]
fn disable_after_enable_removes_config_and_stops_daemons() {
    let host = Host::new();
    host.enable("boot/image.efi").assert().success();

    host.cmd()
        .arg("disable")
        .assert()
        .success()
        .stdout(predicate::str::contains("Service com.apple.bootpd stopped."))
        .stdout(predicate::str::contains("Service com.apple.tftpd unloaded."))
        .stdout(predicate::str::contains("PXE configuration pxetgree.config disabled"));

    assert!(!host.bootpd_plist().exists());
    let calls = host.calls();
    assert_eq!(
        &calls[calls.len() - 4..],
        &[
            "stop com.apple.bootpd".to_string(),
            format!("unload -w {}", host.daemon("bootps.plist")),
            "stop com.apple.tftpd".to_string(),
            format!("unload -w {}", host.daemon("tftp.plist")),
        ]
    );
}

#[test]
fn disable_refuses_configuration_written_under_another_name() {
    let host = Host::new();
    host.enable("boot/image.efi")
        .args(["--name", "lab.config"])
        .assert()
        .success();
    let before = host.calls().len();

    host.cmd()
        .args(["disable", "pxetgree.config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bootpd was configured by some other process"));

    assert!(host.bootpd_plist().exists());
    assert_eq!(host.calls().len(), before);

    host.cmd().args(["disable", "lab.config"]).assert().success();
    assert!(!host.bootpd_plist().exists());
}

#[test]
fn disable_foreign_fixture_is_refused() {
    let host = Host::new();
    let mut foreign = fs::read_to_string(fixture("fixtures/bootpd.plist")).expect("fixture");
    foreign = foreign.replace("pxetgree.config", "netboot.lab");
    fs::write(host.bootpd_plist(), foreign).expect("write");

    host.cmd()
        .arg("disable")
        .assert()
        .failure()
        .stderr(predicate::str::contains("netboot.lab"));
    assert!(host.calls().is_empty());
}

#[test]
fn disable_without_config_fails() {
    let host = Host::new();

    host.cmd()
        .arg("disable")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bootpd.plist"));
    assert!(host.calls().is_empty());
}
