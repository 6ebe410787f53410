use std::path::Path;
use std::process::Command;

fn corral(inventory: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_corral"));
    cmd.arg("--inventory").arg(inventory);
    cmd
}

fn write_inventory(path: &Path) {
    let yaml = "\
- hostname: db1.example.com
  name: db1
  network:
    ip: 10.0.0.5
- hostname: web1.example.com
  name: web1
  network:
    ip: 192.168.1.9
";
    std::fs::write(path, yaml).unwrap();
}

#[test]
fn lists_inventory_hosts() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = dir.path().join("inventory.yaml");
    write_inventory(&inventory);

    let output = corral(&inventory).arg("list").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["0: db1.example.com", "1: web1.example.com"]);
}

#[test]
fn list_applies_nested_filter() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = dir.path().join("inventory.yaml");
    write_inventory(&inventory);

    let output = corral(&inventory)
        .arg("list")
        .arg("--filter")
        .arg("network.ip{10.")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["0: db1.example.com"]);
}

#[test]
fn add_and_remove_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = dir.path().join("inventory.yaml");

    let status = corral(&inventory)
        .args(["add", "--hostname", "db1.example.com", "--name", "db1"])
        .status()
        .unwrap();
    assert!(status.success());

    let status = corral(&inventory)
        .args(["add", "--hostname", "web1.example.com"])
        .status()
        .unwrap();
    assert!(status.success());

    let output = corral(&inventory).arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 2);

    // remove by name, not hostname
    let status = corral(&inventory).args(["remove", "db1"]).status().unwrap();
    assert!(status.success());

    let output = corral(&inventory).arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["0: web1.example.com"]);
}

#[test]
fn add_merges_nick_defaults_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = dir.path().join("inventory.yaml");
    let settings = dir.path().join("settings.yaml");
    std::fs::write(
        &settings,
        "nicks:\n  rhel-small:\n    os: rhel\n    cpus: 2\n",
    )
    .unwrap();

    let status = corral(&inventory)
        .arg("--settings")
        .arg(&settings)
        .args(["add", "--hostname", "db1.example.com", "--nick", "rhel-small"])
        .status()
        .unwrap();
    assert!(status.success());

    let output = corral(&inventory)
        .args(["list", "--filter", "os=rhel", "--details"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("0: db1.example.com"));
    assert!(stdout.contains("os: rhel"));
    assert!(stdout.contains("cpus: 2"));
}

#[test]
fn unknown_filter_matches_no_hosts() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = dir.path().join("inventory.yaml");
    write_inventory(&inventory);

    let output = corral(&inventory)
        .args(["list", "--filter", "no operator here"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}
