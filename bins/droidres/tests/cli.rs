//! End-to-end tests driving the droidres binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn droidres(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("droidres").unwrap();
    cmd.current_dir(cwd)
        .env_remove("DROIDRES_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".xdg-config"))
        .env("NO_COLOR", "1");
    cmd
}

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn link_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "src/net/sourceforge/fidocadj/globals", b"../../../../shared/globals");
    write(root, "src/net/sourceforge/fidocadj/FidoMain.java", b"!<symlink>../../FidoMain.java");
    write(root, "src/net/sourceforge/fidocadj/Editor.java", b"package net.sourceforge;\n");
    write(root, "src/drawable/icon.png", b"\x89PNG");
    write(
        root,
        ".project",
        b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<projectDescription>\n\t<name>FidoCadJ</name>\n</projectDescription>\n",
    );
    dir
}

#[test]
fn strings_converts_properties_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app.properties", b"app_name=FidoCadJ\nabout=Tom & Jerry's\n");

    droidres(dir.path())
        .args(["strings", "app.properties", "res/values/strings.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 strings"));

    let xml = fs::read_to_string(dir.path().join("res/values/strings.xml")).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n"));
    assert!(xml.contains(r#"<string name="app_name">FidoCadJ</string>"#));
    assert!(xml.contains(r#"<string name="about">Tom &amp; Jerry\'s</string>"#));
}

#[test]
fn strings_no_escape_flag() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app.properties", b"about=Tom & Jerry's\n");

    droidres(dir.path())
        .args(["strings", "app.properties", "out.xml", "--no-escape"])
        .assert()
        .success();

    let xml = fs::read_to_string(dir.path().join("out.xml")).unwrap();
    assert!(xml.contains(r#"<string name="about">Tom & Jerry's</string>"#));
}

#[test]
fn strings_default_output_from_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app.properties", b"k=it's\n");
    write(
        dir.path(),
        ".droidres.toml",
        b"[strings]\nescape = false\noutput = \"values/strings.xml\"\n",
    );

    droidres(dir.path())
        .args(["strings", "app.properties"])
        .assert()
        .success();

    let xml = fs::read_to_string(dir.path().join("values/strings.xml")).unwrap();
    assert!(xml.contains(r#"<string name="k">it's</string>"#));
}

#[test]
fn strings_malformed_line_fails_without_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.properties", b"ok=1\nbroken line\n");

    droidres(dir.path())
        .args(["strings", "bad.properties", "strings.xml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E4001").and(predicate::str::contains("Line 2")));

    assert!(!dir.path().join("strings.xml").exists());
}

#[test]
fn strings_missing_input() {
    let dir = TempDir::new().unwrap();

    droidres(dir.path())
        .args(["strings", "absent.properties", "strings.xml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn strings_dry_run_prints_xml() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app.properties", b"title=Hello\n");

    droidres(dir.path())
        .args(["strings", "app.properties", "strings.xml", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"    <string name="title">Hello</string>"#));

    assert!(!dir.path().join("strings.xml").exists());
}

#[test]
fn strings_json_summary() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app.properties", b"a=1\nb=2\na=3\n");

    droidres(dir.path())
        .args(["--json", "strings", "app.properties", "strings.xml"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""strings": 3"#)
                .and(predicate::str::contains(r#""duplicates": 1"#)),
        );
}

#[test]
fn json_error_report() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.properties", b"=value\n");

    droidres(dir.path())
        .args(["--json", "strings", "bad.properties"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("EMPTY_KEY"));
}

#[test]
fn links_writes_descriptor() {
    let dir = link_fixture();

    droidres(dir.path())
        .arg("links")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 linked resources"));

    let xml = fs::read_to_string(dir.path().join("linkedResources.xml")).unwrap();
    assert!(xml.starts_with("<linkedResources>\n\t<link>\n"));
    assert!(xml.contains(
        "\t\t<name>src/net/sourceforge/fidocadj/FidoMain.java</name>\n\t\t<type>1</type>\n"
    ));
    assert!(xml.contains("\t\t<name>src/net/sourceforge/fidocadj/globals</name>\n\t\t<type>2</type>\n"));
    assert!(!xml.contains("Editor.java"));
    assert!(!xml.contains("icon.png"));
    assert!(xml.ends_with("</linkedResources>\n"));
}

#[test]
fn links_updates_project_file() {
    let dir = link_fixture();

    droidres(dir.path())
        .args(["links", "--project", ".project"])
        .assert()
        .success();

    let project = fs::read_to_string(dir.path().join(".project")).unwrap();
    assert!(project.contains("\t<linkedResources>\n"));
    assert!(project.contains("<type>1</type>"));
    assert!(project.trim_end().ends_with("</projectDescription>"));

    droidres(dir.path())
        .args(["links", "--project", ".project"])
        .assert()
        .success();

    let again = fs::read_to_string(dir.path().join(".project")).unwrap();
    assert_eq!(project, again);
}

#[test]
fn links_dry_run_prints_block() {
    let dir = link_fixture();

    droidres(dir.path())
        .args(["links", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<linkedResources>\n"));

    assert!(!dir.path().join("linkedResources.xml").exists());
}

#[test]
fn links_missing_source_dir() {
    let dir = TempDir::new().unwrap();

    droidres(dir.path())
        .arg("links")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn links_root_and_source_dir_flags() {
    let dir = link_fixture();
    let out = dir.path().join("links.xml");

    droidres(dir.path())
        .args(["links", "--root", "src", "--source-dir", "net", "--output"])
        .arg(&out)
        .assert()
        .success();

    let xml = fs::read_to_string(&out).unwrap();
    assert!(xml.contains("<name>net/sourceforge/fidocadj/globals</name>"));
}

#[cfg(target_os = "linux")]
#[test]
fn user_config_dir_is_honoured() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app.properties", b"k=it's\n");
    write(
        dir.path(),
        ".xdg-config/droidres/config.toml",
        b"[strings]\nescape = false\n",
    );

    droidres(dir.path())
        .args(["strings", "app.properties", "out.xml"])
        .assert()
        .success();

    let xml = fs::read_to_string(dir.path().join("out.xml")).unwrap();
    assert!(xml.contains(r#"<string name="k">it's</string>"#));
}

#[test]
fn links_source_dir_outside_root_rejected() {
    let dir = link_fixture();

    droidres(dir.path())
        .args(["links", "--root", "src", "--source-dir", "../src"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("links.source_dir"));

    assert!(!dir.path().join("src/linkedResources.xml").exists());
}

#[test]
fn log_format_json_writes_json_lines() {
    let dir = link_fixture();

    droidres(dir.path())
        .args(["-v", "--log-format", "json", "links"])
        .assert()
        .success()
        .stderr(predicate::str::contains(r#""level":"INFO""#));
}

#[test]
fn explicit_missing_config_fails() {
    let dir = TempDir::new().unwrap();

    droidres(dir.path())
        .args(["--config", "nope.toml", "links"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn quiet_suppresses_status() {
    let dir = link_fixture();

    droidres(dir.path())
        .args(["--quiet", "links"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
