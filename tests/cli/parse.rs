//! Parse subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_stdin() {
    cargo_bin_cmd!("blockdown")
        .arg("parse")
        .write_stdin("# Heading\n\nParagraph.")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Document\n"))
        .stdout(predicate::str::contains("  Heading level=1 \"Heading\""))
        .stdout(predicate::str::contains("  Paragraph \"Paragraph.\""));
}

#[test]
fn test_parse_simple_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    fs::write(&test_file, "- a\n- b\n").unwrap();

    cargo_bin_cmd!("blockdown")
        .args(["parse", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("List Unordered tight"))
        .stdout(predicate::str::contains("ListItem '-'"));
}

#[test]
fn test_parse_json() {
    cargo_bin_cmd!("blockdown")
        .args(["parse", "--json"])
        .write_stdin("# Heading\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"Document\""))
        .stdout(predicate::str::contains("\"type\": \"Heading\""))
        .stdout(predicate::str::contains("\"content\": \"Heading\""));
}

#[test]
fn test_parse_with_explicit_config() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    let config_file = temp_dir.path().join("custom.toml");

    fs::write(&test_file, "| a |\n|---|\n| 1 |\n").unwrap();
    fs::write(&config_file, "flavor = \"strict\"\n").unwrap();

    cargo_bin_cmd!("blockdown")
        .args([
            "parse",
            "--config",
            config_file.to_str().unwrap(),
            test_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paragraph"))
        .stdout(predicate::str::contains("Table").not());
}

#[test]
fn test_parse_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    let config_file = temp_dir.path().join("bad.toml");

    fs::write(&test_file, "text\n").unwrap();
    fs::write(&config_file, "flavor = 3\n").unwrap();

    cargo_bin_cmd!("blockdown")
        .args([
            "parse",
            "--config",
            config_file.to_str().unwrap(),
            test_file.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_parse_resolves_includes_next_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("main.md");
    fs::write(temp_dir.path().join(".blockdown.toml"), "flavor = \"mmark\"\n").unwrap();
    fs::write(temp_dir.path().join("part.md"), "one\ntwo\nthree\n").unwrap();
    fs::write(&test_file, "{{part.md}}[2,2]\n\n<{{part.md}}\n").unwrap();

    cargo_bin_cmd!("blockdown")
        .args(["parse", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paragraph \"two\""))
        .stdout(predicate::str::contains(
            "CodeBlock fenced=true info=\"md\" \"one\\ntwo\\nthree\\n\"",
        ));
}

#[test]
fn test_parse_missing_include_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("main.md");
    fs::write(temp_dir.path().join(".blockdown.toml"), "flavor = \"mmark\"\n").unwrap();
    fs::write(&test_file, "{{nowhere.md}}\n\nAfter\n").unwrap();

    cargo_bin_cmd!("blockdown")
        .args(["parse", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::eq("Document\n  Paragraph \"After\"\n"));
}
