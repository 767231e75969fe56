//! End-to-end runs of the binary in a scratch directory.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

/// Scratch directory with an empty config file, so the user's own config never applies.
fn scratch(files: &[&str]) -> TempDir {
    let td = tempdir().unwrap();
    fs::write(td.path().join("config.xml"), "<config></config>").unwrap();
    for name in files {
        fs::write(td.path().join(name), name).unwrap();
    }
    td
}

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("batch_rename"));
    cmd.current_dir(dir).env("BATCH_RENAME_CONFIG", dir.join("config.xml"));
    cmd
}

fn content(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn substitution_renames_files() {
    let td = scratch(&["IMG_1.jpg", "IMG_2.jpg"]);
    cmd(td.path())
        .args(["-e", "s/IMG_/trip-/", "IMG_1.jpg", "IMG_2.jpg"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(content(td.path(), "trip-1.jpg"), "IMG_1.jpg");
    assert_eq!(content(td.path(), "trip-2.jpg"), "IMG_2.jpg");
    assert!(!td.path().join("IMG_1.jpg").exists());
}

#[test]
fn verbose_lists_each_rename() {
    let td = scratch(&["a.txt"]);
    cmd(td.path())
        .args(["-v", "-e", "y/a/b/", "a.txt"])
        .assert()
        .success()
        .stdout("a.txt: b.txt\n");
}

#[test]
fn transliteration_swaps_two_files() {
    let td = scratch(&["1.jpg", "2.jpg"]);
    cmd(td.path())
        .args(["-e", "y/12/21/", "1.jpg", "2.jpg"])
        .assert()
        .success();

    assert_eq!(content(td.path(), "1.jpg"), "2.jpg");
    assert_eq!(content(td.path(), "2.jpg"), "1.jpg");
}

#[test]
fn dry_run_lists_without_renaming() {
    let td = scratch(&["old.txt"]);
    cmd(td.path())
        .args(["-n", "-e", "s/old/new/", "old.txt"])
        .assert()
        .success()
        .stdout("old.txt: new.txt\n");

    assert!(td.path().join("old.txt").exists());
    assert!(!td.path().join("new.txt").exists());
}

#[test]
fn existing_target_is_a_partial_failure() {
    let td = scratch(&["a", "b", "c"]);
    cmd(td.path())
        .args(["-e", "s/a/b/; s/c/d/", "a", "c"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("a not renamed").and(predicate::str::contains("exists")));

    assert_eq!(content(td.path(), "a"), "a");
    assert_eq!(content(td.path(), "b"), "b");
    assert_eq!(content(td.path(), "d"), "c");
}

#[test]
fn force_overwrites() {
    let td = scratch(&["a", "b"]);
    cmd(td.path()).args(["-f", "-e", "s/a/b/", "a"]).assert().success();
    assert_eq!(content(td.path(), "b"), "a");
    assert!(!td.path().join("a").exists());
}

#[test]
fn numbering_with_zero_pad() {
    let names: Vec<String> = (1..=10).map(|i| format!("f{i}.JPG")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let td = scratch(&refs);

    cmd(td.path())
        .args(["-s", "p{N}", "-z", "-l"])
        .args(&refs)
        .assert()
        .success();

    assert_eq!(content(td.path(), "p01.jpg"), "f1.JPG");
    assert_eq!(content(td.path(), "p10.jpg"), "f10.JPG");
}

#[test]
fn names_from_stdin() {
    let td = scratch(&["one", "two", "three"]);
    cmd(td.path())
        .args(["-r", "-v", "one", "two", "three"])
        .write_stdin("uno\n\ntres\n")
        .assert()
        .success()
        .stdout("one: uno\nthree: tres\n");

    assert_eq!(content(td.path(), "uno"), "one");
    assert_eq!(content(td.path(), "two"), "two");
    assert_eq!(content(td.path(), "tres"), "three");
}

#[test]
fn stdin_running_dry_rejects_remaining_files() {
    let td = scratch(&["one", "two"]);
    cmd(td.path())
        .args(["-r", "one", "two"])
        .write_stdin("uno\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("two not renamed: no input"));

    assert!(td.path().join("uno").exists());
    assert!(td.path().join("two").exists());
}

#[test]
fn bad_expression_is_a_usage_error() {
    let td = scratch(&["a"]);
    cmd(td.path())
        .args(["-e", "s/(/x/", "a"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid expression"));
    assert!(td.path().join("a").exists());
}

#[test]
fn missing_file_is_reported() {
    let td = scratch(&["real"]);
    cmd(td.path())
        .args(["-e", "s/$/-x/", "ghost", "real"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ghost not renamed"));
    assert!(td.path().join("real-x").exists());
}

#[test]
fn no_files_is_success() {
    let td = scratch(&[]);
    cmd(td.path()).args(["-e", "s/a/b/"]).assert().success();
}

#[test]
fn print_config_shows_env_path() {
    let td = scratch(&[]);
    cmd(td.path())
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.xml"));
}

#[test]
fn missing_explicit_config_fails() {
    let td = tempdir().unwrap();
    Command::new(cargo_bin!("batch_rename"))
        .current_dir(td.path())
        .env("BATCH_RENAME_CONFIG", td.path().join("absent.xml"))
        .arg("x")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("absent.xml"));
}
