use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Commit date used by every invocation, so fingerprints are reproducible across runs
pub const FIXED_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Initialized repository whose `master` holds one commit, "first", tracking `foo.txt` = "a"
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("foo.txt"),
        "a".to_string(),
    ));

    run_gitlet_command(repository_dir.path(), &["add", "foo.txt"])
        .assert()
        .success();

    gitlet_commit(repository_dir.path(), "first")
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.envs(vec![("GITLET_DATE", FIXED_DATE), ("GITLET_LOG", "off")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    run_gitlet_command(dir, &["commit", message])
}

/// Stage `files` (written with the given contents) and commit them
pub fn commit_files(dir: &Path, files: &[(&str, &str)], message: &str) {
    for (name, content) in files {
        write_file(FileSpec::new(dir.join(name), content.to_string()));
        run_gitlet_command(dir, &["add", name]).assert().success();
    }

    gitlet_commit(dir, message).assert().success();
}

/// Run a command that must succeed and return what it printed
pub fn gitlet_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_gitlet_command(dir, args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(output).expect("stdout is not valid UTF-8")
}

/// Fingerprint of the commit the current branch points at
pub fn head_commit_id(dir: &Path) -> String {
    let gitlet_dir = dir.join(".gitlet");
    let branch = std::fs::read_to_string(gitlet_dir.join("HEAD")).expect("Failed to read HEAD");

    std::fs::read_to_string(gitlet_dir.join("branches").join(branch.trim()))
        .expect("Failed to read current branch")
        .trim()
        .to_string()
}

/// Commit ids in the order `log` printed them
pub fn logged_commit_ids(log: &str) -> Vec<String> {
    log.lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}

/// Messages in the order `log` printed them
pub fn logged_messages(log: &str) -> Vec<String> {
    log.split("===\n")
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| entry.trim_end().lines().last())
        .map(str::to_string)
        .collect()
}
