use clap::Parser;
use dupsweep::cli::Cli;
use dupsweep::error::ExitCode;
use dupsweep::interactive::PROMPT;
use dupsweep::output::{GROUP_DELIMITER, REPORT_HEADER};
use dupsweep::{run_app_with, NO_DUPLICATES_MESSAGE};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn run(args: &[&str], input: &str) -> (anyhow::Result<ExitCode>, String) {
    let cli = Cli::parse_from(std::iter::once("dupsweep").chain(args.iter().copied()));
    let mut output = Vec::new();
    let result = run_app_with(cli, Cursor::new(input.as_bytes().to_vec()), &mut output);
    (result, String::from_utf8(output).unwrap())
}

fn hello_world_tree() -> (TempDir, PathBuf, PathBuf, PathBuf) {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    let c = dir.path().join("c.txt");
    fs::write(&a, b"hello").unwrap();
    fs::write(&b, b"hello").unwrap();
    fs::write(&c, b"world").unwrap();
    (dir, a, b, c)
}

fn root_arg(dir: &Path) -> String {
    dir.to_string_lossy().into_owned()
}

#[test]
fn test_no_path_prints_usage() {
    let (result, output) = run(&[], "");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(output.contains("Usage"));
    assert!(output.contains("dupsweep"));
}

#[test]
fn test_no_duplicates_skips_prompt() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("one"), b"1").unwrap();
    fs::write(dir.path().join("two"), b"2").unwrap();

    let (result, output) = run(&[&root_arg(dir.path())], "d\n");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert_eq!(output, format!("{NO_DUPLICATES_MESSAGE}\n"));
    assert!(!output.contains(PROMPT));
}

#[test]
fn test_empty_directory_reports_no_duplicates() {
    let dir = tempdir().unwrap();
    let (result, output) = run(&[&root_arg(dir.path())], "");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert_eq!(output, format!("{NO_DUPLICATES_MESSAGE}\n"));
}

#[test]
fn test_prompt_print_shows_report() {
    let (dir, a, b, c) = hello_world_tree();

    let (result, output) = run(&[&root_arg(dir.path())], "p\n");

    assert_eq!(result.unwrap(), ExitCode::Success);
    let expected = format!(
        "{PROMPT}{REPORT_HEADER}\n{GROUP_DELIMITER}\n{}\n{}\n{GROUP_DELIMITER}\n",
        a.display(),
        b.display()
    );
    assert_eq!(output, expected);
    assert!(b.exists() && c.exists());
}

#[test]
fn test_prompt_reprompts_then_deletes() {
    let (dir, a, b, c) = hello_world_tree();

    let (result, output) = run(&[&root_arg(dir.path())], "maybe\nX\n  D  \n");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert_eq!(output.matches(PROMPT).count(), 3);
    assert!(output.contains("Deleted 1 file(s)"));
    assert!(a.exists());
    assert!(!b.exists());
    assert!(c.exists());
}

#[test]
fn test_prompt_abort_changes_nothing() {
    for answer in ["a\n", "Q\n", ""] {
        let (dir, a, b, c) = hello_world_tree();

        let (result, output) = run(&[&root_arg(dir.path())], answer);

        assert_eq!(result.unwrap(), ExitCode::Success);
        assert!(!output.contains(REPORT_HEADER));
        assert!(a.exists() && b.exists() && c.exists());
    }
}

#[test]
fn test_action_print_json() {
    let (dir, a, _, _) = hello_world_tree();

    let (result, output) = run(
        &[&root_arg(dir.path()), "--action", "print", "--format", "json"],
        "",
    );

    assert_eq!(result.unwrap(), ExitCode::Success);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["duplicates"].as_array().unwrap().len(), 1);
    assert_eq!(value["duplicates"][0]["files"][0], a.to_str().unwrap());
    assert_eq!(value["summary"]["total_files"], 3);
}

#[test]
fn test_action_print_json_without_duplicates() {
    let dir = tempdir().unwrap();
    let (result, output) = run(
        &[&root_arg(dir.path()), "--action", "print", "--format", "json"],
        "",
    );

    assert_eq!(result.unwrap(), ExitCode::Success);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(value["duplicates"].as_array().unwrap().is_empty());
}

#[test]
fn test_action_delete_without_prompt() {
    let (dir, a, b, _) = hello_world_tree();

    let (result, output) = run(&[&root_arg(dir.path()), "--action", "delete", "-j", "2"], "");

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(!output.contains(PROMPT));
    assert!(a.exists());
    assert!(!b.exists());
}

#[test]
fn test_file_root_is_invalid_root() {
    let (dir, a, _, _) = hello_world_tree();

    let (result, output) = run(&[&root_arg(&a)], "d\n");

    let err = result.unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidRoot);
    assert!(output.is_empty());
    assert!(dir.path().join("b.txt").exists());
}

#[test]
fn test_missing_config_file_is_general_error() {
    let (dir, _, b, _) = hello_world_tree();
    let missing = dir.path().join("absent.toml");

    let (result, _) = run(
        &[
            &root_arg(dir.path()),
            "--action",
            "delete",
            "--config",
            &root_arg(&missing),
        ],
        "",
    );

    let err = result.unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    assert!(b.exists());
}

#[cfg(unix)]
#[test]
fn test_skipped_files_give_partial_success() {
    let (dir, a, b, _) = hello_world_tree();
    std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

    let (result, _) = run(&[&root_arg(dir.path()), "--action", "print"], "");
    let err = result.unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);

    let (result, output) = run(
        &[&root_arg(dir.path()), "--action", "print", "--skip-unreadable"],
        "",
    );
    assert_eq!(result.unwrap(), ExitCode::PartialSuccess);
    assert!(output.contains(&a.display().to_string()));
    assert!(output.contains(&b.display().to_string()));
}

#[test]
fn test_relative_root_prints_relative_paths() {
    let dir = tempfile::tempdir_in(".").unwrap();
    fs::write(dir.path().join("one.txt"), b"same").unwrap();
    fs::write(dir.path().join("two.txt"), b"same").unwrap();
    let root = PathBuf::from(dir.path().file_name().unwrap());

    let (result, output) = run(&[&root_arg(&root), "--action", "print"], "");

    assert_eq!(result.unwrap(), ExitCode::Success);
    let listed: Vec<&str> = output
        .lines()
        .filter(|line| *line != REPORT_HEADER && *line != GROUP_DELIMITER)
        .collect();
    assert_eq!(
        listed,
        vec![
            root.join("one.txt").to_str().unwrap(),
            root.join("two.txt").to_str().unwrap()
        ]
    );
}

/// Two groups whose first redundant copy sits in a read-only directory.
///
/// Returns `None` when directory permissions are not enforced (running as root).
#[cfg(unix)]
fn locked_tree() -> Option<(TempDir, PathBuf, PathBuf)> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    for (name, content) in [
        ("a/keep", "dup"),
        ("b/locked", "dup"),
        ("c/one", "other"),
        ("d/two", "other"),
    ] {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
    }

    let locked_dir = dir.path().join("b");
    fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o555)).unwrap();
    if fs::write(locked_dir.join("canary"), b"").is_ok() {
        fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755)).unwrap();
        return None;
    }
    let locked = locked_dir.join("locked");
    let later = dir.path().join("d/two");
    Some((dir, locked, later))
}

#[cfg(unix)]
fn unlock(dir: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir.join("b"), fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_failed_deletion_gives_partial_success() {
    let Some((dir, locked, later)) = locked_tree() else {
        return;
    };

    let (result, output) = run(&[&root_arg(dir.path()), "--action", "delete"], "");
    unlock(dir.path());

    assert_eq!(result.unwrap(), ExitCode::PartialSuccess);
    assert_eq!(ExitCode::PartialSuccess.as_i32(), 3);
    assert!(output.contains("Deleted 1 file(s), 1 failed"));
    assert!(locked.exists());
    assert!(!later.exists());
}

#[cfg(unix)]
#[test]
fn test_stop_on_error_abandons_remaining_groups() {
    let Some((dir, locked, later)) = locked_tree() else {
        return;
    };

    let (result, output) = run(
        &[&root_arg(dir.path()), "--action", "delete", "--stop-on-error"],
        "",
    );
    unlock(dir.path());

    assert_eq!(result.unwrap(), ExitCode::PartialSuccess);
    assert!(output.contains("Deleted 0 file(s), 1 failed"));
    assert!(locked.exists());
    assert!(later.exists());
    assert!(dir.path().join("a/keep").exists());
}
