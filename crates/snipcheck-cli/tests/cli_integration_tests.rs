//! CLI integration tests
//!
//! Drive the `snipcheck` binary against temporary snippet directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (name, body) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, body).unwrap();
    }
}

fn snipcheck(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_snipcheck"))
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn js_notes() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_files(
        temp.path(),
        &[
            (
                "notes/01_basics/04_comparision.js",
                "console.log(2 > 1); // true\nconsole.log(\"2\" > 1); // true\n",
            ),
            ("notes/01_basics/01_variables.js", "let a = 1;\n"),
            ("notes/readme.md", "# not a snippet\n"),
        ],
    );
    temp
}

#[test]
fn test_list_prints_sorted_ids() {
    // Given: a directory with two .js snippets and a markdown file
    let temp = js_notes();

    // When: `snipcheck list notes`
    let output = snipcheck(temp.path(), &["list", "notes"]);

    // Then: ids only, sorted, extension stripped
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let ids: Vec<&str> = stdout.lines().collect();
    assert_eq!(ids, vec!["01_basics/01_variables", "01_basics/04_comparision"]);
}

#[test]
fn test_list_with_counts() {
    let temp = js_notes();

    let output = snipcheck(temp.path(), &["list", "notes", "--counts"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("01_basics/04_comparision\t2"));
    assert!(stdout.contains("01_basics/01_variables\t0"));
}

#[test]
fn test_expect_prints_parsed_lines() {
    let temp = js_notes();

    let output = snipcheck(temp.path(), &["expect", "notes", "01_basics/04_comparision"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "true\ntrue\n");
}

#[test]
fn test_expect_unknown_id_is_fatal() {
    let temp = js_notes();

    let output = snipcheck(temp.path(), &["expect", "notes", "01_basics/nope"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("01_basics/nope"));
}

#[test]
fn test_missing_directory_is_fatal() {
    let temp = TempDir::new().unwrap();

    let output = snipcheck(temp.path(), &["list", "does-not-exist"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_config_is_fatal() {
    let temp = js_notes();
    write_files(temp.path(), &[("bad.toml", "colour = true\n")]);

    let output = snipcheck(temp.path(), &["--config", "bad.toml", "list", "notes"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("colour"));
}

#[cfg(unix)]
mod shell {
    use super::*;

    const SHELL_CONFIG: &str = r##"
extensions = ["sh"]

[syntax]
line_comment = "#"
print_markers = ["echo"]

[interpreter]
program = "sh"
"##;

    fn shell_notes(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        write_files(temp.path(), &[("snipcheck.toml", SHELL_CONFIG)]);
        let prefixed: Vec<(String, &str)> = files
            .iter()
            .map(|(name, body)| (format!("notes/{}", name), *body))
            .collect();
        for (name, body) in &prefixed {
            write_files(temp.path(), &[(name.as_str(), body)]);
        }
        temp
    }

    #[test]
    fn test_run_all_passing() {
        // Given: snipcheck.toml in the working directory selects shell syntax
        let temp = shell_notes(&[("a.sh", "echo 1 # 1\n"), ("b.sh", "echo hi # hi\n")]);

        // When: `snipcheck run notes`
        let output = snipcheck(temp.path(), &["run", "notes"]);

        // Then: exit 0, both PASS lines and the summary
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("PASS a"));
        assert!(stdout.contains("PASS b"));
        assert!(stdout.contains("2 passed, 0 failed"));
    }

    #[test]
    fn test_run_with_failure_exits_one() {
        let temp = shell_notes(&[("a.sh", "echo 1 # 1\n"), ("b.sh", "echo x # y\n")]);

        let output = snipcheck(temp.path(), &["run", "notes"]);

        assert_eq!(output.status.code(), Some(1));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("FAIL b"));
        assert!(stdout.contains("expected: y"));
        assert!(stdout.contains("1 passed, 1 failed"));
    }

    #[test]
    fn test_run_named_ids_only() {
        let temp = shell_notes(&[("a.sh", "echo 1 # 1\n"), ("b.sh", "echo x # y\n")]);

        let output = snipcheck(temp.path(), &["run", "notes", "a"]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(!stdout.contains(" b\n"));
    }

    #[test]
    fn test_run_unknown_id_is_fatal() {
        let temp = shell_notes(&[("a.sh", "echo 1 # 1\n")]);

        let output = snipcheck(temp.path(), &["run", "notes", "zzz"]);

        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_run_json_report_to_file() {
        let temp = shell_notes(&[("a.sh", "echo 1 # 1\n"), ("b.sh", "exit 4\n")]);

        let output = snipcheck(
            temp.path(),
            &["run", "notes", "--format", "json", "--output", "report.json"],
        );

        assert_eq!(output.status.code(), Some(1));
        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(temp.path().join("report.json")).unwrap())
                .unwrap();
        assert_eq!(report["passed"], 1);
        assert_eq!(report["failed"], 1);
        assert!(report["run_id"].is_string());
        assert_eq!(report["results"][1]["diff"][0]["kind"], "execution_error");
    }

    #[test]
    fn test_interpreter_flag_overrides_config() {
        let temp = shell_notes(&[("a.sh", "echo 1 # 1\n")]);

        let output = snipcheck(
            temp.path(),
            &["run", "notes", "--interpreter", "snipcheck-missing-interpreter"],
        );

        // Spawn failure is a snippet failure, not a fatal error.
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stdout).contains("FAIL a"));
    }
}
