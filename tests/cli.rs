use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A modules/input/output layout in a temp dir, with the example module installed.
struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        for dir in ["modules", "input", "output"] {
            fs::create_dir(root.path().join(dir)).unwrap();
        }
        let ws = Self { root };
        ws.module("example", "description = \"Example module\"\nbuiltin = \"example\"\n");
        ws
    }

    fn path(&self, rel: &str) -> std::path::PathBuf {
        self.root.path().join(rel)
    }

    fn module(&self, name: &str, descriptor: &str) {
        fs::write(self.path(&format!("modules/{name}.toml")), descriptor).unwrap();
    }

    fn input(&self, name: &str) -> std::path::PathBuf {
        let path = self.path(&format!("input/{name}"));
        fs::write(&path, "line one\nline two\n").unwrap();
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("logparse").unwrap();
        cmd.env_remove("LOGPARSE_LOG")
            .env("NO_COLOR", "1")
            .arg("--modules-dir")
            .arg(self.path("modules"))
            .arg("--input-dir")
            .arg(self.path("input"))
            .arg("--output-dir")
            .arg(self.path("output"));
        cmd
    }
}

fn exists(path: &Path) -> bool {
    path.is_file()
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("logparse").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("logparse"));
}

#[test]
fn test_cli_help_has_disclaimer() {
    let mut cmd = Command::cargo_bin("logparse").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DISCLAIMER"))
        .stdout(predicate::str::contains("--module-args"));
}

#[test]
fn test_logtype_required() {
    let mut cmd = Command::cargo_bin("logparse").unwrap();
    cmd.assert().code(2);
}

#[test]
fn test_modules_listing() {
    let ws = Workspace::new();
    ws.module("broken", "builtin = \n");
    ws.cmd()
        .arg("--modules")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available logtype modules"))
        .stdout(predicate::str::contains("example"))
        .stdout(predicate::str::contains("builtin:example"))
        .stdout(predicate::str::contains("invalid"));
}

#[test]
fn test_modules_listing_json() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["--modules", "--json"]).output().unwrap();
    assert!(output.status.success());
    let modules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(modules[0]["name"], "example");
    assert_eq!(modules[0]["kind"], "builtin:example");
    assert_eq!(modules[0]["description"], "Example module");
}

#[test]
fn test_modules_listing_missing_dir_is_empty() {
    let ws = Workspace::new();
    fs::remove_dir_all(ws.path("modules")).unwrap();
    ws.cmd()
        .arg("--modules")
        .assert()
        .success()
        .stdout(predicate::str::contains("(none)"));
}

#[test]
fn test_unknown_module() {
    let ws = Workspace::new();
    let log = ws.input("access.log");
    ws.cmd()
        .args(["exmple", "-i"])
        .arg(&log)
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Log Type: exmple -- No Module"))
        .stdout(predicate::str::contains("Module not found. EXITING"))
        .stderr(predicate::str::contains("Did you mean:"))
        .stderr(predicate::str::contains("example"));
    assert_eq!(fs::read_dir(ws.path("output")).unwrap().count(), 0);
}

#[test]
fn test_unknown_module_json_envelope() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["nope", "--json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"]["code"], "module_not_found");
}

#[test]
fn test_manual_by_flag_and_by_default() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["example", "-m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found Module"))
        .stdout(predicate::str::contains("This is my usage guide"));

    // no --logfile and no --list shows the guide too
    ws.cmd()
        .arg("example")
        .assert()
        .success()
        .stdout(predicate::str::contains("This is my usage guide"));
}

#[test]
fn test_manual_fallback() {
    let ws = Workspace::new();
    ws.module("bare", "command = [\"true\"]\n");
    ws.cmd()
        .args(["bare", "--manual"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Module does not have a provided usage guide.",
        ));
}

#[test]
fn test_single_file_derived_outfile() {
    let ws = Workspace::new();
    let log = ws.input("access.log");
    ws.cmd()
        .args(["example", "-r", "tz=UTC", "strict", "-i"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Log File:"))
        .stdout(predicate::str::contains("Found Log File"))
        .stdout(predicate::str::contains("Calling example log parser...."))
        .stdout(predicate::str::contains(
            "I will write to this file when done: access.log--output.log",
        ))
        .stdout(predicate::str::contains(r#"{"tz":"UTC","strict":true}"#));
    assert!(exists(&ws.path("output/access.log--output.log")));
}

#[test]
fn test_single_file_explicit_outfile() {
    let ws = Workspace::new();
    let log = ws.input("access.log");
    ws.cmd()
        .args(["example", "-o", "custom.out", "-i"])
        .arg(&log)
        .assert()
        .success();
    assert!(exists(&ws.path("output/custom.out")));
    assert!(!exists(&ws.path("output/access.log--output.log")));
}

#[test]
fn test_single_file_json_report() {
    let ws = Workspace::new();
    let log = ws.input("access.log");
    let output = ws
        .cmd()
        .args(["example", "--json", "-i"])
        .arg(&log)
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["ok"], true);
    assert_eq!(report["outfile"], "access.log--output.log");
    // module messages move to stderr
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("I have this"));
    assert!(stderr.contains("Parsed log can be found in"));
}

#[test]
fn test_batch_json_report() {
    let ws = Workspace::new();
    ws.input("a.log");
    ws.input("b.log");
    let output = ws.cmd().args(["example", "--list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total"], 2);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["files"][0]["outfile"], "a.log--output.log");
}

#[cfg(unix)]
#[test]
fn test_command_module_stdout_stays_out_of_json() {
    let ws = Workspace::new();
    ws.module(
        "chatty",
        "command = [\"sh\", \"-c\", \"echo parsing $0; : > \\\"$LOGPARSE_OUTPUT_DIR/$1\\\"\"]\n",
    );
    let log = ws.input("access.log");
    let output = ws
        .cmd()
        .args(["chatty", "--json", "-i"])
        .arg(&log)
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["ok"], true);
    assert!(String::from_utf8(output.stderr).unwrap().contains("parsing"));
}

#[cfg(unix)]
#[test]
fn test_out_of_range_timeout_runs_untimed() {
    let ws = Workspace::new();
    ws.module(
        "patient",
        "command = [\"true\"]\ntimeout_secs = 9223372036854775807\n",
    );
    let log = ws.input("access.log");
    ws.cmd()
        .args(["patient", "-i"])
        .arg(&log)
        .assert()
        .success()
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_missing_logfile() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["example", "-i"])
        .arg(ws.path("input/missing.log"))
        .assert()
        .code(4)
        .stdout(predicate::str::contains("No Log File"))
        .stdout(predicate::str::contains("Logfile not found. EXITING"));
}

#[test]
fn test_manual_only_module_cannot_parse() {
    let ws = Workspace::new();
    ws.module("guide", "manual = \"Only a guide\"\n");
    let log = ws.input("access.log");
    ws.cmd()
        .args(["guide", "-i"])
        .arg(&log)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not a valid module!"));

    ws.cmd()
        .args(["guide", "-m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Only a guide"));
}

#[test]
fn test_invalid_descriptor() {
    let ws = Workspace::new();
    ws.module("dual", "builtin = \"example\"\ncommand = [\"true\"]\n");
    ws.cmd()
        .args(["dual", "-m"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid module descriptor"));
}

#[test]
fn test_batch_ignores_outfile() {
    let ws = Workspace::new();
    ws.input("a.log");
    ws.input("b.log");
    ws.cmd()
        .args(["example", "--list", "-o", "ignored.out"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Processed 2 log file(s): 2 parsed, 0 failed",
        ));
    assert!(exists(&ws.path("output/a.log--output.log")));
    assert!(exists(&ws.path("output/b.log--output.log")));
    assert!(!exists(&ws.path("output/ignored.out")));
}

#[test]
fn test_batch_empty_input_dir() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["example", "-l"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 0 log file(s)"));
}

#[test]
fn test_batch_missing_input_dir() {
    let ws = Workspace::new();
    fs::remove_dir_all(ws.path("input")).unwrap();
    ws.cmd()
        .args(["example", "-l"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Cannot read input directory"));
}

#[cfg(unix)]
#[test]
fn test_command_module_failure_in_batch() {
    let ws = Workspace::new();
    // fails on b.log only
    ws.module(
        "picky",
        "command = [\"sh\", \"-c\", \"case \\\"$0\\\" in *b.log) echo bad header >&2; exit 1;; esac; : > \\\"$LOGPARSE_OUTPUT_DIR/$1\\\"\"]\n",
    );
    ws.input("a.log");
    ws.input("b.log");
    ws.cmd()
        .args(["picky", "--list", "-v"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Processed 2 log file(s): 1 parsed, 1 failed"))
        .stdout(predicate::str::contains("bad header"));
    assert!(exists(&ws.path("output/a.log--output.log")));
    assert!(!exists(&ws.path("output/b.log--output.log")));
}
