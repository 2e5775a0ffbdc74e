//! CLI integration tests for the `yard` binary.
//!
//! Every test runs against a fresh application root so cookies and cleanup
//! flags never leak between tests.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Home {
    dir: TempDir,
}

impl Home {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// A `yard` command rooted in this home with a clean environment.
    fn yard(&self) -> Command {
        let mut cmd = Command::cargo_bin("yard").expect("yard binary");
        cmd.env("YARD_HOME", self.dir.path())
            .env_remove("YARD_CONFIG")
            .env_remove("YARD_DEBUG")
            .env_remove("COLUMNS")
            .env("NO_COLOR", "1");
        cmd
    }
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn unknown_command_message_and_status() {
    let home = Home::new();
    home.yard()
        .arg("frobnicate")
        .assert()
        .code(1)
        .stdout("yard: 'frobnicate' is not a yard command. See 'yard help'\n");
}

#[test]
fn alias_resolves_to_command() {
    let home = Home::new();
    home.yard()
        .args(["say", "hello", "world"])
        .assert()
        .success()
        .stdout("hello world\n");
}

#[test]
fn command_option_reaches_command() {
    let home = Home::new();
    home.yard()
        .args(["echo", "--upper", "quiet"])
        .assert()
        .success()
        .stdout("QUIET\n");
}

#[test]
fn unknown_option_is_rejected() {
    let home = Home::new();
    home.yard()
        .args(["say", "hi", "--loud"])
        .assert()
        .code(1)
        .stdout("yard: Unknown option 'loud' for command 'say'\n");
}

#[test]
fn missing_argument_prints_usage() {
    let home = Home::new();
    home.yard()
        .arg("echo")
        .assert()
        .code(1)
        .stdout("usage: yard echo <text>\n");
}

#[test]
fn subcommand_usage_after_descent() {
    let home = Home::new();
    home.yard()
        .args(["cookie", "get", "prefs"])
        .assert()
        .code(1)
        .stdout("usage: yard cookie get <section> <name>\n");
}

#[test]
fn default_command_runs_without_arguments() {
    let home = Home::new();
    home.yard()
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "yard {}\n",
            env!("CARGO_PKG_VERSION")
        )))
        .stdout(predicate::str::contains("root: "));
}

// =============================================================================
// Executable options
// =============================================================================

#[test]
fn version_flag() {
    let home = Home::new();
    home.yard()
        .arg("--version")
        .assert()
        .success()
        .stdout(format!("yard version {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_flag_beats_command() {
    let home = Home::new();
    home.yard()
        .args(["-v", "frobnicate"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("yard version "));
}

#[test]
fn unknown_flag_runs_default_instead_of_command() {
    let home = Home::new();
    home.yard()
        .args(["--bogus", "echo", "hi"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "yard {}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn help_flag_for_command() {
    let home = Home::new();
    home.yard()
        .args(["--help", "cookie"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "usage: yard cookie delete <section> <name>\n",
        ))
        .stdout(predicate::str::contains("Subcommands for 'cookie' are:\n"));
}

#[test]
fn help_lists_commands_but_not_itself() {
    let home = Home::new();
    home.yard()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("usage: yard <command> [<args>]\n"))
        .stdout(predicate::str::contains("   catalog    "))
        .stdout(predicate::str::contains("   help       ").not())
        .stdout(predicate::str::contains("   --version  Show the version\n"));
}

#[test]
fn list_command() {
    let home = Home::new();
    home.yard()
        .arg("list")
        .assert()
        .success()
        .stdout("catalog    cookie     echo       fail       status\n");
}

// =============================================================================
// Application errors
// =============================================================================

#[test]
fn application_error_carries_code() {
    let home = Home::new();
    home.yard()
        .args(["fail", "42", "out of cheese"])
        .assert()
        .code(42)
        .stdout("yard: out of cheese\n");
}

#[test]
fn application_usage_error() {
    let home = Home::new();
    home.yard()
        .args(["fail", "lots"])
        .assert()
        .code(1)
        .stdout("usage: yard fail <code> [<message>]\n");
}

// =============================================================================
// Cookies and cleanup
// =============================================================================

#[test]
fn cookies_persist_between_runs() {
    let home = Home::new();
    home.yard()
        .args(["cookie", "set", "prefs", "theme", "dark"])
        .assert()
        .success()
        .stdout("");
    home.yard()
        .args(["cookie", "get", "prefs", "theme"])
        .assert()
        .success()
        .stdout("dark\n");
    home.yard()
        .args(["cookie", "delete", "prefs", "theme"])
        .assert()
        .success();
    home.yard()
        .args(["cookie", "get", "prefs", "theme"])
        .assert()
        .code(2)
        .stdout("yard: cookie 'prefs.theme' is not set\n");
}

#[test]
fn cleanup_runs_once_per_version() {
    let home = Home::new();
    let cache = home.dir.path().join("cache");
    std::fs::create_dir_all(&cache).expect("create cache");

    home.yard().arg("list").assert().success();
    assert!(!cache.exists());

    let flag = format!("v{}", env!("CARGO_PKG_VERSION").replace('.', "_"));
    home.yard()
        .args(["cookie", "get", "cleanup", flag.as_str()])
        .assert()
        .success()
        .stdout("true\n");

    std::fs::create_dir_all(&cache).expect("recreate cache");
    home.yard().arg("list").assert().success();
    assert!(cache.exists());
}

// =============================================================================
// Catalog and configuration
// =============================================================================

#[test]
fn catalog_is_json() {
    let home = Home::new();
    let output = home
        .yard()
        .arg("catalog")
        .output()
        .expect("run catalog");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("catalog is JSON");
    assert_eq!(json["name"], "yard");
    let names: Vec<_> = json["commands"]
        .as_array()
        .expect("commands")
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert!(names.contains(&"cookie"));
    assert!(names.contains(&"help"));
    assert_eq!(json["options"].as_array().map(Vec::len), Some(2));
}

#[test]
fn catalog_pretty_option() {
    let home = Home::new();
    home.yard()
        .args(["catalog", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n  \"name\": \"yard\""));
}

#[test]
fn debug_env_writes_diagnostics_to_stderr() {
    let home = Home::new();
    home.yard()
        .env("YARD_DEBUG", "1")
        .arg("say")
        .arg("hi")
        .assert()
        .success()
        .stdout("hi\n")
        .stderr(predicate::str::contains("[debug] 'say' resolved to 'echo'"));
}

#[test]
fn config_file_sets_width() {
    let home = Home::new();
    std::fs::write(
        home.dir.path().join("config.toml"),
        "[output]\nwidth = 30\n",
    )
    .expect("write config");

    home.yard()
        .arg("list")
        .assert()
        .success()
        .stdout("catalog    fail\ncookie     status\necho\n");
}

#[test]
fn invalid_config_fails_to_start() {
    let home = Home::new();
    std::fs::write(home.dir.path().join("config.toml"), "bogus = 1\n").expect("write config");

    home.yard()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}
