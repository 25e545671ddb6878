//! End-to-end runs of the binary against a temp store.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    config: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("htpasswd.toml");
        fs::write(&config, "[hash]\ncost = 4\n").unwrap();
        Self { dir, config }
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("user.htpasswd")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_htpasswd-manager"))
            .current_dir(self.dir.path())
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .output()
            .unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_scenario_uses_default_file_in_cwd() {
    let fx = Fixture::new();

    let out = fx.run(&["add", "alice", "secret1"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "user alice added\n");
    assert!(read(&fx.store()).starts_with("alice:$2a$04$"));

    assert_eq!(stdout(&fx.run(&["list"])), "1. alice\n");

    fx.run(&["add", "bob", "secret2"]);
    assert_eq!(stdout(&fx.run(&["list"])), "1. alice\n2. bob\n");

    let before: Vec<String> = read(&fx.store()).lines().map(str::to_string).collect();
    let out = fx.run(&["editpass", "alice", "newsecret"]);
    assert_eq!(stdout(&out), "password for user alice updated\n");
    let after: Vec<String> = read(&fx.store()).lines().map(str::to_string).collect();
    assert_ne!(after[0], before[0]);
    assert_eq!(after[1], before[1]);

    assert_eq!(stdout(&fx.run(&["delete", "bob"])), "user bob deleted\n");
    assert_eq!(read(&fx.store()).lines().count(), 1);

    let snapshot = read(&fx.store());
    let out = fx.run(&["delete", "bob"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "user bob does not exist\n");
    assert_eq!(read(&fx.store()), snapshot);
}

#[test]
fn test_add_existing_reports_and_keeps_file() {
    let fx = Fixture::new();
    fx.run(&["add", "alice", "secret1"]);
    let snapshot = read(&fx.store());

    let out = fx.run(&["add", "alice", "other"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("already exists"));
    assert_eq!(read(&fx.store()), snapshot);
}

#[test]
fn test_strict_exit_code() {
    let fx = Fixture::new();
    let out = fx.run(&["--strict", "delete", "ghost"]);
    assert_eq!(out.status.code(), Some(3));
    assert_eq!(stdout(&out), "user ghost does not exist\n");

    let out = fx.run(&["editpass", "ghost", "pw", "--strict"]);
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn test_usage_error_does_not_touch_store() {
    let fx = Fixture::new();
    let out = fx.run(&["add", "alice"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!fx.store().exists());

    let out = fx.run(&["add", "a:b", "pw"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!fx.store().exists());
}

#[test]
fn test_file_flag_overrides_default() {
    let fx = Fixture::new();
    let custom = fx.dir.path().join("web.htpasswd");
    let out = fx.run(&["--file", custom.to_str().unwrap(), "add", "alice", "pw"]);
    assert!(out.status.success());
    assert!(custom.exists());
    assert!(!fx.store().exists());
}

#[test]
fn test_list_json_and_empty() {
    let fx = Fixture::new();
    assert_eq!(stdout(&fx.run(&["list"])), "");
    assert_eq!(stdout(&fx.run(&["list", "--format", "table"])), "no users found\n");
    assert_eq!(stdout(&fx.run(&["list", "--format", "json"])).trim(), "[]");

    fx.run(&["add", "alice", "pw"]);
    let json: serde_json::Value =
        serde_json::from_str(&stdout(&fx.run(&["list", "--format", "json"]))).unwrap();
    assert_eq!(json[0]["index"], 1);
    assert_eq!(json[0]["username"], "alice");
}

#[test]
fn test_missing_store_directory_reports_not_found() {
    let fx = Fixture::new();
    let missing = fx.dir.path().join("nope").join("user.htpasswd");
    let out = fx.run(&["--file", missing.to_str().unwrap(), "delete", "bob"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "user bob does not exist\n");

    let out = fx.run(&["--file", missing.to_str().unwrap(), "editpass", "bob", "pw"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "user bob does not exist\n");
    assert!(!fx.dir.path().join("nope").exists());
}

#[test]
fn test_invalid_cost_in_config_is_rejected() {
    let fx = Fixture::new();
    fs::write(&fx.config, "[hash]\ncost = 2\n").unwrap();
    let out = fx.run(&["add", "alice", "pw"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid bcrypt cost 2"));
    assert!(!fx.store().exists());
}

#[cfg(unix)]
#[test]
fn test_unreadable_store_fails_with_nonzero_exit() {
    let fx = Fixture::new();
    fs::create_dir(fx.store()).unwrap();
    let out = fx.run(&["list"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("user.htpasswd"));
}
