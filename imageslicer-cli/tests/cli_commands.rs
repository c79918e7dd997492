//! Integration tests for the CLI binary.
//!
//! Each test points HOME at a temporary directory so config and log files
//! never touch the real `~/.imageslicer`.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the CLI with `home` as the home directory.
fn run_cli(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_imageslicer"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_config_path_uses_home() {
    let home = TempDir::new().unwrap();
    let output = run_cli(home.path(), &["config", "path"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let expected = home.path().join(".imageslicer").join("config.ini");
    assert_eq!(stdout(&output).trim(), expected.display().to_string());
}

#[test]
fn test_config_init_then_show() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join(".imageslicer").join("config.ini");

    let output = run_cli(home.path(), &["config", "init"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(config_path.exists());

    let output = run_cli(home.path(), &["config", "show"]);
    assert!(output.status.success());
    let shown = stdout(&output);
    assert!(shown.contains("[grid]"));
    assert!(shown.contains("size = 4"));
}

#[test]
fn test_config_init_keeps_existing_file() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".imageslicer");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.ini"), "[grid]\nsize = 6\n").unwrap();

    let output = run_cli(home.path(), &["config", "init"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("already exists"));

    let content = std::fs::read_to_string(config_dir.join("config.ini")).unwrap();
    assert_eq!(content, "[grid]\nsize = 6\n");
}

#[test]
fn test_slice_requires_image_url() {
    let home = TempDir::new().unwrap();
    let output = run_cli(home.path(), &["slice", "--backend", "memory"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("--image-url"));
}

#[test]
fn test_slice_gcs_without_bucket_fails() {
    let home = TempDir::new().unwrap();
    let output = run_cli(
        home.path(),
        &["slice", "--image-url", "http://127.0.0.1:9/a.png", "--backend", "gcs"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("storage.bucket is required"));
}

#[test]
fn test_slice_unreachable_source_fails() {
    let home = TempDir::new().unwrap();
    let output = run_cli(
        home.path(),
        &["slice", "--image-url", "http://127.0.0.1:9/a.png", "--backend", "memory"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to download or open image"));
}

#[test]
fn test_invalid_config_reported() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".imageslicer");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.ini"), "[grid]\nsize = zero\n").unwrap();

    let output = run_cli(
        home.path(),
        &["slice", "--image-url", "http://127.0.0.1:9/a.png"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("grid.size"));
}
