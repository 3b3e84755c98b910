#![allow(dead_code)]

use std::path::Path;
use std::process::Output;

use tokio::process::Command;

/// Build a CLI invocation isolated in `home`, with no ambient kasa settings.
pub fn cli(args: &[&str], home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kasa"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("KASA_BASE_URL");
    cmd.env_remove("KASA_TOKEN");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run the CLI against `base_url` given through the environment.
pub async fn run_against(args: &[&str], home: &Path, base_url: &str) -> Output {
    cli(args, home)
        .env("KASA_BASE_URL", base_url)
        .env("KASA_TOKEN", "test-token")
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Run the CLI with only the isolated home.
pub async fn run(args: &[&str], home: &Path) -> Output {
    cli(args, home).output().await.expect("Failed to execute CLI")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Panic with stderr unless the command succeeded.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "CLI command failed\nstdout: {}\nstderr: {}",
        stdout(output),
        stderr(output)
    );
}
