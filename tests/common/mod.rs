#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs the helpdesk binary against an isolated `HELPDESK_HOME`
pub struct HelpdeskTest {
    pub temp_dir: TempDir,
    binary_path: &'static str,
}

impl HelpdeskTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        HelpdeskTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_helpdesk"),
        }
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(self.binary_path);
        command
            .current_dir(self.temp_dir.path())
            .env("HELPDESK_HOME", self.temp_dir.path())
            .env_remove("HELPDESK_URL")
            .env_remove("HELPDESK_ANON_KEY")
            .env_remove("HELPDESK_LOG");
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("Failed to execute helpdesk command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn write_config(&self, content: &str) {
        let path = self.temp_dir.path().join("config.yaml");
        fs::write(path, content).expect("Failed to write config file");
    }

    pub fn read_config(&self) -> Option<String> {
        fs::read_to_string(self.temp_dir.path().join("config.yaml")).ok()
    }

    /// Point the config at a closed local port so no request leaves the machine.
    pub fn configure_unreachable_backend(&self) {
        self.write_config(
            "backend:\n  url: http://127.0.0.1:9\n  anon_key: test-anon-key\n",
        );
    }
}
