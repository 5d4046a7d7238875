#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use chrono::{DateTime, Utc};
use tempfile::TempDir;

/// A self-contained test environment with an isolated data directory.
pub struct TestEnv {
    pub dir: TempDir,
    pub db_path: PathBuf,
}

impl TestEnv {
    /// An environment with no database yet.
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data").join("dialbook");
        std::fs::create_dir_all(&data_dir).unwrap();
        let db_path = data_dir.join("dialbook.db");
        TestEnv { dir, db_path }
    }

    /// Create a test environment by importing the given device export.
    pub fn with_state(state: &serde_json::Value) -> Self {
        let env = Self::empty();
        let path = env.write_file("export.json", &state.to_string());
        env.cmd().arg("import").arg(&path).assert().success();
        env
    }

    /// Create a test environment with a fixture containing known data.
    pub fn with_fixture() -> Self {
        Self::with_state(&fixture_state())
    }

    /// Write a file into the environment's temp dir and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Get a Command configured to run dialbook with this environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = assert_cmd::cargo_bin_cmd!("dialbook");
        cmd.env("XDG_DATA_HOME", self.dir.path().join("data"));
        cmd.env_remove("DIALBOOK_LOG");
        // Ensure no color codes pollute test output
        cmd.env("NO_COLOR", "1");
        cmd.arg("--utc");
        cmd
    }

    /// Get a Command with --json flag.
    pub fn cmd_json(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--json");
        cmd
    }

    /// Run with --json and parse stdout, asserting success.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.cmd_json().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }

    /// Run in TTY mode and return stdout, asserting success.
    pub fn text(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        strip_ansi_escapes::strip_str(String::from_utf8_lossy(&output.stdout))
    }
}

fn millis(rfc3339: &str) -> i64 {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .timestamp_millis()
}

/// Four contacts and six calls. `c1` happened a minute ago; the rest are from June 2025.
pub fn fixture_state() -> serde_json::Value {
    let recent = (Utc::now() - chrono::Duration::minutes(1)).timestamp_millis();
    serde_json::json!({
        "contacts": [
            {
                "id": "1",
                "name": "Ann Lee",
                "photo_uri": "content://photo/1",
                "email": "ann@example.com",
                "numbers": ["+1 (555) 123-0000", "555.000.1111"]
            },
            {"id": "2", "name": "Bob Ray", "starred": true, "numbers": ["555 987 6543"]},
            {"id": "3", "name": "John Smith", "numbers": ["+44 20 7946 0958"]},
            {"id": "4", "name": "Cy Twombly"}
        ],
        "calls": [
            {"id": "c1", "number": "+15551230000", "type": 1, "date": recent, "duration": 65},
            {"id": "c2", "number": "15551230000", "type": 3, "date": millis("2025-06-15T10:00:00Z"), "duration": 0},
            {"id": "c3", "number": "5550009999", "cached_name": "Pizza Place", "type": 2, "date": millis("2025-06-14T12:00:00Z"), "duration": 30},
            {"id": "c4", "number": "555 987 6543", "type": 3, "date": millis("2025-06-13T12:00:00Z"), "duration": 0},
            {"id": "c5", "number": "+442079460958", "type": 1, "date": millis("2025-06-12T12:00:00Z"), "duration": 600},
            {"id": "c6", "type": 99, "date": millis("2025-06-11T12:00:00Z"), "duration": -5}
        ]
    })
}

pub fn ids(values: &serde_json::Value) -> Vec<String> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect()
}
