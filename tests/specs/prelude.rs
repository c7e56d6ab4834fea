// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fluent helpers for driving the `pw` binary.

use assert_cmd::Command;
use std::path::Path;

pub use serde_json::{json, Value};

/// Start building a `pw` invocation with a clean, colorless environment.
pub fn cli() -> Cli {
    Cli { args: Vec::new(), env: Vec::new(), stdin: None }
}

pub struct Cli {
    args: Vec<String>,
    env: Vec<(String, String)>,
    stdin: Option<String>,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.env.push((key.to_string(), value.as_ref().to_string()));
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    fn run(self) -> Output {
        let mut cmd = Command::cargo_bin("pw").unwrap();
        for var in ["PW_CONFIG", "PW_URL", "PW_POLL_MS", "PW_TIMEOUT_MS", "PW_ARTIFACT_RETRY_MS", "PW_LOG", "COLOR"] {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        // Keep a developer's own config file out of the picture.
        let home = tempfile::tempdir().unwrap();
        cmd.env("HOME", home.path()).env("XDG_CONFIG_HOME", home.path());
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        let output = cmd.args(&self.args).output().unwrap();
        Output {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Run and assert exit code 0.
    pub fn passes(self) -> Output {
        let out = self.run();
        assert_eq!(out.code, Some(0), "expected success\nstdout:\n{}\nstderr:\n{}", out.stdout, out.stderr);
        out
    }

    /// Run and assert a non-zero exit code.
    pub fn fails(self) -> Output {
        let out = self.run();
        assert_ne!(out.code, Some(0), "expected failure\nstdout:\n{}", out.stdout);
        out
    }
}

pub struct Output {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout unexpectedly has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn exit_code(self, code: i32) -> Self {
        assert_eq!(self.code, Some(code));
        self
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}

/// A saved status response on disk.
pub struct SnapshotFile {
    _dir: tempfile::TempDir,
    path: std::path::PathBuf,
}

impl SnapshotFile {
    pub fn new(body: &Value) -> Self {
        Self::raw(&body.to_string())
    }

    pub fn raw(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        std::fs::write(&path, contents).unwrap();
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &str {
        self.path.to_str().unwrap()
    }
}

/// Write `contents` to a config file inside `dir`.
pub fn config_file(dir: &Path, contents: &str) -> String {
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}
