//! Common test utilities and helpers

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated home, working directory and state directory for the binary
pub struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("home")).unwrap();
        fs::create_dir_all(temp_dir.path().join("work")).unwrap();
        Self { temp_dir }
    }

    pub fn home(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.temp_dir.path().join("work")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.temp_dir.path().join("state")
    }

    /// Path of a session file
    pub fn session_file(&self, session: &str) -> PathBuf {
        self.state_dir().join(format!("{}.json", session))
    }

    /// Write a project config file into the working directory
    pub fn write_project_config(&self, yaml: &str) {
        let dir = self.work_dir().join(".sourdough");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), yaml).unwrap();
    }

    /// Write a file into the working directory
    pub fn write_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.work_dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// The binary with no inherited configuration and the bake zone at UTC
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("sourdough").unwrap();
        for (key, _) in std::env::vars() {
            if key.starts_with("SOURDOUGH_") {
                cmd.env_remove(&key);
            }
        }
        cmd.env_remove("OPENAI_API_KEY")
            .env("HOME", self.home())
            .env("SOURDOUGH_STATE_DIR", self.state_dir())
            .env("SOURDOUGH_UTC_OFFSET_MINUTES", "0")
            .current_dir(self.work_dir());
        cmd
    }
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
