#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Scratch data directory that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).expect("read workspace file")
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path().join(name).exists()
    }

    /// Binary invocation with `--data-dir` pointing at this workspace.
    pub fn command(&self) -> Command {
        self.command_in(self.path())
    }

    /// Binary invocation with `--data-dir` pointing at `data_dir`.
    pub fn command_in(&self, data_dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("exoplanet-reports").expect("binary exists");
        cmd.env_remove("EXOPLANETS_DATA_DIR")
            .env_remove("EXOPLANETS_SOURCE_URL")
            .arg("--data-dir")
            .arg(data_dir);
        cmd
    }

    /// Runs the full pipeline against the bundled sample export.
    pub fn run_sample(&self) {
        let input = fixture_path("exoplanets_sample.csv");
        self.command()
            .args(["run", "--input"])
            .arg(&input)
            .assert()
            .success();
    }
}
