//! Run configuration and the output file layout.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    report::ReportRule,
    source::{DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_SECS, HttpSource},
};

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub source_url: String,
    pub timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl PipelineConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn paths(&self) -> OutputPaths {
        OutputPaths::new(&self.data_dir)
    }

    pub fn http_source(&self) -> HttpSource {
        HttpSource::new(self.source_url.clone(), self.timeout)
    }
}

/// Every file a run reads or writes, relative to the data directory.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    root: PathBuf,
}

impl OutputPaths {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raw_csv(&self) -> PathBuf {
        self.root.join("nasa_exoplanets.csv")
    }

    pub fn raw_json(&self) -> PathBuf {
        self.root.join("nasa_exoplanets.json")
    }

    pub fn unique_csv(&self) -> PathBuf {
        self.root.join("exoplanets.csv")
    }

    pub fn unique_json(&self) -> PathBuf {
        self.root.join("exoplanets.json")
    }

    pub fn key_csv(&self) -> PathBuf {
        self.root.join("key_exoplanets.csv")
    }

    pub fn key_json(&self) -> PathBuf {
        self.root.join("key_exoplanets.json")
    }

    pub fn database(&self) -> PathBuf {
        self.root.join("exoplanets.db")
    }

    pub fn report(&self, rule: &ReportRule) -> PathBuf {
        self.root.join(rule.file_name)
    }
}
