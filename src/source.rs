//! Where the raw CSV comes from.
//!
//! The pipeline only sees [`CsvSource`]: something that returns the full CSV
//! text or fails. [`HttpSource`] queries the NASA Exoplanet Archive TAP
//! endpoint with a bounded timeout; [`FileSource`] reads a local export.

use std::{fs, path::PathBuf, time::Duration};

use log::info;
use reqwest::blocking::Client;

use crate::error::{ExoplanetError, Result};

pub const DEFAULT_SOURCE_URL: &str =
    "https://exoplanetarchive.ipac.caltech.edu/TAP/sync?query=select+*+from+ps&format=csv";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub trait CsvSource {
    /// Human readable origin used in log lines.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl CsvSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String> {
        info!("Downloading exoplanet data from {}", self.url);
        let client = Client::builder().timeout(self.timeout).build()?;
        let response = client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExoplanetError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        let body = response.text()?;
        info!("Downloaded {} byte(s)", body.len());
        Ok(body)
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CsvSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }
}
