//! Where the document comes from.
//!
//! - [`FileSource`]: a JSON file on disk
//! - [`HttpSource`]: a GET against an `http(s)://` URL
//! - [`EmbeddedSource`]: the default document compiled into the binary

use super::DocumentSource;
use crate::error::{BidbookError, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// The default document, used when no source is configured or the source fails.
pub const EMBEDDED_DOCUMENT: &str = include_str!("../../../assets/default.json");

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            BidbookError::Load(format!("could not read {}: {}", self.path.display(), e))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    pub url: String,
    pub timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: HTTP_TIMEOUT,
        }
    }
}

impl DocumentSource for HttpSource {
    fn fetch(&self) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| BidbookError::Load(format!("could not build http client: {}", e)))?;
        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| BidbookError::Load(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BidbookError::Load(format!(
                "{} answered with status {}",
                self.url, status
            )));
        }
        response
            .text()
            .map_err(|e| BidbookError::Load(format!("could not read response body: {}", e)))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl DocumentSource for EmbeddedSource {
    fn fetch(&self) -> Result<String> {
        Ok(EMBEDDED_DOCUMENT.to_string())
    }

    fn describe(&self) -> String {
        "embedded document".to_string()
    }

    fn is_embedded(&self) -> bool {
        true
    }
}

/// Picks a source for a configured location. No location means the embedded document.
pub fn source_for(location: Option<&str>) -> Box<dyn DocumentSource> {
    match location.map(str::trim).filter(|l| !l.is_empty()) {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Box::new(HttpSource::new(url))
        }
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(EmbeddedSource),
    }
}
