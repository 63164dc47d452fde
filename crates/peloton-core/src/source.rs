// File: crates/peloton-core/src/source.rs
// Summary: Data sources for the cyclist dataset (HTTP, local file) and a one-shot background loader.

use std::io::Read;
use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::record::Dataset;

pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/cyclist-data.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Largest accepted payload; the real dataset is a few KiB.
pub const MAX_PAYLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// One attempt, one result. No retry, no caching.
pub trait DataSource {
    fn describe(&self) -> String;
    fn load(&self) -> Result<Dataset>;
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }
    fn load(&self) -> Result<Dataset> {
        (**self).load()
    }
}

#[derive(Clone, Debug)]
pub struct HttpSource {
    pub url: String,
    pub timeout: Duration,
    pub max_bytes: u64,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), timeout: DEFAULT_TIMEOUT, max_bytes: MAX_PAYLOAD_BYTES }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_URL)
    }
}

impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn load(&self) -> Result<Dataset> {
        tracing::info!(url = %self.url, "fetching dataset");
        let resp = ureq::get(&self.url).timeout(self.timeout).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => Error::Network(format!("{} returned HTTP {code}", self.url)),
            ureq::Error::Transport(t) => Error::Network(t.to_string()),
        })?;
        let mut body = Vec::new();
        // one byte past the limit tells an oversized body from one that fits exactly
        resp.into_reader()
            .take(self.max_bytes.saturating_add(1))
            .read_to_end(&mut body)
            .map_err(|e| Error::Network(format!("reading response body: {e}")))?;
        check_size(body.len() as u64, self.max_bytes)?;
        Dataset::from_slice(&body)
    }
}

#[derive(Clone, Debug)]
pub struct FileSource {
    pub path: PathBuf,
    pub max_bytes: u64,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), max_bytes: MAX_PAYLOAD_BYTES }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Dataset> {
        tracing::info!(path = %self.path.display(), "reading dataset");
        check_size(std::fs::metadata(&self.path)?.len(), self.max_bytes)?;
        let body = std::fs::read(&self.path)?;
        Dataset::from_slice(&body)
    }
}

fn check_size(len: u64, max_bytes: u64) -> Result<()> {
    if len > max_bytes {
        return Err(Error::Format(format!("payload exceeds {max_bytes} bytes")));
    }
    Ok(())
}

/// Pick a source for `input`: `http(s)://` URLs go over the network, anything else is a path.
pub fn source_for(input: &str, timeout: Duration) -> Box<dyn DataSource + Send> {
    if input.starts_with("http://") || input.starts_with("https://") {
        Box::new(HttpSource::new(input).with_timeout(timeout))
    } else {
        Box::new(FileSource::new(input))
    }
}

/// Run one load on a worker thread and hand the result to `on_done` there.
pub fn load_in_background<S, F>(source: S, on_done: F) -> std::io::Result<JoinHandle<()>>
where
    S: DataSource + Send + 'static,
    F: FnOnce(Result<Dataset>) + Send + 'static,
{
    std::thread::Builder::new()
        .name("dataset-loader".into())
        .spawn(move || on_done(source.load()))
}
