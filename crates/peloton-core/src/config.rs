// File: crates/peloton-core/src/config.rs
// Summary: TOML configuration (data source, layout, theme, title) with defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::chart::{RenderOptions, DEFAULT_TITLE};
use crate::error::Result;
use crate::layout::LayoutConfig;
use crate::source::{source_for, DataSource, FileSource, DEFAULT_DATA_URL};
use crate::theme;

pub const CONFIG_ENV: &str = "PELOTON_CONFIG";
pub const CONFIG_FILE: &str = "peloton.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub url: String,
    /// Local file used instead of `url` when set.
    pub file: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { url: DEFAULT_DATA_URL.to_string(), file: None, timeout_secs: 10 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub theme: String,
    pub data: DataConfig,
    pub layout: LayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            theme: "dark".to_string(),
            data: DataConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Config {
    /// Load from `path`, else `$PELOTON_CONFIG`, else `./peloton.toml`, else defaults.
    ///
    /// An explicit `path` that cannot be read is an error; the fallbacks are optional.
    pub fn parse(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(&path);
        }
        let fallbacks = std::env::var(CONFIG_ENV)
            .ok()
            .map(PathBuf::from)
            .into_iter()
            .chain(std::iter::once(PathBuf::from(CONFIG_FILE)));
        for path in fallbacks {
            let Ok(text) = std::fs::read_to_string(&path) else {
                continue;
            };
            tracing::debug!(path = %path.display(), "using config file");
            return Self::from_toml(&text);
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.layout.validate()?;
        Ok(config)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            theme: theme::find(&self.theme),
            title: self.title.clone(),
            ..RenderOptions::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.data.timeout_secs)
    }

    /// Source named by the config: the local file if set, otherwise the URL.
    pub fn source(&self) -> Box<dyn DataSource + Send> {
        match &self.data.file {
            Some(file) => Box::new(FileSource::new(file.clone())),
            None => source_for(&self.data.url, self.timeout()),
        }
    }
}
