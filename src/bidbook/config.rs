use crate::error::{BidbookError, Result};
use crate::navigation::DEFAULT_TITLE_LIMIT;
use crate::search::DEFAULT_SNIPPET_CONTEXT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_EXPORT_FILE: &str = "uma-ps-system.json";

/// Configuration for bidbook, stored in `config.json` in the config directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BidbookConfig {
    /// Where the document is loaded from: an `http(s)://` URL or a file path.
    /// None means the embedded document.
    #[serde(default)]
    pub source: Option<String>,

    /// Default file name for `export`
    #[serde(default = "default_export_file")]
    pub export_file: String,

    /// Panel titles longer than this are truncated
    #[serde(default = "default_title_limit")]
    pub title_limit: usize,

    /// Chars of context on each side of a search match
    #[serde(default = "default_snippet_context")]
    pub snippet_context: usize,
}

fn default_export_file() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

fn default_title_limit() -> usize {
    DEFAULT_TITLE_LIMIT
}

fn default_snippet_context() -> usize {
    DEFAULT_SNIPPET_CONTEXT
}

impl Default for BidbookConfig {
    fn default() -> Self {
        Self {
            source: None,
            export_file: default_export_file(),
            title_limit: DEFAULT_TITLE_LIMIT,
            snippet_context: DEFAULT_SNIPPET_CONTEXT,
        }
    }
}

impl BidbookConfig {
    pub const KEYS: [&'static str; 4] = ["source", "export_file", "title_limit", "snippet_context"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: BidbookConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "source" => self.source.clone().unwrap_or_default(),
            "export_file" => self.export_file.clone(),
            "title_limit" => self.title_limit.to_string(),
            "snippet_context" => self.snippet_context.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a key from its string form. An empty `source` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "source" => {
                let value = value.trim();
                self.source = (!value.is_empty()).then(|| value.to_string());
            }
            "export_file" => {
                if value.trim().is_empty() {
                    return Err(BidbookError::Config(
                        "export_file cannot be empty".to_string(),
                    ));
                }
                self.export_file = value.trim().to_string();
            }
            "title_limit" => self.title_limit = parse_positive(key, value)?,
            "snippet_context" => self.snippet_context = parse_positive(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// All keys with their current values, in a stable order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .map(|key| (*key, self.get(key).unwrap_or_default()))
            .collect()
    }
}

fn unknown_key(key: &str) -> BidbookError {
    BidbookError::Config(format!(
        "Unknown config key '{}'. Known keys: {}",
        key,
        BidbookConfig::KEYS.join(", ")
    ))
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(BidbookError::Config(format!(
            "{} must be a positive number, got '{}'",
            key, value
        ))),
    }
}
