use crate::error::{Result, SiftError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extensions moved when nothing else is configured. Matched as substrings of
/// the file name, so `sprite.png.bak` counts as a `.png`.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".mat", ".prefab", ".png", ".jpg", ".jpeg", ".fbx", ".shader",
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub filters: FilterConfig,
    pub transfer: TransferConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransferConfig {
    pub preserve_modified_time: bool,
    pub buffer_size: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            preserve_modified_time: true,
            buffer_size: 64 * 1024, // 64KB
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SiftError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SiftError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| SiftError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    /// Only an explicitly named file is read; there is no lookup in the
    /// working directory.
    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref extensions) = cli_args.extensions {
            self.filters.extensions = parse_extension_list(extensions);
        }

        if let Some(preserve) = cli_args.preserve_modified_time {
            self.transfer.preserve_modified_time = preserve;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.filters.extensions.is_empty() {
            return Err(SiftError::Config {
                message: "At least one file extension must be specified".to_string(),
            });
        }

        // An empty entry would be contained in every file name.
        if self.filters.extensions.iter().any(|e| e.is_empty()) {
            return Err(SiftError::Config {
                message: "File extensions must not be empty strings".to_string(),
            });
        }

        if self.transfer.buffer_size == 0 {
            return Err(SiftError::Config {
                message: "Transfer buffer size must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Split a comma separated list, trimming entries and dropping empty ones.
/// Case is kept because matching is case-sensitive.
pub fn parse_extension_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub extensions: Option<String>,
    pub preserve_modified_time: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extensions(mut self, extensions: Option<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_preserve_modified_time(mut self, preserve: Option<bool>) -> Self {
        self.preserve_modified_time = preserve;
        self
    }
}
