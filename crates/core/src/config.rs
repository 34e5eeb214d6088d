// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Semaphore configuration loaded from TOML
//!
//! ```toml
//! name = "/build-slots"
//! mode = "0660"
//! initial_value = 4
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML syntax or schema error
    #[error("TOML syntax error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error reading file
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Settings for opening a named semaphore
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemaphoreConfig {
    /// System-wide name, e.g. `/build-slots`
    pub name: String,
    /// Permission bits used when the semaphore is created
    #[serde(default = "default_mode", deserialize_with = "deserialize_mode")]
    pub mode: u32,
    /// Starting count used when the semaphore is created
    #[serde(default = "default_initial_value")]
    pub initial_value: u32,
}

fn default_mode() -> u32 {
    0o644
}

fn default_initial_value() -> u32 {
    1
}

/// Accept `mode = 420` or `mode = "0644"` (octal string)
fn deserialize_mode<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawMode {
        Bits(u32),
        Octal(String),
    }

    match RawMode::deserialize(deserializer)? {
        RawMode::Bits(bits) => Ok(bits),
        RawMode::Octal(s) => {
            let digits = s.trim_start_matches("0o");
            u32::from_str_radix(digits, 8).map_err(|e| {
                serde::de::Error::custom(format!("invalid octal mode {:?}: {}", s, e))
            })
        }
    }
}

impl SemaphoreConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: default_mode(),
            initial_value: default_initial_value(),
        }
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_initial_value(mut self, value: u32) -> Self {
        self.initial_value = value;
        self
    }

    /// Parse a configuration from TOML string content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SemaphoreConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Parse a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
