// File: src/config.rs
// Purpose: Configuration parsing from authform.toml

use crate::descriptor::NamingConvention;
use crate::notice::NoticeTimings;
use crate::provenance::ProvenancePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Which field names imply which constraints
    #[serde(default)]
    pub naming: NamingConvention,

    /// Which error texts count as server-originated
    #[serde(default)]
    pub provenance: ProvenancePolicy,

    #[serde(default)]
    pub notices: NoticeTimings,
}

impl Config {
    /// Load configuration from a TOML file that must exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./authform.toml)
    ///
    /// A missing file yields the default config.
    pub fn load_default() -> Result<Self> {
        Self::load_or_default("authform.toml")
    }

    /// Like [`Config::load`], but a missing file yields the default config
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(content)?)
    }
}
