//! formforge.toml parsing

use anyhow::{Context, Result};
use formforge_core::GenerationOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up in the current directory when none is given.
pub const DEFAULT_CONFIG: &str = "formforge.toml";

/// formforge.toml structure
///
/// ```toml
/// [project]
/// name = "Contact"
///
/// [options]
/// template = "react-typescript"
/// form_library = "react-hook-form"
/// include_backend = true
/// backend_framework = "express"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSection {
    #[serde(default)]
    pub name: Option<String>,
}

impl Config {
    /// Load config from a file. `.json` files hold bare options; anything
    /// else is read as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
            let options = GenerationOptions::from_json(&content)
                .with_context(|| format!("Failed to parse options: {}", path.display()))?;
            return Ok(Self {
                project: ProjectSection::default(),
                options,
            });
        }
        Self::from_toml(&content).with_context(|| format!("In {}", path.display()))
    }

    /// Parse config from TOML.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Load the given config, else `./formforge.toml` if it exists, else defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG).is_file() => {
                tracing::info!("using {DEFAULT_CONFIG}");
                Self::from_file(DEFAULT_CONFIG)
            }
            None => Ok(Self::default()),
        }
    }

    /// Project name: the flag, then the config, then the form title.
    #[must_use]
    pub fn project_name(&self, flag: Option<String>, title: Option<&str>) -> String {
        flag.or_else(|| self.project.name.clone())
            .or_else(|| title.map(str::to_string))
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Generated".to_string())
    }
}
