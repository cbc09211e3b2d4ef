//! Configuration Management
//!
//! Handles persistent defaults for omics-helpers.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Catalog database resource links are created in when none is given
pub const DEFAULT_DATABASE: &str = "omicsdb";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// AWS profile to load credentials from
    #[serde(default)]
    pub profile: Option<String>,
    /// AWS region
    #[serde(default)]
    pub region: Option<String>,
    /// Glue database resource links are created in
    #[serde(default)]
    pub database: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("omics-helpers").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective profile (CLI > config > AWS_PROFILE)
    pub fn effective_profile(&self, cli: Option<&str>) -> Option<String> {
        let candidates = [
            cli.map(|p| p.to_string()),
            self.profile.clone(),
            std::env::var("AWS_PROFILE").ok(),
        ];

        candidates.into_iter().flatten().find(|p| !p.is_empty())
    }

    /// Get effective region (CLI > config > AWS_REGION > AWS_DEFAULT_REGION)
    ///
    /// Returns `None` when nothing valid is set, leaving the SDK's own
    /// region chain in charge.
    pub fn effective_region(&self, cli: Option<&str>) -> Option<String> {
        let candidates = [
            cli.map(|r| r.to_string()),
            self.region.clone(),
            std::env::var("AWS_REGION").ok(),
            std::env::var("AWS_DEFAULT_REGION").ok(),
        ];

        for region in candidates.into_iter().flatten() {
            if validate_region(&region) {
                return Some(region);
            }
            tracing::warn!("Ignoring invalid region {:?}", region);
        }

        None
    }

    /// Get effective database (CLI > config > default)
    pub fn effective_database(&self, cli: Option<&str>) -> String {
        cli.map(|d| d.to_string())
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
    }

    /// Set region and save
    pub fn set_region(&mut self, region: &str) -> Result<()> {
        if !validate_region(region) {
            return Err(anyhow::anyhow!("Invalid region: {}", region));
        }
        self.region = Some(region.to_string());
        self.save()
    }
}

/// Validate an AWS region name format
/// Region names are lowercase letters, digits and hyphens, e.g. `us-east-1`
pub fn validate_region(region: &str) -> bool {
    if region.is_empty() || region.len() > 32 {
        return false;
    }

    if !region.contains('-') || region.starts_with('-') || region.ends_with('-') {
        return false;
    }

    region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
