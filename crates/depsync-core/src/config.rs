use serde::{Deserialize, Serialize};
use std::path::Path;

use depsync_util::errors::DepsyncError;

use crate::{CONFIG_FILE_NAME, DEFAULT_MANIFEST_NAME};

/// Settings loaded from `depsync.toml` at the scan root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepsyncConfig {
    /// File name treated as a project manifest.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Directory names that are never descended into.
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub sync: SyncConfig,
}

impl Default for DepsyncConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            exclude: Vec::new(),
            audit: AuditConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

fn default_manifest() -> String {
    DEFAULT_MANIFEST_NAME.to_string()
}

/// `[audit]` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Packages left out of the conflict report.
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// `[sync]` settings: how the package manager is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}

fn default_program() -> String {
    "uv".to_string()
}

fn default_args() -> Vec<String> {
    vec!["add".to_string()]
}

impl DepsyncConfig {
    /// Load `depsync.toml` from `root`, or return defaults if the file doesn't exist.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load(root: &Path) -> Result<Self, DepsyncError> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| DepsyncError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content).map_err(|e| DepsyncError::Config {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Parse configuration content.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Whether `package` is on the audit ignore list (case-insensitive).
    pub fn is_audit_ignored(&self, package: &str) -> bool {
        self.audit
            .ignore
            .iter()
            .any(|p| p.trim().eq_ignore_ascii_case(package))
    }
}
