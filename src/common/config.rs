//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::Result;
use crate::seed::SeedLayout;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Seed file settings
    #[serde(default)]
    pub seeds: SeedsConfig,

    /// Migration output settings
    #[serde(default)]
    pub migration: MigrationConfig,

    /// Guide generation settings
    #[serde(default)]
    pub guide: GuideConfig,
}

/// Seed file settings
#[derive(Debug, Deserialize, Default)]
pub struct SeedsConfig {
    /// Seed files used when none are given on the command line
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Block boundary layout
    #[serde(default)]
    pub layout: SeedLayout,
}

/// Migration output settings
#[derive(Debug, Deserialize)]
pub struct MigrationConfig {
    /// Where the generated migration is written
    #[serde(default = "default_migration_output")]
    pub output: PathBuf,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            output: default_migration_output(),
        }
    }
}

fn default_migration_output() -> PathBuf {
    PathBuf::from("supabase/migrations/rewrite_qa_steps.sql")
}

/// Guide generation settings
#[derive(Debug, Deserialize)]
pub struct GuideConfig {
    /// Environment file holding the Supabase credentials
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Where the generated document is written
    #[serde(default = "default_guide_output")]
    pub output: PathBuf,

    /// Rows requested per page from the REST endpoint
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            output: default_guide_output(),
            page_size: default_page_size(),
        }
    }
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env.local")
}
fn default_guide_output() -> PathBuf {
    PathBuf::from("docs/qa-system/GUIA_QA_TESTER.docx")
}
fn default_page_size() -> usize {
    1000
}

impl Config {
    /// Load configuration from an explicit path, or the default config file
    ///
    /// Returns default configuration if no explicit path is given and the
    /// default file doesn't exist
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| super::Error::file_read(path, e))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        if config.guide.page_size == 0 {
            return Err(super::Error::Config(
                "guide.page_size must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }
}
