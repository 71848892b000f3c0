use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::MigrateError;
use crate::fields::FieldValue;
use crate::github::transport::DEFAULT_ENDPOINT;

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Deserialize)]
pub struct ProjectSettings {
    pub owner: String,
    pub repository_name: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_works_dir")]
    pub works_dir: PathBuf,
    pub project: ProjectConfig,
}

#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    pub github_project_id: String,
    #[serde(default)]
    pub columns: IndexMap<String, Column>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub write_description: bool,
    pub field_value: Option<FieldValue>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_works_dir() -> PathBuf {
    PathBuf::from("tmp")
}

impl ProjectSettings {
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut settings: ProjectSettings = toml::from_str(contents)?;
        for (name, column) in settings.project.columns.iter_mut() {
            if let Some(field) = column.field_value.as_mut() {
                field.column = name.clone();
            }
        }
        Ok(settings)
    }
}

pub fn load_settings(path: &Path) -> Result<ProjectSettings> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    ProjectSettings::from_toml(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Bearer token for the GraphQL API.
pub fn github_token() -> Result<String, MigrateError> {
    token_from(std::env::var(TOKEN_ENV).ok())
}

fn token_from(value: Option<String>) -> Result<String, MigrateError> {
    value
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| MigrateError::Configuration(format!("{TOKEN_ENV} is not set")))
}
