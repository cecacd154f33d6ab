use super::{
    AirtableConfig, CategoriesConfig, DefaultsConfig, OutputConfig, RecordFilterConfig,
    ReliabilityConfig, StoreConfig,
};
use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG_FILE: &str = "wisecompanion.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path the config was read from - computed, not serialized
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    #[serde(default)]
    pub airtable: AirtableConfig,

    #[serde(default)]
    pub categories: CategoriesConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub record_filter: Option<RecordFilterConfig>,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub reliability: ReliabilityConfig,
}

impl Config {
    /// Resolve and load the active configuration.
    ///
    /// Lookup order: `explicit`, `./wisecompanion.toml`, `~/.wisecompanion/config.toml`,
    /// then built-in defaults. Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match resolve_config_path(explicit)? {
            Some(path) => Self::from_file(&path)?,
            None => {
                tracing::debug!("no config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ConfigError::Load(format!("failed to read config at {}: {e}", path.display()))
        })?;
        let mut config: Self = toml::from_str(&contents).map_err(|e| {
            ConfigError::Load(format!("failed to parse config at {}: {e}", path.display()))
        })?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get("AIRTABLE_PAT") {
            self.airtable.token = Some(token);
        }
        if let Some(base_id) = get("AIRTABLE_BASE_ID") {
            self.airtable.base_id = Some(base_id);
        }
        if let Some(table) = get("WISECOMPANION_TABLE") {
            self.airtable.table = table;
        }
        if let Some(path) = get("WISECOMPANION_ARTIFACT") {
            self.output.artifact_path = path;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reliability.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "reliability.max_attempts must be at least 1".into(),
            ));
        }
        if self.reliability.backoff_multiplier == 0 {
            return Err(ConfigError::Validation(
                "reliability.backoff_multiplier must be at least 1".into(),
            ));
        }
        if self.airtable.table.trim().is_empty() {
            return Err(ConfigError::Validation("airtable.table must not be empty".into()));
        }
        if self.output.artifact_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.artifact_path must not be empty".into(),
            ));
        }
        if let Some(filter) = &self.record_filter
            && filter.field.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "record_filter.field must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Extra checks for the fetch command, which talks to Airtable.
    pub fn validate_for_fetch(&self) -> Result<(), ConfigError> {
        let missing = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
        if missing(&self.airtable.token) {
            return Err(ConfigError::Validation(
                "airtable.token is required (set AIRTABLE_PAT)".into(),
            ));
        }
        if missing(&self.airtable.base_id) {
            return Err(ConfigError::Validation(
                "airtable.base_id is required (set AIRTABLE_BASE_ID)".into(),
            ));
        }
        Ok(())
    }

    pub fn artifact_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.output.artifact_path).into_owned())
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
        if !expanded.exists() {
            return Err(ConfigError::Load(format!(
                "config file {} does not exist",
                expanded.display()
            )));
        }
        return Ok(Some(expanded));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }

    let home = UserDirs::new()
        .map(|u| u.home_dir().join(".wisecompanion").join("config.toml"))
        .filter(|p| p.exists());
    Ok(home)
}
