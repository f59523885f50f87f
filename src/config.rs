use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "WATER_PREDICTOR_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "predictor.toml";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// JSON model artifact.
    pub model_path: PathBuf,
    /// Training column schema (`.json` or `.csv`).
    pub columns_path: PathBuf,
    pub form: FormConfig,
}

/// Bounds and defaults of the input form.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    pub year_min: i64,
    pub year_max: i64,
    pub default_year: i64,
    pub default_station_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("pollution_model.json"),
            columns_path: PathBuf::from("model_columns.json"),
            form: FormConfig::default(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            year_min: 2000,
            year_max: 2100,
            default_year: 2022,
            default_station_id: "1".to_string(),
        }
    }
}

impl AppConfig {
    /// Config path from the environment, falling back to `predictor.toml`.
    pub fn path_from_env() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Read a TOML config.  A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config.normalized())
    }

    /// Keep the default year inside the form range.
    fn normalized(mut self) -> Self {
        let form = &mut self.form;
        if form.year_min > form.year_max {
            std::mem::swap(&mut form.year_min, &mut form.year_max);
        }
        form.default_year = form.default_year.clamp(form.year_min, form.year_max);
        self
    }
}
