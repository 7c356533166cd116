use crate::i18n::Lang;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_FILE: &str = "ads-report.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load from `path`, else `./ads-report.toml` when present, else
    /// defaults. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Self::from_file(&default_path)?
            } else {
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self =
            toml::from_str(&contents).with_context(|| "failed to parse configuration TOML")?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(lang) = env::var("ADS_REPORT_LANG") {
            if let Ok(lang) = lang.parse::<Lang>() {
                self.display.language = lang;
            }
        }
        if let Ok(dir) = env::var("ADS_REPORT_OUTPUT_DIR") {
            self.output.directory = PathBuf::from(dir);
        }
        if let Ok(rows) = env::var("ADS_REPORT_PREVIEW_ROWS") {
            if let Ok(value) = rows.parse::<usize>() {
                self.display.preview_rows = value;
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Campaign names that mark the export's totals row.
    #[serde(default = "default_total_row_markers")]
    pub total_row_markers: Vec<String>,
    /// Worksheet to read; the first one when unset.
    #[serde(default)]
    pub sheet: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            total_row_markers: default_total_row_markers(),
            sheet: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default, deserialize_with = "deserialize_lang")]
    pub language: Lang,
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: Lang::default(),
            preview_rows: default_preview_rows(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    #[serde(default = "default_write_files")]
    pub write_files: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            write_files: default_write_files(),
        }
    }
}

fn deserialize_lang<'de, D>(deserializer: D) -> std::result::Result<Lang, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

fn default_total_row_markers() -> Vec<String> {
    vec!["Total of 51 results".to_string()]
}

fn default_preview_rows() -> usize {
    20
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_write_files() -> bool {
    true
}
