// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::load::SKIP_ROWS;

/// Deployment file looked up in the working directory by [`Config::load`].
pub const CONFIG_FILE: &str = "estat-students.yaml";

/// Prefectures compared on every view, in display order.
pub static DEFAULT_REGIONS: &[&str] = &["東京都", "長野県", "静岡県"];

/// Deployment settings. Fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the b004 CSV export.
    pub data_path: PathBuf,
    /// Preamble rows before the first data row.
    pub skip_rows: usize,
    /// Regions offered for selection and compared side by side.
    pub regions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("b004.csv"),
            skip_rows: SKIP_ROWS,
            regions: DEFAULT_REGIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Read a YAML deployment file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {:?}", path))?;
        let cfg: Config = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {:?}", path))?;
        if cfg.regions.is_empty() {
            anyhow::bail!("config file {:?} lists no regions", path);
        }
        Ok(cfg)
    }

    /// [`CONFIG_FILE`] from the working directory, or the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// [`CONFIG_FILE`] inside `dir` if present, else the defaults.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            info!(path = %path.display(), "using config file");
            Self::from_yaml_file(&path)
        } else {
            debug!("no {} found; using defaults", CONFIG_FILE);
            Ok(Self::default())
        }
    }
}
