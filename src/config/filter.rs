use crate::filter::FilterParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct FilterToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub filter: FilterParams,
    pub output: FilterOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct FilterOutputConfig {
    /// Filtered image, format taken from the extension.
    pub image: PathBuf,
    /// Run report (parameters, pyramid sizes, timings).
    #[serde(default)]
    pub report_json: Option<PathBuf>,
    /// Directory receiving `original.png` and one `level{l}.png` per detail
    /// level of the output pyramid.
    #[serde(default)]
    pub levels_dir: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<FilterToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<FilterToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}
